/*! Provides utilities for IO.

In rwshim, io operations go through a *forwarder* and a *provider*.  The provider owns the stream and decides
what every result means; the forwarder only hands calls to it.  This lets one piece of code speak read, write
and close to any stream, while the behaviour stays whatever the chosen provider does.

Providers include:
* [stream::Memory], a fixed block of memory
* [stream::Io], anything implementing [std::io::Read] and [std::io::Write]
* `stream::Fd`, a unix file descriptor
* [stream::Raw], a C function table

|                  | short read                         | double close         |
|------------------|------------------------------------|----------------------|
| [stream::Memory] | partial element left unconsumed    | -1                   |
| [stream::Io]     | partial element consumed           | -1                   |
| `stream::Fd`     | one syscall, partial element lost  | `close(2)` says      |
| [stream::Raw]    | whatever the table does            | whatever the table does |

Note that the forwarder never smooths over these differences.  Callers who care must know their provider.
*/
pub use rwshim_stream as stream;
