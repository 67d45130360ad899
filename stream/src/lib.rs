/*! Forwards streaming IO to a provider.

A [Provider] is whatever actually moves bytes: a block of memory, a `std::io` object, a file descriptor,
or a C library's function table.  [StreamForwarder] exposes the provider's read, write and close with the same
shape, so it can stand in wherever a generic byte stream is expected.

The forwarder owns nothing but the provider value.  It never copies, inspects or drops a handle, does not
buffer, does not retry, and does not translate results.  Short transfers and close failures mean exactly what
the provider says they mean; see each provider's documentation.
*/

use std::os::raw::c_int;

pub mod memory;
pub mod std_io;
pub mod raw;

#[cfg(unix)]
pub mod unix;

#[cfg(feature="trace")]
pub mod traced;

pub use memory::{Memory, MemoryStream};
pub use std_io::{Io, IoStream};
pub use raw::{Raw, RawHandle, RawStream};
#[cfg(unix)]
pub use unix::{Fd, FdStream};
#[cfg(feature="trace")]
pub use traced::Traced;

///An os-specific error type
#[derive(Debug,Clone,Copy,PartialEq,Eq,thiserror::Error)]
#[error("<OSError {0}>")]
pub struct OSError(pub(crate) i32);
impl OSError {
    ///The raw os error code (`errno` on unix).
    pub fn code(&self) -> i32 {
        self.0
    }
}

///A nonzero status returned by a provider's close.
#[derive(Debug,Clone,Copy,PartialEq,Eq,thiserror::Error)]
#[error("close failed with status {0}")]
pub struct CloseError(pub c_int);

///Interprets a close status the usual way: 0 is success.
///
/// [StreamForwarder::close] returns the raw status; this is for callers who want a [Result].
pub fn check_close(status: c_int) -> Result<(),CloseError> {
    if status == 0 {
        Ok(())
    }
    else {
        Err(CloseError(status))
    }
}

/**
The capability set {read, write, close} over some handle type.

Counts are in whole elements of `element_size` bytes.  The caller promises that `element_size * element_count`
bytes fit in `buffer` and that the handle is open; what a provider does when that promise is broken is up to the
provider.
*/
pub trait Provider {
    ///The provider's notion of an open stream.
    type Handle;
    ///Reads up to `element_count` elements into `buffer`, returning the number of whole elements read.
    fn read(&self, handle: &mut Self::Handle, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize;
    ///Writes up to `element_count` elements from `buffer`, returning the number of whole elements written.
    fn write(&self, handle: &mut Self::Handle, buffer: &[u8], element_size: usize, element_count: usize) -> usize;
    ///Releases the stream.  0 on success.
    fn close(&self, handle: &mut Self::Handle) -> c_int;
}

///Passes read, write and close through to a provider chosen at construction.
#[derive(Debug,Default)]
pub struct StreamForwarder<P> {
    provider: P
}

impl<P: Provider> StreamForwarder<P> {
    pub const fn new(provider: P) -> Self {
        StreamForwarder {
            provider
        }
    }
    pub fn provider(&self) -> &P {
        &self.provider
    }
    pub fn into_provider(self) -> P {
        self.provider
    }
    #[inline] pub fn read(&self, handle: &mut P::Handle, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        self.provider.read(handle, buffer, element_size, element_count)
    }
    #[inline] pub fn write(&self, handle: &mut P::Handle, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        self.provider.write(handle, buffer, element_size, element_count)
    }
    ///Requests the provider release the stream.  The handle should not be used afterwards.
    #[inline] pub fn close(&self, handle: &mut P::Handle) -> c_int {
        self.provider.close(handle)
    }
}

///Byte length of `element_count` elements, panicking if that does not fit in a buffer of `len` bytes.
pub(crate) fn span(len: usize, element_size: usize, element_count: usize) -> usize {
    match element_size.checked_mul(element_count) {
        Some(bytes) if bytes <= len => bytes,
        _ => panic!("buffer holds {} bytes, but {} elements of {} bytes were requested",len,element_count,element_size)
    }
}
