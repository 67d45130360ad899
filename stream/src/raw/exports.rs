/*! C linkage for the table primitives.

```c
typedef struct RawStream RawStream;
size_t rwshim_read(RawStream *context, void *ptr, size_t size, size_t maxnum);
size_t rwshim_write(RawStream *context, const void *ptr, size_t size, size_t num);
int rwshim_close(RawStream *context);
```
*/
use std::ffi::c_void;
use std::os::raw::c_int;
use super::RawStream;

///# Safety
/// See [super::read].
#[no_mangle]
pub unsafe extern "C" fn rwshim_read(context: *mut RawStream, ptr: *mut c_void, size: usize, maxnum: usize) -> usize {
    super::read(context, ptr, size, maxnum)
}

///# Safety
/// See [super::write].
#[no_mangle]
pub unsafe extern "C" fn rwshim_write(context: *mut RawStream, ptr: *const c_void, size: usize, num: usize) -> usize {
    super::write(context, ptr, size, num)
}

///# Safety
/// See [super::close].
#[no_mangle]
pub unsafe extern "C" fn rwshim_close(context: *mut RawStream) -> c_int {
    super::close(context)
}

#[test] fn exported_round_trip() {
    use crate::{Memory, MemoryStream};
    let table = RawStream::boxed(Memory, MemoryStream::new(vec![0; 6])).as_ptr();
    let out = *b"hello!";
    let written = unsafe{ rwshim_write(table, out.as_ptr().cast(), 2, 3) };
    assert_eq!(written, 3);
    //position is at the end now
    let mut back = [0u8; 6];
    let read = unsafe{ rwshim_read(table, back.as_mut_ptr().cast(), 1, 6) };
    assert_eq!(read, 0);
    assert_eq!(unsafe{ rwshim_close(table) }, 0);
}

#[test] fn exported_read() {
    use crate::{Memory, MemoryStream};
    let table = RawStream::boxed(Memory, MemoryStream::read_only((0..45).collect())).as_ptr();
    let mut back = [0u8; 100];
    assert_eq!(unsafe{ rwshim_read(table, back.as_mut_ptr().cast(), 10, 10) }, 4);
    assert_eq!(back[39], 39);
    assert_eq!(back[40], 0);
    assert_eq!(unsafe{ rwshim_write(table, back.as_ptr().cast(), 1, 1) }, 0);
    assert_eq!(unsafe{ rwshim_close(table) }, 0);
}
