/*! Streams behind a C function table.

[RawStream] is the calling convention a C I/O library exposes: a context struct whose entries receive the
context pointer back.  [read], [write] and [close] call through the table; [Raw] is the [Provider] over it.

[RawStream::boxed] goes the other way, packaging any Rust provider as a table for C callers.
*/
use std::ffi::c_void;
use std::os::raw::c_int;
use std::ptr::NonNull;
use crate::{span, Provider};

#[cfg(feature="ffi")]
mod exports;

pub type ReadFn = unsafe extern "C" fn(context: *mut RawStream, ptr: *mut c_void, size: usize, maxnum: usize) -> usize;
pub type WriteFn = unsafe extern "C" fn(context: *mut RawStream, ptr: *const c_void, size: usize, num: usize) -> usize;
pub type CloseFn = unsafe extern "C" fn(context: *mut RawStream) -> c_int;

#[repr(C)]
pub struct RawStream {
    pub read: ReadFn,
    pub write: WriteFn,
    ///Releases the stream.  The context may be freed by this call.
    pub close: CloseFn,
}

///Calls the table's read entry.
///
/// # Safety
/// `context` must point to a live table, and `ptr` to at least `size * maxnum` writable bytes.
#[inline] pub unsafe fn read(context: *mut RawStream, ptr: *mut c_void, size: usize, maxnum: usize) -> usize {
    ((*context).read)(context, ptr, size, maxnum)
}
///Calls the table's write entry.
///
/// # Safety
/// `context` must point to a live table, and `ptr` to at least `size * num` readable bytes.
#[inline] pub unsafe fn write(context: *mut RawStream, ptr: *const c_void, size: usize, num: usize) -> usize {
    ((*context).write)(context, ptr, size, num)
}
///Calls the table's close entry.
///
/// # Safety
/// `context` must point to a live table.  It must not be used after this returns.
#[inline] pub unsafe fn close(context: *mut RawStream) -> c_int {
    ((*context).close)(context)
}

///A table pointer used as a [Raw] handle.  Not `Clone`: there is one handle per open table.
#[derive(Debug)]
pub struct RawHandle(NonNull<RawStream>);
impl RawHandle {
    ///# Safety
    /// The table must stay live until it is closed through this handle, and its entries must honour the contract
    /// documented on [read], [write] and [close].
    pub unsafe fn from_ptr(ptr: *mut RawStream) -> Option<RawHandle> {
        NonNull::new(ptr).map(RawHandle)
    }
    pub fn as_ptr(&self) -> *mut RawStream {
        self.0.as_ptr()
    }
}

///Provider over [RawHandle].
#[derive(Debug,Clone,Copy,Default)]
pub struct Raw;

impl Provider for Raw {
    type Handle = RawHandle;

    fn read(&self, handle: &mut RawHandle, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        span(buffer.len(), element_size, element_count);
        unsafe{ read(handle.as_ptr(), buffer.as_mut_ptr().cast(), element_size, element_count) }
    }

    fn write(&self, handle: &mut RawHandle, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        span(buffer.len(), element_size, element_count);
        unsafe{ write(handle.as_ptr(), buffer.as_ptr().cast(), element_size, element_count) }
    }

    fn close(&self, handle: &mut RawHandle) -> c_int {
        unsafe{ close(handle.as_ptr()) }
    }
}

///The table must come first so a `*mut RawStream` is also a `*mut Boxed<P>`.
#[repr(C)]
struct Boxed<P: Provider> {
    table: RawStream,
    provider: P,
    handle: P::Handle,
}

unsafe extern "C" fn boxed_read<P: Provider>(context: *mut RawStream, ptr: *mut c_void, size: usize, maxnum: usize) -> usize {
    let boxed = &mut *context.cast::<Boxed<P>>();
    let len = match size.checked_mul(maxnum) {
        Some(len) => len,
        None => return 0
    };
    let buffer: &mut [u8] = if len == 0 { &mut [] } else { std::slice::from_raw_parts_mut(ptr.cast(), len) };
    boxed.provider.read(&mut boxed.handle, buffer, size, maxnum)
}

unsafe extern "C" fn boxed_write<P: Provider>(context: *mut RawStream, ptr: *const c_void, size: usize, num: usize) -> usize {
    let boxed = &mut *context.cast::<Boxed<P>>();
    let len = match size.checked_mul(num) {
        Some(len) => len,
        None => return 0
    };
    let buffer: &[u8] = if len == 0 { &[] } else { std::slice::from_raw_parts(ptr.cast(), len) };
    boxed.provider.write(&mut boxed.handle, buffer, size, num)
}

unsafe extern "C" fn boxed_close<P: Provider>(context: *mut RawStream) -> c_int {
    let mut boxed = Box::from_raw(context.cast::<Boxed<P>>());
    let status = boxed.provider.close(&mut boxed.handle);
    drop(boxed);
    status
}

impl RawStream {
    ///Packages a provider and an open handle as a heap-allocated table.
    ///
    /// The table's close entry closes the handle, then frees the allocation, whatever the status.  The pointer is
    /// dangling after that.  If the table is never closed, the allocation leaks.
    pub fn boxed<P>(provider: P, handle: P::Handle) -> NonNull<RawStream> where P: Provider + 'static, P::Handle: 'static {
        let boxed = Box::new(Boxed {
            table: RawStream {
                read: boxed_read::<P>,
                write: boxed_write::<P>,
                close: boxed_close::<P>,
            },
            provider,
            handle
        });
        NonNull::from(Box::leak(boxed)).cast()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::{Memory, MemoryStream, StreamForwarder};

    ///Shares the memory with the test after close.
    struct Shared;
    impl Provider for Shared {
        type Handle = Rc<RefCell<MemoryStream>>;
        fn read(&self, handle: &mut Self::Handle, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
            Memory.read(&mut handle.borrow_mut(), buffer, element_size, element_count)
        }
        fn write(&self, handle: &mut Self::Handle, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
            Memory.write(&mut handle.borrow_mut(), buffer, element_size, element_count)
        }
        fn close(&self, handle: &mut Self::Handle) -> c_int {
            Memory.close(&mut handle.borrow_mut())
        }
    }

    #[test] fn raw_provider_calls_table() {
        let memory = Rc::new(RefCell::new(MemoryStream::new((0..100).collect())));
        let table = RawStream::boxed(Shared, memory.clone());
        let mut handle = unsafe{ RawHandle::from_ptr(table.as_ptr()) }.unwrap();
        let forwarder = StreamForwarder::new(Raw);

        let mut buf = [0u8; 100];
        assert_eq!(forwarder.read(&mut handle, &mut buf, 55, 1), 1);
        assert_eq!(forwarder.read(&mut handle, &mut buf, 10, 10), 4);
        assert_eq!(&buf[..3], &[55,56,57]);
        assert_eq!(forwarder.write(&mut handle, b"abcdefghij", 2, 5), 2);
        assert_eq!(forwarder.close(&mut handle), 0);

        assert!(memory.borrow().is_closed());
        assert_eq!(&memory.borrow().as_slice()[95..99], b"abcd");
        assert_eq!(memory.borrow().as_slice()[99], 99);
        //boxed close dropped its clone
        assert_eq!(Rc::strong_count(&memory), 1);
    }

    #[test] fn null_table() {
        assert!(unsafe{ RawHandle::from_ptr(std::ptr::null_mut()) }.is_none());
    }

    #[test] fn overflowing_span_moves_nothing() {
        let table = RawStream::boxed(Memory, MemoryStream::new(vec![0; 8]));
        let mut byte = 0u8;
        let moved = unsafe{ read(table.as_ptr(), (&mut byte as *mut u8).cast(), usize::MAX, 2) };
        assert_eq!(moved, 0);
        assert_eq!(unsafe{ close(table.as_ptr()) }, 0);
    }
}
