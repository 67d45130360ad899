use std::os::raw::c_int;
use tracing::trace;
use crate::Provider;

///Emits a TRACE event for every call, then returns the inner provider's result untouched.
///
/// Wrap the provider, not the forwarder: `StreamForwarder::new(Traced::new(Memory))`.
#[derive(Debug,Clone,Copy,Default)]
pub struct Traced<P>(P);

impl<P> Traced<P> {
    pub const fn new(provider: P) -> Self {
        Traced(provider)
    }
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: Provider> Provider for Traced<P> {
    type Handle = P::Handle;

    fn read(&self, handle: &mut P::Handle, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        let read = self.0.read(handle, buffer, element_size, element_count);
        trace!(element_size, element_count, read, "read");
        read
    }

    fn write(&self, handle: &mut P::Handle, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        let written = self.0.write(handle, buffer, element_size, element_count);
        trace!(element_size, element_count, written, "write");
        written
    }

    fn close(&self, handle: &mut P::Handle) -> c_int {
        let status = self.0.close(handle);
        trace!(status, "close");
        status
    }
}

#[test] fn same_results_as_inner() {
    use crate::{Memory, MemoryStream, StreamForwarder};
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("trace"))
        .with_test_writer()
        .try_init();

    let forwarder = StreamForwarder::new(Traced::new(Memory));
    let mut stream = MemoryStream::new((0..100).collect());
    let mut buf = [0u8; 100];
    assert_eq!(forwarder.read(&mut stream, &mut buf, 55, 1), 1);
    assert_eq!(forwarder.read(&mut stream, &mut buf, 10, 10), 4);
    assert_eq!(forwarder.write(&mut stream, b"abcde", 1, 5), 5);
    assert_eq!(forwarder.write(&mut stream, b"abcde", 1, 5), 0);
    assert_eq!(forwarder.close(&mut stream), 0);
    assert_eq!(forwarder.close(&mut stream), -1);
}

#[test] fn unwraps_to_inner() {
    use crate::{Memory, MemoryStream};
    let traced = Traced::new(Memory);
    let inner: Memory = traced.into_inner();
    let mut stream = MemoryStream::new(vec![9; 4]);
    let mut buf = [0u8; 4];
    assert_eq!(inner.read(&mut stream, &mut buf, 4, 1), 1);
}
