/*! Adapts `std::io` objects.

This follows the `fread`/`fwrite` convention rather than the single-call convention of [std::io::Read].
A read keeps pulling until the requested span is full, the reader reports end of stream, or an error occurs.
Bytes of a trailing partial element are consumed but not counted.  Errors are kept on the stream for
[IoStream::take_error].
*/
use std::io::{ErrorKind, Read, Write};
use std::marker::PhantomData;
use std::os::raw::c_int;
use crate::{span, Provider};

///Provider for [IoStream].
pub struct Io<T>(PhantomData<fn() -> T>);
impl<T> Io<T> {
    pub const fn new() -> Self {
        Io(PhantomData)
    }
}
impl<T> Default for Io<T> {
    fn default() -> Self {
        Io::new()
    }
}
impl<T> Clone for Io<T> {
    fn clone(&self) -> Self {
        Io::new()
    }
}
impl<T> Copy for Io<T> {}
impl<T> std::fmt::Debug for Io<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Io")
    }
}

#[derive(Debug)]
pub struct IoStream<T> {
    //None once closed
    inner: Option<T>,
    error: Option<std::io::Error>,
}

impl<T> IoStream<T> {
    pub fn new(inner: T) -> Self {
        IoStream {
            inner: Some(inner),
            error: None
        }
    }
    ///The wrapped value, unless the stream was closed.
    pub fn get_ref(&self) -> Option<&T> {
        self.inner.as_ref()
    }
    ///Takes the error from the most recent failed transfer, if any.
    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }
    pub fn into_inner(self) -> Option<T> {
        self.inner
    }
}

fn closed() -> std::io::Error {
    std::io::Error::new(ErrorKind::NotConnected, "stream is closed")
}

impl<T: Read + Write> Provider for Io<T> {
    type Handle = IoStream<T>;

    fn read(&self, handle: &mut IoStream<T>, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        let len = span(buffer.len(), element_size, element_count);
        if len == 0 {
            return 0
        }
        let inner = match handle.inner.as_mut() {
            Some(inner) => inner,
            None => {
                handle.error = Some(closed());
                return 0
            }
        };
        let mut done = 0;
        while done < len {
            match inner.read(&mut buffer[done..len]) {
                Ok(0) => break,
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    handle.error = Some(e);
                    break
                }
            }
        }
        done / element_size
    }

    fn write(&self, handle: &mut IoStream<T>, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        let len = span(buffer.len(), element_size, element_count);
        if len == 0 {
            return 0
        }
        let inner = match handle.inner.as_mut() {
            Some(inner) => inner,
            None => {
                handle.error = Some(closed());
                return 0
            }
        };
        let mut done = 0;
        while done < len {
            match inner.write(&buffer[done..len]) {
                Ok(0) => {
                    handle.error = Some(ErrorKind::WriteZero.into());
                    break
                }
                Ok(n) => done += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => {
                    handle.error = Some(e);
                    break
                }
            }
        }
        done / element_size
    }

    ///Flushes and drops the inner value.  -1 if the flush fails or the stream was already closed.
    fn close(&self, handle: &mut IoStream<T>) -> c_int {
        match handle.inner.take() {
            None => -1,
            Some(mut inner) => {
                match inner.flush() {
                    Ok(()) => 0,
                    Err(e) => {
                        handle.error = Some(e);
                        -1
                    }
                }
            }
        }
    }
}
