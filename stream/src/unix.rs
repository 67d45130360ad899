/*! File descriptor streams.

One `read(2)` or `write(2)` per call; the byte count is divided by the element size.  A failed syscall transfers 0
elements and records `errno`.  Close is `close(2)`, verbatim, so a second close is whatever the OS says about a
stale descriptor.
*/
use std::os::raw::c_int;
use std::os::unix::io::{IntoRawFd, RawFd};
use crate::{span, OSError, Provider};

///Provider for [FdStream].
#[derive(Debug,Clone,Copy,Default)]
pub struct Fd;

#[derive(Debug)]
pub struct FdStream {
    fd: RawFd,
    error: Option<OSError>,
}

impl FdStream {
    ///Takes ownership of the descriptor.  It is released by [Fd]'s close, not on drop.
    pub fn new<T: IntoRawFd>(fd: T) -> FdStream {
        FdStream {
            fd: fd.into_raw_fd(),
            error: None
        }
    }
    pub fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
    pub fn take_error(&mut self) -> Option<OSError> {
        self.error.take()
    }
}

fn last_error() -> OSError {
    OSError(std::io::Error::last_os_error().raw_os_error().unwrap_or(0))
}

impl Provider for Fd {
    type Handle = FdStream;

    fn read(&self, handle: &mut FdStream, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        let len = span(buffer.len(), element_size, element_count);
        if len == 0 {
            return 0
        }
        let result = unsafe{ libc::read(handle.fd, buffer.as_mut_ptr().cast(), len) };
        if result < 0 {
            handle.error = Some(last_error());
            0
        }
        else {
            result as usize / element_size
        }
    }

    fn write(&self, handle: &mut FdStream, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        let len = span(buffer.len(), element_size, element_count);
        if len == 0 {
            return 0
        }
        let result = unsafe{ libc::write(handle.fd, buffer.as_ptr().cast(), len) };
        if result < 0 {
            handle.error = Some(last_error());
            0
        }
        else {
            result as usize / element_size
        }
    }

    fn close(&self, handle: &mut FdStream) -> c_int {
        let result = unsafe{ libc::close(handle.fd) };
        if result != 0 {
            handle.error = Some(last_error());
        }
        result
    }
}

#[cfg(test)]
mod test {
    use std::os::unix::io::RawFd;
    use std::sync::{Mutex, MutexGuard};
    use libc::pipe;

    //a closed fd number can be reused by another test's pipe, so fd tests take turns
    static FDS: Mutex<()> = Mutex::new(());
    pub fn fd_lock() -> MutexGuard<'static, ()> {
        FDS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
    pub fn test_pipe() -> (RawFd, RawFd) {
        let mut pipes = [0,0];
        let pipe_result = unsafe{ pipe(&mut pipes as *mut _)};
        assert_eq!(pipe_result,0);
        (pipes[0],pipes[1])
    }
}

//RawFd is itself IntoRawFd
#[test] fn pipe_round_trip() {
    let _fds = test::fd_lock();
    let (read_fd, write_fd) = test::test_pipe();
    let mut reader = FdStream::new(read_fd);
    let mut writer = FdStream::new(write_fd);
    assert_eq!(Fd.write(&mut writer, b"0123456789", 5, 2), 2);
    assert_eq!(Fd.close(&mut writer), 0);

    let mut buf = [0u8; 20];
    assert_eq!(Fd.read(&mut reader, &mut buf, 5, 4), 2);
    assert_eq!(&buf[..10], b"0123456789");
    //eof
    assert_eq!(Fd.read(&mut reader, &mut buf, 5, 4), 0);
    assert!(reader.take_error().is_none());
    assert_eq!(Fd.close(&mut reader), 0);
}

#[test] fn short_pipe_read() {
    let _fds = test::fd_lock();
    let (read_fd, write_fd) = test::test_pipe();
    let mut reader = FdStream::new(read_fd);
    let mut writer = FdStream::new(write_fd);
    assert_eq!(Fd.write(&mut writer, b"abcdefg", 1, 7), 7);
    let mut buf = [0u8; 8];
    //7 bytes available, 2-byte elements
    assert_eq!(Fd.read(&mut reader, &mut buf, 2, 4), 3);
    assert_eq!(Fd.close(&mut writer), 0);
    assert_eq!(Fd.close(&mut reader), 0);
}

#[test] fn write_to_read_end_fails() {
    let _fds = test::fd_lock();
    let (read_fd, write_fd) = test::test_pipe();
    let mut reader = FdStream::new(read_fd);
    assert_eq!(Fd.write(&mut reader, b"x", 1, 1), 0);
    assert_eq!(reader.take_error(), Some(OSError(libc::EBADF)));
    assert_eq!(Fd.close(&mut reader), 0);
    assert_eq!(Fd.close(&mut FdStream::new(write_fd)), 0);
}

#[test] fn second_close_reports_ebadf() {
    let _fds = test::fd_lock();
    let (read_fd, write_fd) = test::test_pipe();
    let mut writer = FdStream::new(write_fd);
    assert_eq!(writer.as_raw_fd(), write_fd);
    assert_eq!(Fd.close(&mut writer), 0);
    assert!(writer.take_error().is_none());
    assert_eq!(Fd.close(&mut writer), -1);
    assert_eq!(writer.take_error(), Some(OSError(libc::EBADF)));
    assert_eq!(Fd.close(&mut FdStream::new(read_fd)), 0);
}
