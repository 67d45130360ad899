/*! A fixed-size stream over memory.

Transfers are whole elements only.  When fewer bytes remain than were asked for, the count is cut down to the
elements that fit, and any trailing partial element stays where it is for the next call.  The region never
grows: writing past the end is a short write.
*/
use std::os::raw::c_int;
use crate::{span, Provider};

///Provider for [MemoryStream].
#[derive(Debug,Clone,Copy,Default)]
pub struct Memory;

#[derive(Debug)]
pub struct MemoryStream {
    data: Vec<u8>,
    position: usize,
    writable: bool,
    closed: bool,
}

impl MemoryStream {
    ///A readable and writable stream over `data`, positioned at the start.
    pub fn new(data: Vec<u8>) -> Self {
        MemoryStream {
            data,
            position: 0,
            writable: true,
            closed: false
        }
    }
    ///A stream that refuses writes.
    pub fn read_only(data: Vec<u8>) -> Self {
        MemoryStream {
            writable: false,
            ..MemoryStream::new(data)
        }
    }
    pub fn position(&self) -> usize {
        self.position
    }
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
    pub fn is_closed(&self) -> bool {
        self.closed
    }
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }
    ///Number of whole elements that fit in what is left, capped at `element_count`.
    fn fit(&self, element_size: usize, element_count: usize) -> usize {
        if element_size == 0 {
            0
        }
        else {
            element_count.min(self.remaining() / element_size)
        }
    }
}

impl Provider for Memory {
    type Handle = MemoryStream;

    fn read(&self, handle: &mut MemoryStream, buffer: &mut [u8], element_size: usize, element_count: usize) -> usize {
        span(buffer.len(), element_size, element_count);
        if handle.closed {
            return 0
        }
        let elements = handle.fit(element_size, element_count);
        let bytes = elements * element_size;
        let start = handle.position;
        buffer[..bytes].copy_from_slice(&handle.data[start..start + bytes]);
        handle.position += bytes;
        elements
    }

    fn write(&self, handle: &mut MemoryStream, buffer: &[u8], element_size: usize, element_count: usize) -> usize {
        span(buffer.len(), element_size, element_count);
        if handle.closed || !handle.writable {
            return 0
        }
        let elements = handle.fit(element_size, element_count);
        let bytes = elements * element_size;
        let start = handle.position;
        handle.data[start..start + bytes].copy_from_slice(&buffer[..bytes]);
        handle.position += bytes;
        elements
    }

    ///0 the first time, -1 after that.
    fn close(&self, handle: &mut MemoryStream) -> c_int {
        if handle.closed {
            -1
        }
        else {
            handle.closed = true;
            0
        }
    }
}

#[test] fn short_read_keeps_partial_element() {
    let data: Vec<u8> = (0..100).collect();
    let mut stream = MemoryStream::new(data);
    let mut skip = [0u8; 55];
    assert_eq!(Memory.read(&mut stream, &mut skip, 55, 1), 1);

    let mut buf = [0u8; 100];
    assert_eq!(Memory.read(&mut stream, &mut buf, 10, 10), 4);
    assert_eq!(buf[0], 55);
    assert_eq!(buf[39], 94);
    assert_eq!(stream.position(), 95);
    assert_eq!(stream.remaining(), 5);

    //the 5 leftover bytes are still readable as bytes
    assert_eq!(Memory.read(&mut stream, &mut buf, 1, 10), 5);
    assert_eq!(&buf[..5], &[95,96,97,98,99]);
    assert_eq!(Memory.read(&mut stream, &mut buf, 1, 10), 0);
}

#[test] fn short_write_stops_at_end() {
    let mut stream = MemoryStream::new(vec![0; 10]);
    assert_eq!(Memory.write(&mut stream, b"zzzzzz", 6, 1), 1);
    assert_eq!(Memory.write(&mut stream, b"aabbccddee", 2, 5), 2);
    assert_eq!(stream.as_slice(), b"zzzzzzaabb");
    assert_eq!(Memory.write(&mut stream, b"x", 1, 1), 0);
}

#[test] fn read_only_refuses_writes() {
    let mut stream = MemoryStream::read_only(vec![1,2,3]);
    assert_eq!(Memory.write(&mut stream, b"abc", 1, 3), 0);
    assert_eq!(stream.as_slice(), &[1,2,3]);
    let mut buf = [0u8; 3];
    assert_eq!(Memory.read(&mut stream, &mut buf, 3, 1), 1);
}

#[test] fn zero_sizes() {
    let mut stream = MemoryStream::new(vec![1,2,3]);
    let mut buf = [0u8; 3];
    assert_eq!(Memory.read(&mut stream, &mut buf, 0, 3), 0);
    assert_eq!(Memory.read(&mut stream, &mut buf, 3, 0), 0);
    assert_eq!(stream.position(), 0);
}

#[test] fn close_twice() {
    let mut stream = MemoryStream::new(vec![1,2,3]);
    assert_eq!(Memory.close(&mut stream), 0);
    assert!(stream.is_closed());
    assert_eq!(Memory.close(&mut stream), -1);
    let mut buf = [0u8; 3];
    assert_eq!(Memory.read(&mut stream, &mut buf, 1, 3), 0);
    assert_eq!(stream.into_inner(), vec![1,2,3]);
}

#[test] #[should_panic] fn span_larger_than_buffer() {
    let mut stream = MemoryStream::new(vec![0; 100]);
    let mut buf = [0u8; 10];
    Memory.read(&mut stream, &mut buf, 10, 2);
}
