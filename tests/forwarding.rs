#![cfg(feature="io_stream")]
use std::io::Cursor;
use rwshim::io::stream::{Io, IoStream, Memory, MemoryStream, Provider, StreamForwarder};

fn hundred() -> MemoryStream {
    MemoryStream::new((0..100).collect())
}

#[test]
fn read_matches_provider() {
    let forwarder = StreamForwarder::new(Memory);
    let mut forwarded = hundred();
    let mut direct = hundred();
    let mut a = [0u8; 100];
    let mut b = [0u8; 100];
    for (size, count) in [(55,1),(10,10),(1,3),(0,4),(7,0),(1,10)] {
        let n = forwarder.read(&mut forwarded, &mut a, size, count);
        assert_eq!(n, Memory.read(&mut direct, &mut b, size, count));
        assert_eq!(forwarded.position(), direct.position());
    }
    assert_eq!(a, b);
}

#[test]
fn forty_five_bytes_left_is_four_elements() {
    let forwarder = StreamForwarder::new(Memory);
    let mut stream = hundred();
    let mut skip = [0u8; 55];
    assert_eq!(forwarder.read(&mut stream, &mut skip, 1, 55), 55);
    let mut buf = [0u8; 100];
    assert_eq!(forwarder.read(&mut stream, &mut buf, 10, 10), 4);
}

#[test]
fn disk_full_write_returns_two() {
    let forwarder = StreamForwarder::new(Memory);
    //room for two 3-byte elements
    let mut stream = MemoryStream::new(vec![0; 7]);
    assert_eq!(forwarder.write(&mut stream, b"aaabbbcccdddeee", 3, 5), 2);
    assert_eq!(stream.as_slice(), b"aaabbb\0");
    assert_eq!(stream.position(), 6);
}

#[test]
fn close_then_close_again() {
    let forwarder = StreamForwarder::new(Memory);
    let mut stream = hundred();
    assert_eq!(forwarder.close(&mut stream), 0);
    //the memory provider reports a second close as a failure, and so does the forwarder
    assert_eq!(forwarder.close(&mut stream), -1);
}

#[test]
fn io_flushed_close_is_zero() {
    let forwarder = StreamForwarder::new(Io::new());
    let mut stream = IoStream::new(Cursor::new(Vec::new()));
    assert_eq!(forwarder.write(&mut stream, b"abcdef", 3, 2), 2);
    assert_eq!(forwarder.close(&mut stream), 0);
    assert!(stream.into_inner().is_none());
}

#[test]
fn io_short_read() {
    let forwarder = StreamForwarder::new(Io::new());
    let mut stream = IoStream::new(Cursor::new((0..45u8).collect::<Vec<_>>()));
    let mut buf = [0u8; 100];
    assert_eq!(forwarder.read(&mut stream, &mut buf, 10, 10), 4);
    assert_eq!(forwarder.read(&mut stream, &mut buf, 10, 10), 0);
    assert!(stream.take_error().is_none());
}

#[cfg(unix)]
#[test]
fn fd_file_round_trip() {
    use rwshim::io::stream::{Fd, FdStream};
    let path = std::env::temp_dir().join(format!("rwshim_fd_file_round_trip_{}.txt", std::process::id()));
    let file = std::fs::File::create(&path).unwrap();
    let forwarder = StreamForwarder::new(Fd);
    let mut stream = FdStream::new(file);
    assert_eq!(forwarder.write(&mut stream, b"hello from the test", 1, 19), 19);
    assert_eq!(forwarder.close(&mut stream), 0);

    let read_file = std::fs::read(&path);
    assert_eq!(read_file.unwrap().as_slice(), "hello from the test".as_bytes());
    std::fs::remove_file(&path).unwrap();
}
