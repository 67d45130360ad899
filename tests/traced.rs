#![cfg(feature="trace")]
use rwshim::io::stream::{Memory, MemoryStream, StreamForwarder, Traced};

#[test]
fn trace_feature_reaches_the_stream_crate() {
    let forwarder = StreamForwarder::new(Traced::new(Memory));
    let mut stream = MemoryStream::new(vec![1,2,3,4]);
    let mut buf = [0u8; 4];
    assert_eq!(forwarder.read(&mut stream, &mut buf, 2, 2), 2);
    assert_eq!(buf, [1,2,3,4]);
    assert_eq!(forwarder.close(&mut stream), 0);
}
