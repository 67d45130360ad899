use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rwshim::io::stream::{Memory, MemoryStream, Provider, StreamForwarder};

fn criterion_benchmark(c: &mut Criterion) {
    let data = vec![7u8; 4096];
    let mut buf = [0u8; 4096];
    c.bench_function("memory read direct", |b| b.iter(|| {
        let mut stream = MemoryStream::read_only(data.clone());
        black_box(Memory.read(&mut stream, &mut buf, 16, 256))
    }));
    let forwarder = StreamForwarder::new(Memory);
    c.bench_function("memory read forwarded", |b| b.iter(|| {
        let mut stream = MemoryStream::read_only(data.clone());
        black_box(forwarder.read(&mut stream, &mut buf, 16, 256))
    }));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
