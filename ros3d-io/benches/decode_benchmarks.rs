//! Benchmarks for PointCloud2 decoding at camera resolutions
//!
//! Every incoming depth frame goes through the decoder, so these measure the
//! per-frame cost for each recognized record layout.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ros3d_core::{FrameBuffer, Point3f};
use ros3d_io::{FrameEncoder, PointCloud2, PointCloudDecoder};

/// Generate a synthetic organized frame of the given size and point step
fn generate_test_frame(width: u32, height: u32, point_step: u32) -> PointCloud2 {
    let count = (width * height) as usize;
    let points: Vec<Point3f> = (0..count)
        .map(|i| {
            let i = i as f32;
            Point3f::new((i * 0.1).sin(), (i * 0.1).cos(), i * 0.001)
        })
        .collect();
    let colors: Vec<[u8; 3]> = (0..count)
        .map(|i| [(i % 256) as u8, (i / 256 % 256) as u8, 128])
        .collect();

    FrameEncoder::new(point_step).encode(width, height, &points, Some(colors.as_slice()))
}

/// Benchmark decoding across record layouts
fn benchmark_point_steps(c: &mut Criterion) {
    let (width, height) = (640, 480);
    let mut group = c.benchmark_group("decode_point_step");
    group.throughput(Throughput::Elements((width * height) as u64));

    for point_step in [16, 32, 48] {
        let frame = generate_test_frame(width, height, point_step);
        let mut buffer = FrameBuffer::allocate(width as usize, height as usize);
        let mut decoder = PointCloudDecoder::new();

        group.bench_with_input(BenchmarkId::from_parameter(point_step), &frame, |b, frame| {
            b.iter(|| {
                decoder.decode(black_box(frame), &mut buffer).unwrap();
                black_box(buffer.take_dirty());
            })
        });
    }

    group.finish();
}

/// Benchmark decoding a small frame into a VGA buffer (freeze-forward fill)
fn benchmark_padding_fill(c: &mut Criterion) {
    let frame = generate_test_frame(320, 240, 32);
    let mut buffer = FrameBuffer::allocate(640, 480);
    let mut decoder = PointCloudDecoder::new();

    c.bench_function("decode_qvga_into_vga", |b| {
        b.iter(|| decoder.decode(black_box(&frame), &mut buffer).unwrap())
    });
}

criterion_group!(benches, benchmark_point_steps, benchmark_padding_fill);
criterion_main!(benches);
