use criterion::{black_box, criterion_group, criterion_main, Criterion, BenchmarkId};
use frame_kernels_rs::frame_pipeline::{
    Endianness, FrameGeometry, FrameKernel, LevelParams, LevelTransform, PackedUnpacker, SourceLayout,
};

fn generate_mock_frame(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn benchmark_levels_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("levels_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (640, 512, "640x512"),
        (1920, 1080, "1920x1080"),
    ];

    for (width, height, label) in sizes {
        let geometry = FrameGeometry::for_levels(width, height, Endianness::Little, false);
        let mut levels = LevelTransform::with_params(LevelParams::builder().low_in(0.1).high_in(0.8).build());
        levels.set_format(geometry).unwrap();
        let input = generate_mock_frame(geometry.input_len());
        let mut output = vec![0u8; geometry.output_len()];

        group.bench_with_input(BenchmarkId::from_parameter(label), &input, |b, data| {
            b.iter(|| levels.transform(black_box(data), &mut output).unwrap());
        });
    }

    group.finish();
}

fn benchmark_levels_byte_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("levels_byte_order");

    for (endianness, signed, label) in [
        (Endianness::NATIVE, false, "native_unsigned"),
        (Endianness::NATIVE.opposite(), false, "swapped_unsigned"),
        (Endianness::NATIVE, true, "native_signed"),
    ] {
        let geometry = FrameGeometry::for_levels(640, 512, endianness, signed);
        let mut levels = LevelTransform::new();
        levels.set_format(geometry).unwrap();
        let input = generate_mock_frame(geometry.input_len());
        let mut output = vec![0u8; geometry.output_len()];

        group.bench_function(label, |b| {
            b.iter(|| levels.transform(black_box(&input), &mut output).unwrap());
        });
    }

    group.finish();
}

fn benchmark_unpack_layouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpack_layouts");

    for layout in [SourceLayout::TenBitPacked, SourceLayout::InterleavedByte] {
        let geometry = layout.geometry(1920, 1080);
        let mut unpacker = PackedUnpacker::new();
        unpacker.set_format(layout, geometry).unwrap();
        let input = generate_mock_frame(geometry.input_len());
        let mut output = vec![0u8; geometry.output_len()];

        group.bench_function(layout.tag(), |b| {
            b.iter(|| unpacker.transform(black_box(&input), &mut output).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_levels_sizes,
    benchmark_levels_byte_order,
    benchmark_unpack_layouts
);
criterion_main!(benches);
