use colorcard_calib::{apply_matrix, average_colors};
use colorcard_core::{CalibrationMatrix, Region, RgbImage};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn synthetic_image(width: usize, height: usize) -> RgbImage {
    let n = width * height;
    let plane = |k: usize| (0..n).map(|i| ((i * k) % 256) as f64).collect::<Vec<f64>>();
    RgbImage::from_planes(width, height, [plane(3), plane(5), plane(7)]).expect("image")
}

fn bench_apply(c: &mut Criterion) {
    let img = synthetic_image(1920, 1080);
    let ccm = CalibrationMatrix::from_array([
        [1.12, 0.04, -0.03],
        [0.02, 0.95, 0.05],
        [-0.01, 0.07, 1.08],
    ]);
    c.bench_function("apply_matrix_1080p", |b| {
        b.iter(|| apply_matrix(black_box(&img.view()), black_box(&ccm)))
    });
}

fn bench_sample(c: &mut Criterion) {
    let img = synthetic_image(3000, 2000);
    let regions: Vec<Region> = (0..24)
        .map(|i| {
            let (row, col) = ((i / 6) as f64, (i % 6) as f64);
            Region::from_bounds(
                100.0 + col * 450.0,
                160.0 + col * 450.0,
                100.0 + row * 450.0,
                160.0 + row * 450.0,
            )
        })
        .collect();
    c.bench_function("average_colors_24", |b| {
        b.iter(|| average_colors(black_box(&img.view()), black_box(&regions)))
    });
}

criterion_group!(benches, bench_apply, bench_sample);
criterion_main!(benches);
