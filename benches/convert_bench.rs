use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geocoords::config::{GeographicConfig, LocalCartesianConfig};
use geocoords::converter::Converter;
use geocoords::coordsys::{GeographicCS, LocalCartesianCS};

fn nad27() -> GeographicCS {
    let mut cs = GeographicCS::new(
        GeographicConfig::new("clrk66", "NAD27", "mean sea level").with_geoid_height(0.0),
    );
    cs.initialize().unwrap();
    cs
}

fn local_nad27() -> LocalCartesianCS {
    let geo = GeographicConfig::new("clrk66", "NAD27", "mean sea level").with_geoid_height(0.0);
    let mut cs = LocalCartesianCS::new(LocalCartesianConfig::new(geo, -100.0, 39.0, 0.01));
    cs.initialize().unwrap();
    cs
}

fn wgs84() -> GeographicCS {
    let mut cs = GeographicCS::default();
    cs.initialize().unwrap();
    cs
}

fn make_points(n: usize) -> Vec<[f64; 3]> {
    (0..n)
        .map(|i| {
            let t = i as f64 / n as f64;
            [-120.0 + 20.0 * t, 32.0 + 12.0 * t, 3000.0 * t]
        })
        .collect()
}

fn bench_geo_to_local(c: &mut Criterion) {
    let src = nad27();
    let dest = local_nad27();
    let conv = Converter::new(&dest, &src).unwrap();

    for &n in &[1_000usize, 100_000, 1_000_000] {
        let points = make_points(n);
        c.bench_function(&format!("geo_to_local_{n}"), |b| {
            b.iter(|| black_box(conv.convert(&points).unwrap()));
        });
    }
}

fn bench_local_to_geo(c: &mut Criterion) {
    let src = nad27();
    let dest = local_nad27();
    let points = Converter::new(&dest, &src)
        .unwrap()
        .convert(&make_points(100_000))
        .unwrap();
    let conv = Converter::new(&src, &dest).unwrap();

    c.bench_function("local_to_geo_100000", |b| {
        b.iter(|| black_box(conv.convert(&points).unwrap()));
    });
}

fn bench_datum_shift(c: &mut Criterion) {
    let src = nad27();
    let dest = wgs84();
    let conv = Converter::new(&dest, &src).unwrap();
    let points = make_points(100_000);

    c.bench_function("nad27_to_wgs84_100000", |b| {
        b.iter(|| black_box(conv.convert(&points).unwrap()));
    });
}

fn bench_thread_scaling(c: &mut Criterion) {
    let src = nad27();
    let dest = local_nad27();
    let conv = Converter::new(&dest, &src).unwrap();
    let points = make_points(1_000_000);

    for &threads in &[1, 2, 4, 8] {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .unwrap();

        c.bench_function(&format!("convert_par_threads_{threads}_1000000"), |b| {
            b.iter(|| black_box(pool.install(|| conv.convert_par(&points).unwrap())));
        });
    }
}

criterion_group!(
    benches,
    bench_geo_to_local,
    bench_local_to_geo,
    bench_datum_shift,
    bench_thread_scaling,
);
criterion_main!(benches);
