use chart_core::{build_scales, ContinuousScale, Dataset, Extent, Insets, LineGenerator, Series};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn gen_dataset(n_series: usize, n_days: i64) -> Dataset {
    let t0 = Utc.with_ymd_and_hms(2020, 1, 22, 0, 0, 0).unwrap();
    let series = (0..n_series)
        .map(|i| {
            let points = (0..n_days)
                .map(|d| (t0 + Duration::days(d), ((d + 1) * (i as i64 + 1)) as f64 * 3.0))
                .collect::<Vec<_>>();
            Series::from_points(format!("entity-{i}"), points)
        })
        .collect();
    Dataset::new(series)
}

fn bench_scales(c: &mut Criterion) {
    let mut group = c.benchmark_group("scales");
    for &n_series in &[20usize, 200usize] {
        let ds = gen_dataset(n_series, 120);
        group.bench_with_input(BenchmarkId::new("build_scales", n_series), &ds, |b, ds| {
            b.iter(|| black_box(build_scales(ds, Extent::default(), &Insets::default()).unwrap()));
        });

        let scales = build_scales(&ds, Extent::default(), &Insets::default()).unwrap();
        let line = LineGenerator::new(&scales);
        group.bench_with_input(BenchmarkId::new("path_data", n_series), &ds, |b, ds| {
            b.iter_batched(
                || ds.series().to_vec(),
                |series| {
                    for s in &series {
                        let _ = black_box(line.path_data(s));
                    }
                },
                BatchSize::SmallInput,
            );
        });
        group.bench_function(BenchmarkId::new("log_ticks", n_series), |b| {
            b.iter(|| black_box(scales.y.ticks(12)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scales);
criterion_main!(benches);
