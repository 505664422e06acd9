// File: crates/chart-core/tests/hover.rs
// Purpose: Nearest-sample resolution: projection agreement, bounds, ties, and Voronoi vs linear scan.

use chart_core::{
    build_scales, Dataset, Extent, HoverConfig, HoverResolver, Insets, LineGenerator, Point, SampleId, Series,
    Strategy,
};
use chrono::{DateTime, Duration, TimeZone, Utc};

fn day(n: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 22, 0, 0, 0).unwrap() + Duration::days(n)
}

/// Small xorshift so the tests stay deterministic without extra dependencies.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 7;
        self.0 ^= self.0 << 17;
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn resolver(ds: &Dataset, brute_force_below: usize) -> (HoverResolver, LineGenerator) {
    let scales = build_scales(ds, Extent::default(), &Insets::default()).expect("scales");
    let line = LineGenerator::new(&scales);
    let cfg = HoverConfig { brute_force_below };
    (HoverResolver::build(ds, &line, scales.inner_width, scales.inner_height, &cfg), line)
}

fn two_entities() -> Dataset {
    Dataset::new(vec![
        Series::from_points("A", vec![(day(1), 10.0), (day(2), 100.0)]),
        Series::from_points("B", vec![(day(1), 5.0), (day(2), 50.0)]),
    ])
}

/// Cumulative curves for `n_series` entities over `n_days` shared dates.
fn cumulative(n_series: usize, n_days: i64, seed: u64) -> Dataset {
    let mut rng = Rng(seed);
    let series = (0..n_series)
        .map(|i| {
            let mut total = 0.0;
            let points = (0..n_days)
                .map(|d| {
                    total += (rng.next_f64() * 40.0 * (d as f64 + 1.0)).floor();
                    (day(d), total)
                })
                .collect::<Vec<_>>();
            Series::from_points(format!("entity-{i}"), points)
        })
        .collect();
    Dataset::new(series)
}

#[test]
fn pointer_on_a_sample_resolves_to_it() {
    let ds = two_entities();
    for threshold in [0, usize::MAX] {
        let (r, line) = resolver(&ds, threshold);
        let a_day2 = line.project(&ds.series()[0].samples[1]);
        assert_eq!(r.find(a_day2), Some(SampleId::new(0, 1)), "threshold {threshold}");
        let b_day1 = line.project(&ds.series()[1].samples[0]);
        assert_eq!(r.find(b_day1), Some(SampleId::new(1, 0)), "threshold {threshold}");
    }
}

#[test]
fn strategy_follows_threshold() {
    let ds = two_entities();
    assert_eq!(resolver(&ds, 0).0.strategy(), Strategy::Voronoi);
    assert_eq!(resolver(&ds, 64).0.strategy(), Strategy::Linear);
}

#[test]
fn resolver_projection_matches_line_generator() {
    let ds = cumulative(6, 30, 7);
    let (r, line) = resolver(&ds, 0);
    for (id, sample) in ds.iter_samples() {
        assert_eq!(r.position(id), Some(line.project(sample)));
    }
    assert_eq!(r.position(SampleId::new(0, 30)), None);
    assert_eq!(r.position(SampleId::new(6, 0)), None);
}

#[test]
fn outside_the_plot_resolves_to_nothing() {
    let ds = two_entities();
    let (r, _) = resolver(&ds, 0);
    let plot = r.plot_rect();
    let hit = r.hit_rect();
    for p in [
        Point::new(-0.5, 10.0),
        Point::new(plot.right + 0.5, 10.0),
        Point::new(10.0, hit.top - 1.0),
        Point::new(10.0, plot.bottom + 1.0),
        Point::new(f64::NAN, 10.0),
    ] {
        assert_eq!(r.find(p), None, "{p:?}");
    }
    assert!(r.find(Point::new(plot.left, plot.top)).is_some());
    assert!(r.find(Point::new(plot.right, plot.bottom)).is_some());
}

#[test]
fn top_sample_above_the_plot_is_still_hoverable() {
    let ds = two_entities();
    for threshold in [0, usize::MAX] {
        let (r, line) = resolver(&ds, threshold);
        let top = line.project(&ds.series()[0].samples[1]);
        assert!(top.y < r.plot_rect().top, "largest value projects past the top edge");
        assert_eq!(r.hit_rect().top, top.y);
        assert_eq!(r.find(top), Some(SampleId::new(0, 1)), "threshold {threshold}");
        assert_eq!(r.find(Point::new(top.x, 0.0)), Some(SampleId::new(0, 1)));
    }
}

#[test]
fn inside_always_resolves_to_a_real_sample() {
    let ds = cumulative(12, 40, 11);
    let (r, _) = resolver(&ds, 0);
    let plot = r.plot_rect();
    let mut rng = Rng(99);
    for _ in 0..500 {
        let p = Point::new(rng.next_f64() * plot.width(), rng.next_f64() * plot.height());
        let id = r.find(p).expect("inside the plot");
        assert!(ds.sample(id).is_some());
    }
}

#[test]
fn voronoi_agrees_with_linear_scan() {
    let ds = cumulative(25, 60, 3);
    let (voronoi, _) = resolver(&ds, 0);
    let (linear, _) = resolver(&ds, usize::MAX);
    assert_eq!(voronoi.strategy(), Strategy::Voronoi);
    assert_eq!(linear.strategy(), Strategy::Linear);

    let plot = voronoi.plot_rect();
    let mut rng = Rng(1234);
    for _ in 0..2_000 {
        let p = Point::new(rng.next_f64() * plot.width(), rng.next_f64() * plot.height());
        let a = voronoi.find(p).expect("voronoi hit");
        let b = linear.find(p).expect("linear hit");
        let da = voronoi.position(a).unwrap().dist2(p);
        let db = linear.position(b).unwrap().dist2(p);
        assert!((da - db).abs() <= 1e-9 * db.max(1.0), "pointer {p:?}: {a:?} at {da} vs {b:?} at {db}");
    }
}

#[test]
fn voronoi_agrees_with_linear_scan_on_a_grid() {
    // Identical values across entities give exact grid alignment and many co-circular sites.
    let series = (0..8)
        .map(|i| {
            let points = (0..20).map(|d| (day(d), 10f64.powi(i % 4) * (d + 1) as f64)).collect::<Vec<_>>();
            Series::from_points(format!("grid-{i}"), points)
        })
        .collect();
    let ds = Dataset::new(series);
    let (voronoi, _) = resolver(&ds, 0);
    let (linear, _) = resolver(&ds, usize::MAX);

    let plot = voronoi.plot_rect();
    let mut rng = Rng(42);
    for _ in 0..1_000 {
        let p = Point::new(rng.next_f64() * plot.width(), rng.next_f64() * plot.height());
        let da = voronoi.position(voronoi.find(p).unwrap()).unwrap().dist2(p);
        let db = linear.position(linear.find(p).unwrap()).unwrap().dist2(p);
        assert!((da - db).abs() <= 1e-9 * db.max(1.0), "pointer {p:?}");
    }
}

#[test]
fn repeated_queries_are_stable() {
    let ds = cumulative(10, 30, 5);
    let (r, _) = resolver(&ds, 0);
    let mut rng = Rng(8);
    for _ in 0..200 {
        let p = Point::new(rng.next_f64() * 830.0, rng.next_f64() * 390.0);
        assert_eq!(r.find(p), r.find(p));
    }
}

#[test]
fn duplicate_points_resolve_to_the_first_series() {
    let pts = vec![(day(1), 10.0), (day(2), 20.0), (day(3), 40.0)];
    let ds = Dataset::new(vec![
        Series::from_points("first", pts.clone()),
        Series::from_points("second", pts),
    ]);
    for threshold in [0, usize::MAX] {
        let (r, line) = resolver(&ds, threshold);
        for (i, s) in ds.series()[1].samples.iter().enumerate() {
            assert_eq!(r.find(line.project(s)), Some(SampleId::new(0, i)));
        }
    }
}

#[test]
fn equidistant_pointer_picks_the_earlier_sample() {
    let ds = Dataset::new(vec![
        Series::from_points("A", vec![(day(0), 10.0), (day(4), 20.0)]),
        Series::from_points("B", vec![(day(0), 1_000.0), (day(4), 2_000.0)]),
    ]);
    for threshold in [0, usize::MAX] {
        let (r, line) = resolver(&ds, threshold);
        let a = line.project(&ds.series()[0].samples[0]);
        let b = line.project(&ds.series()[1].samples[0]);
        let mid = Point::new(a.x, (a.y + b.y) * 0.5);
        assert_eq!(r.find(mid), Some(SampleId::new(0, 0)), "threshold {threshold}");
    }
}

#[test]
fn empty_dataset_never_resolves() {
    let ds = Dataset::new(vec![Series::new("nothing")]);
    let line = LineGenerator::new(
        &build_scales(&two_entities(), Extent::default(), &Insets::default()).unwrap(),
    );
    let r = HoverResolver::build(&ds, &line, 830.0, 390.0, &HoverConfig::default());
    assert_eq!(r.strategy(), Strategy::Empty);
    assert_eq!(r.find(Point::new(10.0, 10.0)), None);
    assert!(r.cells().is_empty());
}

#[test]
fn voronoi_cells_cover_their_sites() {
    let ds = cumulative(5, 15, 21);
    let (r, line) = resolver(&ds, 0);
    let cells = r.cells();
    assert!(!cells.is_empty());
    let plot = r.plot_rect();
    for (id, polygon) in cells {
        let site = line.project(ds.sample(id).unwrap());
        if !plot.contains(site) {
            continue;
        }
        assert!(polygon.len() >= 3, "{id:?}");
        assert!(polygon.iter().all(|p| p.x >= plot.left - 1e-6 && p.x <= plot.right + 1e-6));
        // Any vertex of the cell is at least as close to the site as to other samples.
        for v in &polygon {
            let q = Point::new(v.x.clamp(plot.left, plot.right), v.y.clamp(plot.top, plot.bottom));
            let owner = r.position(r.find(q).unwrap()).unwrap();
            assert!(site.dist2(q) <= owner.dist2(q) + 1e-6, "{id:?} vertex {v:?}");
        }
    }
}
