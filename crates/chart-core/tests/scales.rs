// File: crates/chart-core/tests/scales.rs
// Purpose: Scale domains, degenerate inputs and error propagation.

use chart_core::{
    build_scales, ChartError, ContinuousScale, Dataset, Extent, Insets, LineGenerator, LogScale, Series,
};
use chrono::{DateTime, TimeZone, Utc};

fn day(d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 3, d, 0, 0, 0).unwrap()
}

fn sample_dataset() -> Dataset {
    Dataset::new(vec![
        Series::from_points("Italy", vec![(day(3), 0.0), (day(5), 29.0), (day(9), 463.0)]),
        Series::from_points("Spain", vec![(day(2), 1.0), (day(7), 36.0), (day(12), 2_311.0)]),
        Series::from_points("Empty", Vec::new()),
    ])
}

#[test]
fn domains_match_data_extremes() {
    let scales = build_scales(&sample_dataset(), Extent::new(960, 500), &Insets::default()).expect("scales");
    assert_eq!(scales.x.domain(), (day(2), day(12)));
    assert_eq!(scales.y.domain(), (1.0, 2_311.0));
    assert_eq!(scales.inner_width, 830.0);
    assert_eq!(scales.inner_height, 390.0);
    assert_eq!(scales.x.range(), (0.0, 830.0));
    assert_eq!(scales.y.range(), (390.0, 0.0));
}

#[test]
fn vertical_lower_bound_is_always_one() {
    for values in [vec![0.0], vec![0.5, 0.25], vec![3.0, 10_000.0], vec![1.0]] {
        let series = Series::from_points("A", values.iter().enumerate().map(|(i, &v)| (day(1 + i as u32), v)));
        let scales = build_scales(&Dataset::new(vec![series]), Extent::default(), &Insets::default()).unwrap();
        assert_eq!(scales.y.domain().0, 1.0, "values {values:?}");
    }
}

#[test]
fn empty_dataset_is_an_error() {
    let err = build_scales(&Dataset::new(Vec::new()), Extent::default(), &Insets::default()).unwrap_err();
    assert_eq!(err, ChartError::EmptyDataset);

    let only_empty = Dataset::new(vec![Series::new("A"), Series::new("B")]);
    let err = build_scales(&only_empty, Extent::default(), &Insets::default()).unwrap_err();
    assert_eq!(err, ChartError::EmptyDataset);
}

#[test]
fn margins_larger_than_extent_fail_closed() {
    let err = build_scales(&sample_dataset(), Extent::new(120, 500), &Insets::default()).unwrap_err();
    assert!(matches!(err, ChartError::InvalidExtent { .. }), "{err}");
}

#[test]
fn zero_value_sits_on_the_floor() {
    let ds = Dataset::new(vec![Series::from_points("A", vec![(day(1), 0.0)])]);
    let scales = build_scales(&ds, Extent::default(), &Insets::default()).expect("single zero sample is fine");
    let line = LineGenerator::new(&scales);
    let p = line.project(&ds.series()[0].samples[0]);
    assert_eq!(p.x, 0.0);
    assert_eq!(p.y, scales.inner_height);
}

#[test]
fn projection_offsets_values_by_one() {
    let ds = sample_dataset();
    let scales = build_scales(&ds, Extent::default(), &Insets::default()).unwrap();
    let line = LineGenerator::new(&scales);
    for series in ds.series() {
        for s in &series.samples {
            assert_eq!(line.y(s), scales.y.map(1.0 + s.value));
            assert_eq!(line.x(s), scales.x.map(s.date));
        }
    }
    // Zero lands exactly on the floor of a non-degenerate scale too.
    let italy_start = &ds.series()[0].samples[0];
    assert!((line.y(italy_start) - scales.inner_height).abs() < 1e-9);
}

#[test]
fn log_scale_maps_and_inverts() {
    let s = LogScale::new(1.0, 1_000.0, 300.0, 0.0);
    assert!((s.map(1.0) - 300.0).abs() < 1e-9);
    assert!((s.map(10.0) - 200.0).abs() < 1e-9);
    assert!((s.map(1_000.0) - 0.0).abs() < 1e-9);
    assert!((s.invert(100.0) - 100.0).abs() < 1e-6);
}

#[test]
fn log_ticks_fall_back_to_decades() {
    let s = LogScale::new(1.0, 1_000_000.0, 400.0, 0.0);
    let dense = s.ticks(100);
    assert_eq!(dense.first(), Some(&1.0));
    assert!(dense.contains(&5_000.0));
    let sparse = s.ticks(12);
    assert_eq!(sparse, vec![1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0, 1_000_000.0]);
}

#[test]
fn time_scale_inverts_to_the_same_instant() {
    let scales = build_scales(&sample_dataset(), Extent::default(), &Insets::default()).unwrap();
    let px = scales.x.map(day(7));
    assert_eq!(scales.x.invert(px), day(7));
    let ticks = scales.x.ticks(5);
    assert_eq!(ticks.first(), Some(&day(2)));
    assert_eq!(ticks.last(), Some(&day(12)));
}

#[test]
fn vertical_domain_tops_out_at_the_largest_value() {
    let ds = Dataset::new(vec![
        Series::from_points("A", vec![(day(1), 10.0), (day(2), 100.0)]),
        Series::from_points("B", vec![(day(1), 5.0), (day(2), 50.0)]),
    ]);
    let scales = build_scales(&ds, Extent::default(), &Insets::default()).unwrap();
    assert_eq!(scales.y.domain(), (1.0, 100.0));

    // With the +1 offset the largest sample lands just above the top edge.
    let top = LineGenerator::new(&scales).y(&ds.series()[0].samples[1]);
    assert!(top < 0.0 && top > -1.0, "top sample at {top}");
}
