// File: crates/chart-render-skia/tests/raster.rs
// Purpose: Headless raster smoke test; writes a PNG of a highlighted chart.
#![cfg(feature = "raster")]

use chart_core::{Chart, ChartOptions, Dataset, PointerEvent, Series};
use chart_render_skia::SkiaRenderer;
use chrono::{TimeZone, Utc};

fn chart() -> Chart {
    let d = |n| Utc.with_ymd_and_hms(2020, 3, n, 0, 0, 0).unwrap();
    let ds = Dataset::new(vec![
        Series::from_points("Italy", vec![(d(1), 29.0), (d(8), 366.0), (d(15), 1_809.0)]),
        Series::from_points("Spain", vec![(d(1), 0.0), (d(8), 17.0), (d(15), 288.0)]),
    ]);
    let mut chart = Chart::new(ds, ChartOptions { voronoi_overlay: true, ..ChartOptions::default() }).unwrap();
    chart.handle_event(PointerEvent::Move { x: 520.0, y: 200.0 });
    chart
}

#[test]
fn renders_png_bytes() {
    let tree = chart().render();
    let png = SkiaRenderer::default().render_png(&tree).expect("render");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]));
}

#[test]
fn writes_png_file() {
    let out = std::path::PathBuf::from("target/out/raster_smoke.png");
    if out.exists() {
        let _ = std::fs::remove_file(&out);
    }
    SkiaRenderer::default().render_to_png(&chart().render(), &out).expect("render to png");
    let meta = std::fs::metadata(&out).expect("png exists");
    assert!(meta.len() > 0, "png should not be empty");
}
