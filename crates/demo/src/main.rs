// File: crates/demo/src/main.rs
// Summary: Demo loads a date,entity,value CSV, sweeps a pointer across the chart and writes SVG/PNG.

use anyhow::{Context, Result};
use chart_core::{Chart, ChartOptions, Dataset, MarkerLine, PointerEvent, Series};
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_INPUT: &str = "data/cumulative_deaths.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Accept input/output paths from CLI or fall back to the bundled sample.
    let mut args = std::env::args().skip(1);
    let raw = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let path = resolve_path(&raw)?;
    info!(input = %path.display(), "using input file");

    let dataset = load_cumulative_csv(&path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
    info!(series = dataset.series().len(), samples = dataset.sample_count(), "loaded dataset");
    if dataset.is_empty() {
        anyhow::bail!("no samples loaded, check the date,entity,value header");
    }

    let options = ChartOptions {
        marker_lines: vec![MarkerLine::new(100.0, "100 deaths"), MarkerLine::new(1_000.0, "1,000 deaths")],
        ..ChartOptions::default()
    };
    let mut chart = Chart::new(dataset, options)?;
    chart.set_on_hover(|sample| match sample {
        Some(s) => info!(entity = %s.label, date = %s.date.date_naive(), value = s.value, "hover"),
        None => info!("hover cleared"),
    });

    // Sweep diagonally across the plot, then leave the surface.
    let margin = chart.options().margin;
    let (w, h) = (chart.scales().inner_width, chart.scales().inner_height);
    let steps = 24;
    let mut changes = 0;
    let mut last_highlight = None;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let event = PointerEvent::Move { x: margin.left as f64 + t * w, y: margin.top as f64 + (1.0 - t) * h };
        if chart.handle_event(event).is_some() {
            changes += 1;
        }
        if i == steps * 3 / 4 {
            last_highlight = Some(chart.render());
        }
    }
    if chart.handle_event(PointerEvent::Leave).is_some() {
        changes += 1;
    }
    info!(changes, "pointer replay finished");

    let tree = match last_highlight {
        Some(tree) if tree.highlight.is_some() => tree,
        _ => {
            warn!("sweep ended without a highlight; writing idle chart");
            chart.render()
        }
    };

    let out_svg = out_name_with(args.next().as_deref(), &path, "svg");
    std::fs::write(&out_svg, tree.to_svg()).with_context(|| format!("writing {}", out_svg.display()))?;
    info!(output = %out_svg.display(), "wrote svg");

    #[cfg(feature = "raster")]
    {
        let out_png = out_svg.with_extension("png");
        chart_render_skia::SkiaRenderer::default().render_to_png(&tree, &out_png)?;
        info!(output = %out_png.display(), "wrote png");
    }

    Ok(())
}

/// Resolve `raw` against the working directory, then against this crate's directory.
fn resolve_path(raw: &str) -> Result<PathBuf> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok(p.to_path_buf());
    }
    let alt = Path::new(env!("CARGO_MANIFEST_DIR")).join(raw);
    if alt.exists() {
        return Ok(alt);
    }
    anyhow::bail!("file not found: {}", p.display());
}

/// Explicit output path, or target/out/chart_<stem>.<ext>.
fn out_name_with(explicit: Option<&str>, input: &Path, ext: &str) -> PathBuf {
    if let Some(p) = explicit {
        let p = PathBuf::from(p);
        if let Some(parent) = p.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        return p;
    }
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    let mut out = PathBuf::from("target/out");
    std::fs::create_dir_all(&out).ok();
    out.push(format!("chart_{stem}.{ext}"));
    out
}

/// Load `date,entity,value` rows, grouped by entity (first-seen order) and sorted by date.
fn load_cumulative_csv(path: &Path) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let idx = |name: &str| headers.iter().position(|h| h == name);
    let (Some(i_date), Some(i_entity), Some(i_value)) = (idx("date"), idx("entity"), idx("value")) else {
        anyhow::bail!("expected date,entity,value columns, found {:?}", headers);
    };

    let mut series: Vec<Series> = Vec::new();
    let mut by_entity: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;
    for (line, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let field = |i: usize| rec.get(i).unwrap_or_default();
        let date = NaiveDate::parse_from_str(field(i_date), "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| Utc.from_utc_datetime(&dt));
        let value = field(i_value).parse::<f64>().ok().filter(|v| v.is_finite());
        let (Some(date), Some(value)) = (date, value) else {
            skipped += 1;
            warn!(row = line + 2, "skipping unparsable row");
            continue;
        };
        let entity = field(i_entity);
        let slot = *by_entity.entry(entity.to_string()).or_insert_with(|| {
            series.push(Series::new(entity));
            series.len() - 1
        });
        series[slot].push(date, value);
    }
    if skipped > 0 {
        warn!(skipped, "rows skipped");
    }

    for s in &mut series {
        s.samples.sort_by_key(|sample| sample.date);
    }
    Ok(Dataset::new(series))
}
