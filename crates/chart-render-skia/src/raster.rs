// File: crates/chart-render-skia/src/raster.rs
// Summary: Headless PNG rasterization of a RenderTree using Skia CPU raster surfaces.

use std::path::Path;

use anyhow::{Context, Result};
use chart_core::render::{CurveNode, CurveStyle, HighlightNode};
use chart_core::{Point, RenderTree};
use skia_safe as skia;
use tracing::debug;

use crate::style::{RasterStyle, Rgba};

fn color(c: Rgba) -> skia::Color {
    skia::Color::new(c.to_argb_u32())
}

fn stroke(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color(c));
    paint
}

fn fill(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(color(c));
    paint
}

fn polyline(points: &[Point], closed: bool) -> Option<skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut path = skia::Path::new();
    path.move_to((first.x as f32, first.y as f32));
    for p in rest {
        path.line_to((p.x as f32, p.y as f32));
    }
    if closed {
        path.close();
    }
    Some(path)
}

pub struct SkiaRenderer {
    pub style: RasterStyle,
}

impl Default for SkiaRenderer {
    fn default() -> Self {
        Self::new(RasterStyle::default())
    }
}

impl SkiaRenderer {
    pub fn new(style: RasterStyle) -> Self {
        Self { style }
    }

    /// Rasterize `tree` and return the encoded PNG.
    pub fn render_png(&self, tree: &RenderTree) -> Result<Vec<u8>> {
        let mut surface = skia::surfaces::raster_n32_premul((tree.width as i32, tree.height as i32))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", tree.width, tree.height))?;
        let canvas = surface.canvas();
        canvas.clear(color(self.style.background));

        // Tree geometry is relative to the plot's top-left corner.
        canvas.save();
        canvas.translate((tree.margin.left as f32, tree.margin.top as f32));

        let mut font = skia::Font::default();
        font.set_size(self.style.font_size);
        let text_paint = fill(self.style.text);

        let line_paint = stroke(self.style.marker_line, 1.0);
        for m in &tree.marker_lines {
            let y = m.y as f32;
            canvas.draw_line((m.x1 as f32, y), (m.x2 as f32, y), &line_paint);
            let (w, _) = font.measure_str(&m.label, Some(&text_paint));
            canvas.draw_str(&m.label, (m.x1 as f32 - 5.0 - w, y + self.style.font_size * 0.35), &font, &text_paint);
        }

        for c in &tree.curves {
            self.draw_curve(canvas, c);
        }

        if let Some(h) = &tree.highlight {
            self.draw_highlight(canvas, h, &font);
        }

        let cell_paint = stroke(self.style.cell, 0.5);
        for cell in &tree.cells {
            if let Some(path) = polyline(&cell.polygon, true) {
                canvas.draw_path(&path, &cell_paint);
            }
        }
        canvas.restore();

        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        debug!(width = tree.width, height = tree.height, bytes = data.len(), "rasterized chart");
        Ok(data.as_bytes().to_vec())
    }

    /// Rasterize `tree` to a PNG file, creating parent directories as needed.
    pub fn render_to_png(&self, tree: &RenderTree, output_png_path: impl AsRef<Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png(tree)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    fn draw_curve(&self, canvas: &skia::Canvas, c: &CurveNode) {
        let paint = match c.style {
            CurveStyle::Normal => stroke(self.style.curve, self.style.curve_width),
            CurveStyle::Emphasized => stroke(self.style.active, self.style.active_width),
        };
        if let Some(path) = polyline(&c.points, false) {
            canvas.draw_path(&path, &paint);
        }
    }

    fn draw_highlight(&self, canvas: &skia::Canvas, h: &HighlightNode, font: &skia::Font) {
        self.draw_curve(canvas, &h.curve);

        let center = (h.marker.center.x as f32, h.marker.center.y as f32);
        canvas.draw_circle(center, h.marker.radius as f32, &fill(self.style.marker));

        // Right-aligned, 10px above and left of the anchor; halo first.
        let text_paint = fill(self.style.text);
        let (w, _) = font.measure_str(&h.tooltip.text, Some(&text_paint));
        let origin = (h.tooltip.anchor.x as f32 - 10.0 - w, h.tooltip.anchor.y as f32 - 10.0);
        canvas.draw_str(&h.tooltip.text, origin, font, &stroke(self.style.halo, self.style.halo_width));
        canvas.draw_str(&h.tooltip.text, origin, font, &text_paint);
    }
}
