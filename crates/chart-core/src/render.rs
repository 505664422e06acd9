// File: crates/chart-core/src/render.rs
// Summary: Backend-agnostic render tree produced by the chart, plus an SVG serializer.

use std::fmt::Write as _;

use crate::geometry::Point;
use crate::path::fmt_coord;
use crate::series::SampleId;
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CurveStyle {
    Normal,
    /// The series owning the hovered sample, drawn again on top.
    Emphasized,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurveNode {
    pub series: usize,
    pub label: String,
    pub style: CurveStyle,
    pub points: Vec<Point>,
    /// SVG path data for `points`.
    pub path: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerNode {
    pub center: Point,
    pub radius: f64,
}

/// Tooltip text, right-aligned just above and left of `anchor`.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipNode {
    pub anchor: Point,
    pub text: String,
}

/// Everything drawn for the hovered sample.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightNode {
    pub sample: SampleId,
    pub curve: CurveNode,
    pub marker: MarkerNode,
    pub tooltip: TooltipNode,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MarkerLineNode {
    pub y: f64,
    pub x1: f64,
    pub x2: f64,
    pub label: String,
}

/// Voronoi cell outline, only emitted when the overlay is requested.
#[derive(Clone, Debug, PartialEq)]
pub struct CellNode {
    pub sample: SampleId,
    pub polygon: Vec<Point>,
}

/// All geometry is in inner plot coordinates; `margin` places the plot on the surface.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderTree {
    pub width: u32,
    pub height: u32,
    pub margin: Insets,
    pub marker_lines: Vec<MarkerLineNode>,
    pub curves: Vec<CurveNode>,
    pub highlight: Option<HighlightNode>,
    pub cells: Vec<CellNode>,
}

impl RenderTree {
    /// Serialize to a standalone SVG document. Presentation is left to CSS classes.
    pub fn to_svg(&self) -> String {
        let mut s = String::new();
        let _ = writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            self.width, self.height
        );
        let _ = writeln!(s, r#"<g transform="translate({},{})">"#, self.margin.left, self.margin.top);

        for m in &self.marker_lines {
            let y = fmt_coord(m.y);
            let _ = writeln!(
                s,
                r#"<line class="marker-line" x1="{}" y1="{y}" x2="{}" y2="{y}"/>"#,
                fmt_coord(m.x1),
                fmt_coord(m.x2)
            );
            let _ = writeln!(
                s,
                r#"<text text-anchor="end" alignment-baseline="middle" x="{}" y="{y}">{}</text>"#,
                fmt_coord(m.x1 - 5.0),
                escape(&m.label)
            );
        }

        for c in &self.curves {
            write_curve(&mut s, c);
        }

        if let Some(h) = &self.highlight {
            write_curve(&mut s, &h.curve);
            let _ = writeln!(
                s,
                r#"<g transform="translate({},{})">"#,
                fmt_coord(h.marker.center.x),
                fmt_coord(h.marker.center.y)
            );
            let _ = writeln!(s, r#"<circle r="{}"/>"#, fmt_coord(h.marker.radius));
            let text = escape(&h.tooltip.text);
            // Stroked copy underneath acts as a halo for the filled copy.
            for class in ["tooltip-stroke", "tooltip"] {
                let _ = writeln!(s, r#"<text class="{class}" x="-10" y="-10" text-anchor="end">{text}</text>"#);
            }
            let _ = writeln!(s, "</g>");
        }

        for cell in &self.cells {
            if cell.polygon.is_empty() {
                continue;
            }
            let mut d = String::new();
            for (i, p) in cell.polygon.iter().enumerate() {
                let _ = write!(d, "{}{},{}", if i == 0 { 'M' } else { 'L' }, fmt_coord(p.x), fmt_coord(p.y));
            }
            let _ = writeln!(s, r#"<path class="voronoi-cell" d="{d}Z"/>"#);
        }

        s.push_str("</g>\n</svg>\n");
        s
    }
}

fn write_curve(s: &mut String, c: &CurveNode) {
    let class = match c.style {
        CurveStyle::Normal => "marker-line",
        CurveStyle::Emphasized => "marker-line active",
    };
    let _ = writeln!(s, r#"<path class="{class}" data-label="{}" d="{}"/>"#, escape(&c.label), c.path);
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
