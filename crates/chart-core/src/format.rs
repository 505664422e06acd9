// File: crates/chart-core/src/format.rs
// Summary: Number/date formatting for tooltips and axis tick labels.

use chrono::{DateTime, Utc};

use crate::series::Sample;

/// Tooltip wording. The unit follows the value, e.g. "1 death" vs "12 deaths".
/// Only exactly 1 is singular: zero and fractions read as plural ("0 deaths", "0.5 deaths").
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipFormat {
    pub unit_singular: String,
    pub unit_plural: String,
    /// `chrono` strftime pattern.
    pub date_format: String,
}

impl Default for TooltipFormat {
    fn default() -> Self {
        Self {
            unit_singular: "death".to_string(),
            unit_plural: "deaths".to_string(),
            date_format: "%B, %d, %Y".to_string(),
        }
    }
}

impl TooltipFormat {
    /// `"{label}: {value} {unit} as of {date}"`.
    pub fn text(&self, sample: &Sample) -> String {
        let unit = if sample.value == 1.0 { &self.unit_singular } else { &self.unit_plural };
        format!(
            "{}: {} {} as of {}",
            sample.label,
            format_comma(sample.value),
            unit,
            format_date(&sample.date, &self.date_format)
        )
    }
}

pub fn format_date(date: &DateTime<Utc>, pattern: &str) -> String {
    date.format(pattern).to_string()
}

/// Thousands-grouped number: `1234567` → `"1,234,567"`, `1234.5` → `"1,234.5"`.
pub fn format_comma(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let raw = format!("{}", value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut out = String::with_capacity(raw.len() + raw.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    let lead = int_part.len() % 3;
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// SI-prefixed tick label with trailing zeros trimmed: `1000` → `"1k"`, `2.5e6` → `"2.5M"`.
pub fn format_si(value: f64) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    const PREFIXES: [(f64, &str); 5] = [(1e12, "T"), (1e9, "G"), (1e6, "M"), (1e3, "k"), (1.0, "")];
    let abs = value.abs();
    let (scale, suffix) = PREFIXES
        .iter()
        .copied()
        .find(|&(s, _)| abs >= s)
        .unwrap_or((1.0, ""));
    format!("{}{}", trim_trailing_zeroes(format!("{:.2}", value / scale)), suffix)
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
