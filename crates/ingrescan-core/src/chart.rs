//! Horizontal bar chart of parameter scores, rendered as a static SVG.
//!
//! The domain is fixed at `[0, 5]`. Bars follow mapping order with the
//! first parameter drawn at the bottom. Colours cycle through [`PALETTE`]
//! when there are more parameters than colours.

use std::fmt;

use crate::scores::{MAX_SCORE, ScoreTable};

pub const PALETTE: &[&str] = &["#6c5ce7", "#a29bfe", "#74b9ff", "#55efc4", "#ffeaa7"];

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 170.0;
const MARGIN_RIGHT: f64 = 50.0;
const MARGIN_TOP: f64 = 60.0;
const MARGIN_BOTTOM: f64 = 55.0;
/// Fraction of each row occupied by its bar.
const BAR_FILL: f64 = 0.8;
/// Gap between a bar's end and its value label, in score units.
const LABEL_OFFSET: f64 = 0.1;

const BACKGROUND: &str = "#1e1e1e";
const SPINE: &str = "#6c5ce7";
const TEXT: &str = "white";

/// One bar of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub label: String,
    /// Exact score, shown as the value label.
    pub value: u8,
    pub color: &'static str,
}

impl Bar {
    /// Bar length as a fraction of the axis, clamped to the domain.
    pub fn fraction(&self) -> f64 {
        f64::from(self.value.min(MAX_SCORE)) / f64::from(MAX_SCORE)
    }
}

/// A fixed-domain horizontal bar chart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BarChart {
    bars: Vec<Bar>,
}

impl BarChart {
    pub const TITLE: &'static str = "Parameter Scores";
    pub const X_LABEL: &'static str = "Score (1-5)";

    /// Build a chart from a score table. An empty table gives an empty chart.
    pub fn from_scores(scores: &ScoreTable) -> Self {
        let bars = scores
            .iter()
            .zip(PALETTE.iter().cycle())
            .map(|((label, &value), &color)| Bar {
                label: label.clone(),
                value,
                color,
            })
            .collect();
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Render the chart as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plot_w = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        let x_of = |score: f64| MARGIN_LEFT + score / f64::from(MAX_SCORE) * plot_w;
        let axis_y = MARGIN_TOP + plot_h;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}" font-family="sans-serif">"#
        )?;
        writeln!(
            f,
            r#"  <rect width="{WIDTH}" height="{HEIGHT}" fill="{BACKGROUND}"/>"#
        )?;
        writeln!(
            f,
            r#"  <text x="{:.1}" y="{:.1}" fill="{TEXT}" font-size="16" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            MARGIN_TOP - 25.0,
            Self::TITLE
        )?;

        // ── Bars ──
        if !self.bars.is_empty() {
            let row_h = plot_h / self.bars.len() as f64;
            let bar_h = row_h * BAR_FILL;
            for (i, bar) in self.bars.iter().enumerate() {
                let row_top = axis_y - (i + 1) as f64 * row_h;
                let y = row_top + (row_h - bar_h) / 2.0;
                let centre = row_top + row_h / 2.0;
                let w = bar.fraction() * plot_w;
                writeln!(
                    f,
                    r#"  <rect class="bar" x="{MARGIN_LEFT:.1}" y="{y:.1}" width="{w:.1}" height="{bar_h:.1}" fill="{}"/>"#,
                    bar.color
                )?;
                writeln!(
                    f,
                    r#"  <text x="{:.1}" y="{centre:.1}" fill="{TEXT}" font-size="12" dominant-baseline="middle">{}</text>"#,
                    x_of(f64::from(bar.value.min(MAX_SCORE)) + LABEL_OFFSET),
                    bar.value
                )?;
                writeln!(
                    f,
                    r#"  <text x="{:.1}" y="{centre:.1}" fill="{TEXT}" font-size="12" text-anchor="end" dominant-baseline="middle">{}</text>"#,
                    MARGIN_LEFT - 8.0,
                    Escaped(&bar.label)
                )?;
            }
        }

        // ── Axes ──
        writeln!(
            f,
            r#"  <line x1="{MARGIN_LEFT}" y1="{MARGIN_TOP}" x2="{MARGIN_LEFT}" y2="{axis_y}" stroke="{SPINE}"/>"#
        )?;
        writeln!(
            f,
            r#"  <line x1="{MARGIN_LEFT}" y1="{axis_y}" x2="{}" y2="{axis_y}" stroke="{SPINE}"/>"#,
            MARGIN_LEFT + plot_w
        )?;
        for tick in 0..=MAX_SCORE {
            let x = x_of(f64::from(tick));
            writeln!(
                f,
                r#"  <text x="{x:.1}" y="{:.1}" fill="{TEXT}" font-size="11" text-anchor="middle">{tick}</text>"#,
                axis_y + 16.0
            )?;
        }
        writeln!(
            f,
            r#"  <text x="{:.1}" y="{:.1}" fill="{TEXT}" font-size="12" text-anchor="middle">{}</text>"#,
            MARGIN_LEFT + plot_w / 2.0,
            HEIGHT - 12.0,
            Self::X_LABEL
        )?;
        writeln!(f, "</svg>")
    }
}

/// Writes text with XML special characters escaped.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}
