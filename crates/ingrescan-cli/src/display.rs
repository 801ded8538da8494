//! Terminal card display for analysis reports.
//!
//! Renders an [`AnalysisReport`] as grouped sections. Sections with no
//! data are skipped, so an unparseable report shows only the full text.

use std::fmt::Write;

use ingrescan_core::rating::{DISPLAY_STARS, render_stars};
use ingrescan_core::scores::MAX_SCORE;
use ingrescan_core::{AnalysisReport, RiskTier};

const BAR_WIDTH: usize = 20;
const MAX_LABEL: usize = 24;

// ── Public API ──

/// Print a report as a vertical card followed by the full report text.
pub fn print_report(report: &AnalysisReport) {
    print!("{}", render_report(report));
}

pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    out.push_str("=== Analysis Results ===\n\n");

    if let Some(label) = &report.product_label {
        section(&mut out, "Product Identification");
        let _ = writeln!(out, "  {:<26} {}", "Detected", label);
        out.push('\n');
    }

    if report.rating_glyph_count > 0 {
        section(&mut out, "Overall Rating");
        let _ = writeln!(
            out,
            "  {} ({}/{})",
            render_stars(report.rating_glyph_count),
            report.rating_glyph_count.min(DISPLAY_STARS),
            DISPLAY_STARS
        );
        out.push('\n');
    }

    if !report.parameter_scores.is_empty() {
        section(&mut out, "Ingredient Analysis");
        for (name, &score) in &report.parameter_scores {
            let _ = writeln!(
                out,
                "  {:<26} {}  {}/{}",
                truncate(name),
                score_bar(score),
                score,
                MAX_SCORE
            );
        }
        out.push('\n');
    }

    if !report.risks.is_empty() {
        section(&mut out, "Safety Assessment");
        for tier in RiskTier::ALL {
            let items = report.risks.get(tier);
            if items.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {:<26} {}", tier_heading(tier), items.join(", "));
        }
        out.push('\n');
    }

    if !report.recommendations.is_empty() {
        section(&mut out, "Recommendations");
        for item in &report.recommendations {
            let _ = writeln!(out, "  - {item}");
        }
        out.push('\n');
    }

    section(&mut out, "Full Analysis Report");
    out.push_str(report.raw_text.trim_end());
    out.push('\n');
    out
}

// ── Helpers ──

fn section(out: &mut String, header: &str) {
    out.push_str(header);
    out.push('\n');
}

fn tier_heading(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::High => "High-Risk Ingredients",
        RiskTier::Moderate => "Moderate Risk Ingredients",
        RiskTier::Low => "Safe Ingredients",
    }
}

/// Fixed-width progress bar for a score on the 0–5 scale.
fn score_bar(score: u8) -> String {
    let filled = usize::from(score.min(MAX_SCORE)) * BAR_WIDTH / usize::from(MAX_SCORE);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn truncate(name: &str) -> String {
    if name.chars().count() > MAX_LABEL {
        let short: String = name.chars().take(MAX_LABEL - 3).collect();
        format!("{short}...")
    } else {
        name.to_string()
    }
}
