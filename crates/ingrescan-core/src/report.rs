//! The structured analysis handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::extract::Sections;
use crate::rating::count_stars;
use crate::risk::{RiskTier, RiskTiers, classify};
use crate::scores::{ScoreTable, parse_scores};

/// Structured result of parsing one raw inference report.
///
/// Every field defaults to empty, so a report with no recognisable
/// sections still produces a value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Free text naming the detected item.
    pub product_label: Option<String>,
    /// Star glyphs found in the rating span. Not clamped.
    pub rating_glyph_count: usize,
    pub parameter_scores: ScoreTable,
    #[serde(flatten)]
    pub risks: RiskTiers,
    pub recommendations: Vec<String>,
    /// The report text exactly as received.
    pub raw_text: String,
}

impl AnalysisReport {
    /// Run the full extraction chain over `raw`.
    ///
    /// A pure function of the text: the same input always yields an equal
    /// report.
    pub fn from_raw(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let sections = Sections::extract(&raw);

        let product_label = sections.detected.map(str::to_string);
        let rating_glyph_count = count_stars(sections.rating);
        let parameter_scores = sections.breakdown.map(parse_scores).unwrap_or_default();

        let mut risks = RiskTiers::default();
        for tier in RiskTier::ALL {
            *risks.get_mut(tier) = classify(sections.risk(tier));
        }

        let recommendations = sections
            .recommendations
            .iter()
            .map(|s| s.to_string())
            .collect();

        tracing::debug!(
            detected = product_label.is_some(),
            stars = rating_glyph_count,
            scores = parameter_scores.len(),
            "extracted analysis report"
        );

        assemble(
            product_label,
            rating_glyph_count,
            parameter_scores,
            risks,
            recommendations,
            raw,
        )
    }

    /// True when no section was recognised.
    pub fn is_blank(&self) -> bool {
        self.product_label.is_none()
            && self.rating_glyph_count == 0
            && self.parameter_scores.is_empty()
            && self.risks.is_empty()
            && self.recommendations.is_empty()
    }
}

/// Compose extracted parts into a report. Infallible.
pub fn assemble(
    product_label: Option<String>,
    rating_glyph_count: usize,
    parameter_scores: ScoreTable,
    risks: RiskTiers,
    recommendations: Vec<String>,
    raw_text: String,
) -> AnalysisReport {
    AnalysisReport {
        product_label,
        rating_glyph_count,
        parameter_scores,
        risks,
        recommendations,
        raw_text,
    }
}
