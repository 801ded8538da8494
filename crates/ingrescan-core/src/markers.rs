//! Marker tokens shared by the prompt template and the report extractor.
//!
//! The inference service is asked to emit these literals; the extractor
//! searches for them verbatim. Matching is case- and emoji-sensitive, so
//! `⭐️` is the two-codepoint sequence U+2B50 U+FE0F and `⚠️` is
//! U+26A0 U+FE0F.

/// Precedes the detected product label. The label runs to end of line.
pub const DETECTED: &str = "📸 Detected: ";

/// Opens the rating span; also the glyph counted by the rating decoder.
pub const STAR: &str = "⭐️";

/// Closes the rating span.
pub const OVERALL_RATING: &str = "Overall Rating";

/// Opens the parameter breakdown block.
pub const BREAKDOWN: &str = "🔍 Breakdown:";

/// Closes the breakdown block. This is the leading glyph of [`HIGH_RISK`].
pub const BREAKDOWN_END: &str = "🚨";

pub const HIGH_RISK: &str = "🚨 High-Risk:";
pub const MODERATE_RISK: &str = "⚠️ Moderate Risk:";
pub const LOW_RISK: &str = "✅ Low Risk:";

/// Heads the bullet list of recommendations.
pub const RECOMMENDATIONS: &str = "💡 Recommendations:";

/// Every marker the extractor depends on, for template checks.
pub const ALL: &[&str] = &[
    DETECTED,
    STAR,
    OVERALL_RATING,
    BREAKDOWN,
    BREAKDOWN_END,
    HIGH_RISK,
    MODERATE_RISK,
    LOW_RISK,
    RECOMMENDATIONS,
];
