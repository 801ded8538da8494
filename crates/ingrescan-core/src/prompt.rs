//! Prompt templates for the product analysis request.
//!
//! The output format section is rendered from [`crate::markers`], so the
//! template and the extractor always agree on marker tokens.

use crate::markers;

pub const SYSTEM_PROMPT: &str = "\
You are a food and consumer-product analyst. You read ingredient lists and \
nutrition labels from product photos and assess them for an ordinary shopper. \
Be concise and concrete. Never invent ingredients you cannot see; say so when \
the label is unreadable.";

/// Task instruction sent alongside the image.
pub fn analysis_instructions() -> String {
    format!(
        "\
Analyze the product in the image.

Respond in Markdown using exactly this layout. Keep every marker verbatim, \
including the emoji.

{detected}<product name>
{star}<one {star} per point, 1 to 5> {overall}

{breakdown}
- <parameter>: <score from 1 to 5>
- <parameter>: <score from 1 to 5>

{high} <comma-separated ingredients>
{moderate} <comma-separated ingredients>
{low} <comma-separated ingredients>

{recommendations}
- <recommendation>
- <recommendation>

Rules:
- Scores are single digits from 1 to 5.
- Put each risk tier on one line. Leave the line empty after the marker if \
no ingredient fits.
- After the recommendations you may add a free-form explanation.",
        detected = markers::DETECTED,
        star = markers::STAR,
        overall = markers::OVERALL_RATING,
        breakdown = markers::BREAKDOWN,
        high = markers::HIGH_RISK,
        moderate = markers::MODERATE_RISK,
        low = markers::LOW_RISK,
        recommendations = markers::RECOMMENDATIONS,
    )
}
