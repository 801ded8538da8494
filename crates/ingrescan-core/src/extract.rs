//! Section extraction from a raw inference report.
//!
//! A best-effort scan, not a parser: the upstream model is not guaranteed
//! to follow the template, so every marker is searched for independently
//! and a missing marker only yields an absent span.

use std::sync::LazyLock;

use regex::Regex;

use crate::markers;
use crate::risk::RiskTier;

static DETECTED_RE: LazyLock<Regex> = LazyLock::new(|| marker_line(markers::DETECTED));

static RATING_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "{}(.*?){}",
        regex::escape(markers::STAR),
        regex::escape(markers::OVERALL_RATING)
    );
    Regex::new(&pattern).expect("rating pattern is valid")
});

static BREAKDOWN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        "(?s){}(.+?){}",
        regex::escape(markers::BREAKDOWN),
        regex::escape(markers::BREAKDOWN_END)
    );
    Regex::new(&pattern).expect("breakdown pattern is valid")
});

static HIGH_RISK_RE: LazyLock<Regex> = LazyLock::new(|| marker_line(markers::HIGH_RISK));
static MODERATE_RISK_RE: LazyLock<Regex> = LazyLock::new(|| marker_line(markers::MODERATE_RISK));
static LOW_RISK_RE: LazyLock<Regex> = LazyLock::new(|| marker_line(markers::LOW_RISK));

/// `<marker>` followed by the rest of its line.
fn marker_line(marker: &str) -> Regex {
    Regex::new(&format!("{}(.*)", regex::escape(marker))).expect("marker pattern is valid")
}

/// Spans located inside one raw report. Borrowed from the report text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sections<'a> {
    pub detected: Option<&'a str>,
    /// Empty when either the opening glyph or `Overall Rating` is missing.
    pub rating: &'a str,
    pub breakdown: Option<&'a str>,
    pub high_risk: Option<&'a str>,
    pub moderate_risk: Option<&'a str>,
    pub low_risk: Option<&'a str>,
    pub recommendations: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    /// Locate every known section in `text`. Never fails.
    pub fn extract(text: &'a str) -> Self {
        Self {
            detected: detection_span(text),
            rating: rating_span(text),
            breakdown: breakdown_span(text),
            high_risk: risk_span(text, RiskTier::High),
            moderate_risk: risk_span(text, RiskTier::Moderate),
            low_risk: risk_span(text, RiskTier::Low),
            recommendations: recommendation_items(text),
        }
    }

    pub fn risk(&self, tier: RiskTier) -> Option<&'a str> {
        match tier {
            RiskTier::High => self.high_risk,
            RiskTier::Moderate => self.moderate_risk,
            RiskTier::Low => self.low_risk,
        }
    }
}

/// Text after the detection marker up to end of line, trimmed.
pub fn detection_span(text: &str) -> Option<&str> {
    DETECTED_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// Text between the first star glyph followed on the same line by
/// `Overall Rating`, and that phrase. The opening glyph is excluded.
pub fn rating_span(text: &str) -> &str {
    RATING_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map_or("", |m| m.as_str())
}

/// Text between the breakdown marker and the next high-risk glyph.
pub fn breakdown_span(text: &str) -> Option<&str> {
    BREAKDOWN_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Remainder of the line following the marker for `tier`.
pub fn risk_span(text: &str, tier: RiskTier) -> Option<&str> {
    let re = match tier {
        RiskTier::High => &*HIGH_RISK_RE,
        RiskTier::Moderate => &*MODERATE_RISK_RE,
        RiskTier::Low => &*LOW_RISK_RE,
    };
    re.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str())
}

/// Bullet items under the recommendations marker.
///
/// Text after the marker on its own line counts as an item. Collection
/// stops at the first blank or non-bullet line.
pub fn recommendation_items(text: &str) -> Vec<&str> {
    let mut lines = text.lines();
    let mut items = Vec::new();

    let Some(rest) = lines.by_ref().find_map(|l| {
        l.find(markers::RECOMMENDATIONS)
            .map(|i| &l[i + markers::RECOMMENDATIONS.len()..])
    }) else {
        return items;
    };

    let inline = rest.trim();
    if !inline.is_empty() {
        items.push(inline);
    }

    for line in lines {
        let line = line.trim();
        let Some(item) = strip_bullet(line) else {
            break;
        };
        if !item.is_empty() {
            items.push(item);
        }
    }
    items
}

fn strip_bullet(line: &str) -> Option<&str> {
    ["- ", "* ", "• "]
        .iter()
        .find_map(|b| line.strip_prefix(b))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "\
## Product Analysis
📸 Detected: Choco Crunch Cereal
⭐️⭐️⭐️⭐️ Overall Rating (3/5)

🔍 Breakdown:
- Protein: 4
- Sugar: 2
- Fiber: 5

🚨 High-Risk: Sugar, Palm Oil
⚠️ Moderate Risk: Salt
✅ Low Risk: Oats, Wheat Flour

💡 Recommendations:
- Pair with fresh fruit
- Limit to one serving a day

Full notes follow.";

    #[test]
    fn finds_every_section() {
        let s = Sections::extract(REPORT);
        assert_eq!(s.detected, Some("Choco Crunch Cereal"));
        assert_eq!(s.rating, "⭐️⭐️⭐️ ");
        assert_eq!(
            s.breakdown,
            Some("\n- Protein: 4\n- Sugar: 2\n- Fiber: 5\n\n")
        );
        assert_eq!(s.high_risk, Some(" Sugar, Palm Oil"));
        assert_eq!(s.moderate_risk, Some(" Salt"));
        assert_eq!(s.low_risk, Some(" Oats, Wheat Flour"));
        assert_eq!(
            s.recommendations,
            vec!["Pair with fresh fruit", "Limit to one serving a day"]
        );
    }

    #[test]
    fn plain_text_yields_nothing() {
        let s = Sections::extract("The image could not be analysed.");
        assert_eq!(s, Sections::default());
    }

    #[test]
    fn empty_detection_is_absent() {
        assert_eq!(detection_span("📸 Detected: \nnext line"), None);
    }

    #[test]
    fn detection_stops_at_end_of_line() {
        assert_eq!(
            detection_span("📸 Detected: Oat Milk  \r\n⭐️ Overall Rating"),
            Some("Oat Milk")
        );
    }

    #[test]
    fn rating_requires_closing_phrase() {
        assert_eq!(rating_span("⭐️⭐️⭐️ no phrase here"), "");
        assert_eq!(rating_span("Overall Rating without stars"), "");
    }

    #[test]
    fn rating_does_not_cross_lines() {
        let text = "⭐️ loose star\n⭐️⭐️⭐️ Overall Rating";
        assert_eq!(rating_span(text), "⭐️⭐️ ");
    }

    #[test]
    fn breakdown_needs_both_boundaries() {
        assert_eq!(breakdown_span("🔍 Breakdown:\n- Protein: 4\n"), None);
        assert_eq!(breakdown_span("- Protein: 4\n🚨 High-Risk: Sugar"), None);
    }

    #[test]
    fn breakdown_stops_at_first_alarm_glyph() {
        let text = "🔍 Breakdown:\n- Salt: 1\n🚨 note\n- Fat: 2\n🚨 High-Risk: x";
        assert_eq!(breakdown_span(text), Some("\n- Salt: 1\n"));
    }

    #[test]
    fn risk_markers_are_independent() {
        let text = "✅ Low Risk: Water";
        assert_eq!(risk_span(text, RiskTier::High), None);
        assert_eq!(risk_span(text, RiskTier::Moderate), None);
        assert_eq!(risk_span(text, RiskTier::Low), Some(" Water"));
    }

    #[test]
    fn risk_marker_is_emoji_sensitive() {
        // Bare warning sign without the variation selector.
        assert_eq!(risk_span("\u{26A0} Moderate Risk: Salt", RiskTier::Moderate), None);
    }

    #[test]
    fn recommendations_inline_and_stop_on_prose() {
        let text = "💡 Recommendations: Drink water\n* Walk daily\n• Sleep well\nThat is all.\n- not collected";
        assert_eq!(
            recommendation_items(text),
            vec!["Drink water", "Walk daily", "Sleep well"]
        );
    }

    #[test]
    fn recommendations_absent() {
        assert!(recommendation_items("- Eat less sugar").is_empty());
    }
}
