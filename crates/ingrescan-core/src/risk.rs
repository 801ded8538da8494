//! Three-tier ingredient risk classification.

use serde::{Deserialize, Serialize};

use crate::markers;

/// Risk tier an ingredient line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTier {
    High,
    Moderate,
    Low,
}

impl RiskTier {
    pub const ALL: [RiskTier; 3] = [Self::High, Self::Moderate, Self::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }

    /// The marker token that introduces this tier's line.
    pub fn marker(&self) -> &'static str {
        match self {
            Self::High => markers::HIGH_RISK,
            Self::Moderate => markers::MODERATE_RISK,
            Self::Low => markers::LOW_RISK,
        }
    }
}

/// Ingredient lists per tier. No cross-tier deduplication: an ingredient
/// the report lists twice stays in both tiers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskTiers {
    pub high_risk: Vec<String>,
    pub moderate_risk: Vec<String>,
    pub low_risk: Vec<String>,
}

impl RiskTiers {
    pub fn get(&self, tier: RiskTier) -> &[String] {
        match tier {
            RiskTier::High => &self.high_risk,
            RiskTier::Moderate => &self.moderate_risk,
            RiskTier::Low => &self.low_risk,
        }
    }

    pub fn get_mut(&mut self, tier: RiskTier) -> &mut Vec<String> {
        match tier {
            RiskTier::High => &mut self.high_risk,
            RiskTier::Moderate => &mut self.moderate_risk,
            RiskTier::Low => &mut self.low_risk,
        }
    }

    pub fn is_empty(&self) -> bool {
        RiskTier::ALL.iter().all(|t| self.get(*t).is_empty())
    }
}

/// Split a risk span on commas, trim, and drop empty fragments.
///
/// Order and duplicates are preserved. An absent span is an empty list.
pub fn classify(span: Option<&str>) -> Vec<String> {
    span.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_drops_empty_fragments() {
        assert_eq!(classify(Some(" Sugar, Palm Oil ,  ")), vec!["Sugar", "Palm Oil"]);
    }

    #[test]
    fn keeps_duplicates_in_order() {
        assert_eq!(
            classify(Some("Salt, Sugar, Salt")),
            vec!["Salt", "Sugar", "Salt"]
        );
    }

    #[test]
    fn absent_or_blank_span_is_empty() {
        assert!(classify(None).is_empty());
        assert!(classify(Some("")).is_empty());
        assert!(classify(Some(" , ,")).is_empty());
    }

    #[test]
    fn tiers_are_independent() {
        let mut tiers = RiskTiers::default();
        assert!(tiers.is_empty());
        tiers.get_mut(RiskTier::High).push("Sugar".into());
        tiers.get_mut(RiskTier::Low).push("Sugar".into());
        assert_eq!(tiers.get(RiskTier::High), ["Sugar"]);
        assert_eq!(tiers.get(RiskTier::Low), ["Sugar"]);
        assert!(tiers.get(RiskTier::Moderate).is_empty());
    }

    #[test]
    fn tier_markers() {
        assert_eq!(RiskTier::Moderate.marker(), "⚠️ Moderate Risk:");
        assert_eq!(RiskTier::High.as_str(), "high");
    }
}
