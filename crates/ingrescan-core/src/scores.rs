//! Parameter score table parsed from the breakdown block.
//!
//! Grammar per line: `- <name>: <digit>`. The name is the shortest run of
//! characters before a `: ` that is followed by a digit, so
//! `- Sugar content: high: 3` yields `Sugar content: high → 3`. Only one
//! digit is captured: `- Salt: 12` records `1`. Scores are expected to be
//! 1–5 upstream; anything else in the grammar is kept as the literal digit.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

static SCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"- (.*?): ([0-9])").expect("score pattern is valid"));

/// Ordered parameter → score mapping. Iteration order is first appearance.
pub type ScoreTable = IndexMap<String, u8>;

/// Highest score on the rating scale.
pub const MAX_SCORE: u8 = 5;

/// Build the score table from a breakdown span.
///
/// Lines that do not match are ignored. A repeated parameter keeps its
/// first position and takes the later value.
pub fn parse_scores(breakdown: &str) -> ScoreTable {
    let mut table = ScoreTable::new();
    for caps in SCORE_RE.captures_iter(breakdown) {
        let name = caps[1].trim();
        // The pattern only admits a single ASCII digit.
        let score = caps[2].as_bytes()[0] - b'0';
        table.insert(name.to_string(), score);
    }
    table
}
