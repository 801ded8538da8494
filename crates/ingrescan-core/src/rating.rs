//! Star rating decoding.

use crate::markers::STAR;

/// Number of stars the presentation layer shows at most.
pub const DISPLAY_STARS: usize = 5;

/// Count star glyphs in a rating span.
///
/// Only the full `⭐️` sequence counts; a bare U+2B50 does not. There is
/// no upper bound here.
pub fn count_stars(span: &str) -> usize {
    span.matches(STAR).count()
}

/// Render a glyph count as a row of stars, clamped to [`DISPLAY_STARS`].
pub fn render_stars(count: usize) -> String {
    STAR.repeat(count.min(DISPLAY_STARS))
}
