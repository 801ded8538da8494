pub mod chart;
pub mod extract;
pub mod markers;
pub mod prompt;
pub mod rating;
pub mod report;
pub mod risk;
pub mod scores;
pub mod session;

pub use chart::{Bar, BarChart};
pub use extract::Sections;
pub use report::AnalysisReport;
pub use risk::{RiskTier, RiskTiers};
pub use scores::{ScoreTable, parse_scores};
pub use session::{AnalysisSession, AnalysisState, ImageRef, SessionError};
