//! Per-request analysis state.
//!
//! A session tracks at most one in-flight analysis. Each completed
//! analysis replaces the previous result wholesale.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::report::AnalysisReport;

/// Where the submitted image lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Url(u) => f.write_str(u),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisState {
    #[default]
    Idle,
    Submitted(ImageRef),
    Completed(Box<AnalysisReport>),
    Failed(String),
}

impl AnalysisState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitted(_) => "submitted",
            Self::Completed(_) => "completed",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("an analysis of {0} is already in flight")]
    InFlight(ImageRef),

    #[error("no analysis has been submitted (state: {0})")]
    NotSubmitted(&'static str),
}

/// Owner of one caller's analysis state.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    state: AnalysisState,
    updated_at: Option<DateTime<Utc>>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AnalysisState {
        &self.state
    }

    /// When the state last changed. `None` while never used.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, AnalysisState::Submitted(_))
    }

    /// The report from the last completed analysis.
    pub fn report(&self) -> Option<&AnalysisReport> {
        match &self.state {
            AnalysisState::Completed(r) => Some(&**r),
            _ => None,
        }
    }

    /// Start an analysis. Rejected while another one is in flight.
    pub fn submit(&mut self, image: ImageRef) -> Result<(), SessionError> {
        if let AnalysisState::Submitted(current) = &self.state {
            return Err(SessionError::InFlight(current.clone()));
        }
        tracing::debug!(image = %image, "analysis submitted");
        self.transition(AnalysisState::Submitted(image));
        Ok(())
    }

    pub fn complete(&mut self, report: AnalysisReport) -> Result<(), SessionError> {
        self.require_submitted()?;
        self.transition(AnalysisState::Completed(Box::new(report)));
        Ok(())
    }

    pub fn fail(&mut self, reason: impl Into<String>) -> Result<(), SessionError> {
        self.require_submitted()?;
        let reason = reason.into();
        tracing::debug!(reason = %reason, "analysis failed");
        self.transition(AnalysisState::Failed(reason));
        Ok(())
    }

    fn require_submitted(&self) -> Result<(), SessionError> {
        if self.is_in_flight() {
            Ok(())
        } else {
            Err(SessionError::NotSubmitted(self.state.as_str()))
        }
    }

    fn transition(&mut self, next: AnalysisState) {
        self.state = next;
        self.updated_at = Some(Utc::now());
    }
}
