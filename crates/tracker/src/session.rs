//! Observable state of one polling session.

use mentorscope_core::analysis::AnalysisStatus;
use mentorscope_core::{AnalysisRecord, ProgressView};

use crate::source::SourceError;

/// Lifecycle of a polling session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created; no fetch result applied yet.
    Idle,
    /// A non-terminal fetch was applied; the next poll is scheduled.
    Polling,
    /// No further fetch will be issued.
    Stopped(StopCause),
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopCause {
    /// A terminal status (`completed` or `failed`) was observed.
    Terminal,
    /// A fetch failed; see [`TrackerSession::last_error`].
    FetchError,
}

/// Snapshot of one tracked analysis, published after every applied
/// fetch.
#[derive(Debug, Clone)]
pub struct TrackerSession {
    pub analysis_id: String,
    /// Most recent record; `None` until the first successful fetch.
    pub latest: Option<AnalysisRecord>,
    /// Non-terminal polls observed so far. The terminal fetch and failed
    /// fetches are not counted.
    pub poll_count: u32,
    pub state: SessionState,
    /// Set only when a fetch itself failed. An application-level
    /// `failed` status is not a session error.
    pub last_error: Option<SourceError>,
    /// Synthesized display progress as of the latest applied fetch.
    pub progress: ProgressView,
}

impl TrackerSession {
    pub(crate) fn new(analysis_id: String) -> Self {
        Self {
            analysis_id,
            latest: None,
            poll_count: 0,
            state: SessionState::Idle,
            last_error: None,
            progress: ProgressView::INITIAL,
        }
    }

    /// False once the session stopped (terminal status or fetch error).
    pub fn is_active(&self) -> bool {
        !matches!(self.state, SessionState::Stopped(_))
    }

    /// Status of the latest record, if one was applied.
    pub fn latest_status(&self) -> Option<&AnalysisStatus> {
        self.latest.as_ref().map(|record| &record.status)
    }
}
