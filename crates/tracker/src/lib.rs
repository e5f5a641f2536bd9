//! Analysis lifecycle tracking.
//!
//! Drives a [`TrackerSession`] to a terminal state by fetching the
//! analysis record on a fixed cadence, publishing a session snapshot
//! after every applied fetch, and stopping on `completed`, `failed`, a
//! fetch error, or cancellation. Callers never write retry or timer
//! logic themselves.
//!
//! The Job Service is reached through the [`AnalysisSource`] seam;
//! `mentorscope-client` provides the HTTP implementation and tests
//! provide scripted ones.

pub mod poller;
pub mod session;
pub mod source;

pub use poller::{StatusPoller, TrackError, TrackerHandle, POLL_INTERVAL};
pub use session::{SessionState, StopCause, TrackerSession};
pub use source::{AnalysisSource, SourceError};
