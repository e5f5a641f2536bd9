//! Mentorscope domain types and pure logic.
//!
//! Everything in this crate is I/O-free: the analysis record model and
//! its status taxonomy, record integrity checks, the display progress
//! estimator, submission preconditions, and the mentor aggregation read
//! models. HTTP transport lives in `mentorscope-client`; the polling
//! session engine lives in `mentorscope-tracker`.

pub mod analysis;
pub mod error;
pub mod mentor;
pub mod progress;
pub mod submission;
pub mod types;

pub use analysis::{AnalysisRecord, AnalysisState, AnalysisStatus, IntegrityAnomaly};
pub use error::CoreError;
pub use progress::{ProgressEstimator, ProgressView};
