//! HTTP client for the mentor analysis platform.
//!
//! [`AnalysisApi`] wraps the Job Service endpoints (upload, status,
//! listing) and the Aggregation Service endpoints (mentor rollups,
//! leaderboards) over [`reqwest`], and implements the tracker's
//! [`AnalysisSource`](mentorscope_tracker::AnalysisSource) seam so
//! polling sessions run straight off the live API.

pub mod api;
pub mod models;
mod source;

pub use api::{AnalysisApi, ApiError};
pub use models::{AnalysisListing, HealthStatus, MentorListing, TopMentors, UploadResponse};
