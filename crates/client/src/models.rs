//! Wire envelopes for the platform HTTP API.

use serde::Deserialize;

use mentorscope_core::mentor::{MentorSummary, RankedMentor};
use mentorscope_core::AnalysisRecord;

/// Response to a successful video upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    /// Server-assigned identifier of the new analysis job.
    pub analysis_id: String,
    /// Initial job status as reported by the service.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

/// One page of analyses, newest first.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisListing {
    pub analyses: Vec<AnalysisRecord>,
    /// Total records matching the query, across all pages.
    pub total: u64,
    pub skip: u32,
    pub limit: u32,
}

/// Envelope for `GET /api/mentors`.
#[derive(Debug, Clone, Deserialize)]
pub struct MentorListing {
    pub mentors: Vec<MentorSummary>,
}

/// Envelope for `GET /api/mentors/top`.
#[derive(Debug, Clone, Deserialize)]
pub struct TopMentors {
    pub top_mentors: Vec<RankedMentor>,
}

/// Liveness probe payload, shared by the service and database probes.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub database: Option<String>,
}
