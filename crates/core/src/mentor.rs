//! Mentor aggregation read models.
//!
//! Rankings, averages, and session counts arrive precomputed from the
//! Aggregation Service; the client renders them and never derives its
//! own.

use crate::analysis::AnalysisRecord;
use crate::types::Timestamp;

/// Aggregate stats for one mentor.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MentorSummary {
    pub id: String,
    pub mentor_name: String,
    pub total_sessions: u32,
    pub average_score: f64,
    #[serde(default)]
    pub last_session: Option<Timestamp>,
}

/// One leaderboard row, ranked by the service.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RankedMentor {
    pub rank: u32,
    pub id: String,
    pub mentor_name: String,
    pub average_score: f64,
    pub total_sessions: u32,
}

/// Per-mentor rollup with recent history.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MentorDetail {
    pub mentor_id: String,
    pub mentor_name: String,
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    #[serde(default)]
    pub recent_analyses: Vec<AnalysisRecord>,
}
