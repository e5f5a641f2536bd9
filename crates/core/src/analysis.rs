//! Analysis job records and the status taxonomy.
//!
//! The Job Service owns every record and its lifecycle; this module holds
//! the client's read-only view of that data, the status taxonomy used to
//! decide when polling stops, and the integrity projection that turns a
//! loosely-optional wire record into a per-status shape.

use crate::types::{AnalysisId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

/// Analysis is queued and waiting for a worker.
pub const STATUS_PENDING: &str = "pending";
/// Analysis pipeline is running.
pub const STATUS_PROCESSING: &str = "processing";
/// Analysis finished with results attached.
pub const STATUS_COMPLETED: &str = "completed";
/// Analysis aborted with an error.
pub const STATUS_FAILED: &str = "failed";

// ---------------------------------------------------------------------------
// Status taxonomy
// ---------------------------------------------------------------------------

/// Lifecycle status of an analysis job.
///
/// Transitions are service-owned and strictly ordered: `pending →
/// processing → completed | failed`. The two terminal states are mutually
/// exclusive. Wire values outside the known set are preserved in
/// [`AnalysisStatus::Other`] and treated as non-terminal, so a new
/// upstream state degrades to "still running" instead of wedging the
/// client.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnalysisStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Other(String),
}

impl AnalysisStatus {
    /// Exactly `completed` and `failed` end a job's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Wire representation of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => STATUS_PENDING,
            Self::Processing => STATUS_PROCESSING,
            Self::Completed => STATUS_COMPLETED,
            Self::Failed => STATUS_FAILED,
            Self::Other(s) => s,
        }
    }
}

impl From<String> for AnalysisStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            STATUS_PENDING => Self::Pending,
            STATUS_PROCESSING => Self::Processing,
            STATUS_COMPLETED => Self::Completed,
            STATUS_FAILED => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<AnalysisStatus> for String {
    fn from(status: AnalysisStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Result payloads
// ---------------------------------------------------------------------------

/// Per-dimension evaluation scores (0–100) attached to a completed
/// analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scores {
    pub engagement: f64,
    pub communication: f64,
    pub technical_depth: f64,
    pub clarity: f64,
    pub interaction: f64,
    pub overall: f64,
}

/// AI-generated qualitative feedback attached to a completed analysis.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub key_highlights: Option<String>,
}

/// Acoustic measurements extracted from the session audio track.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
    pub duration: Option<f64>,
    pub energy_mean: Option<f64>,
    pub energy_std: Option<f64>,
    pub pitch_mean: Option<f64>,
    pub pitch_std: Option<f64>,
    pub speech_rate: Option<f64>,
    pub pause_ratio: Option<f64>,
    pub sample_rate: Option<f64>,
}

/// Frame-sampled visual measurements (gestures, face presence, eye
/// contact).
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisualFeatures {
    pub total_frames: Option<u64>,
    pub samples_analyzed: Option<u64>,
    pub gesture_count: Option<u64>,
    pub face_confidence: Option<f64>,
    pub face_presence_ratio: Option<f64>,
    pub eye_contact_ratio: Option<f64>,
    pub hand_gestures: Option<u64>,
}

/// Transcript-level language analysis.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NlpAnalysis {
    pub technical_depth_score: Option<f64>,
    pub clarity_score: Option<f64>,
    pub structure_score: Option<f64>,
    pub question_count: Option<u64>,
    pub technical_term_count: Option<u64>,
    pub word_count: Option<u64>,
}

// ---------------------------------------------------------------------------
// Analysis record
// ---------------------------------------------------------------------------

/// One analysis job as the Job Service reports it.
///
/// `scores` and `insights` are populated iff the job completed; `error`
/// is populated only when it failed; `completed_at` is set on either
/// terminal transition. [`AnalysisRecord::state`] enforces those
/// relations.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisRecord {
    pub id: AnalysisId,
    pub mentor_id: String,
    pub mentor_name: String,
    pub subject: String,
    pub video_filename: String,
    #[serde(default)]
    pub video_duration: Option<f64>,
    pub status: AnalysisStatus,
    #[serde(default)]
    pub scores: Option<Scores>,
    #[serde(default)]
    pub insights: Option<Insights>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub audio_features: Option<AudioFeatures>,
    #[serde(default)]
    pub visual_features: Option<VisualFeatures>,
    #[serde(default)]
    pub nlp_analysis: Option<NlpAnalysis>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    #[serde(default)]
    pub completed_at: Option<Timestamp>,
    #[serde(default)]
    pub error: Option<String>,
}

impl AnalysisRecord {
    /// Project the record into its per-status shape.
    ///
    /// Returns an [`IntegrityAnomaly`] when the populated fields
    /// contradict the reported status. The raw record stays available to
    /// the caller, so an anomalous record can still be rendered from
    /// whatever fields are present.
    pub fn state(&self) -> Result<AnalysisState, IntegrityAnomaly> {
        if (self.scores.is_some() || self.insights.is_some())
            && self.status != AnalysisStatus::Completed
        {
            return Err(IntegrityAnomaly::ResultsWithoutCompletion {
                status: self.status.clone(),
            });
        }
        if self.error.is_some() && self.status != AnalysisStatus::Failed {
            return Err(IntegrityAnomaly::ErrorWithoutFailure {
                status: self.status.clone(),
            });
        }

        match &self.status {
            AnalysisStatus::Pending => Ok(AnalysisState::Pending),
            AnalysisStatus::Processing => Ok(AnalysisState::Processing),
            AnalysisStatus::Other(status) => Ok(AnalysisState::Other {
                status: status.clone(),
            }),
            AnalysisStatus::Completed => match (&self.scores, &self.insights) {
                (Some(scores), Some(insights)) => {
                    Ok(AnalysisState::Completed(CompletedAnalysis {
                        scores: scores.clone(),
                        insights: insights.clone(),
                        completed_at: self.completed_at,
                    }))
                }
                _ => Err(IntegrityAnomaly::CompletionWithoutResults),
            },
            // A failed record without an error message is tolerated;
            // presentation falls back to a generic failure indicator.
            AnalysisStatus::Failed => Ok(AnalysisState::Failed {
                error: self.error.clone(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-status projection
// ---------------------------------------------------------------------------

/// An [`AnalysisRecord`] narrowed to the fields valid for its status.
///
/// Invalid field combinations are unrepresentable here; they surface as
/// [`IntegrityAnomaly`] from [`AnalysisRecord::state`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisState {
    Pending,
    Processing,
    /// Unknown upstream status, treated as still running.
    Other { status: String },
    Completed(CompletedAnalysis),
    Failed { error: Option<String> },
}

/// Result payload of a completed analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedAnalysis {
    pub scores: Scores,
    pub insights: Insights,
    pub completed_at: Option<Timestamp>,
}

/// A record whose populated fields contradict its reported status.
///
/// Anomalies are reported, never silently coerced: the tracker keeps
/// polling or stopping purely on the status value, and presentation
/// decides how much of the contradictory record to show.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntegrityAnomaly {
    #[error("Record reports status '{status}' but carries completion results")]
    ResultsWithoutCompletion { status: AnalysisStatus },

    #[error("Record reports status 'completed' but is missing scores or insights")]
    CompletionWithoutResults,

    #[error("Record reports status '{status}' but carries a failure error")]
    ErrorWithoutFailure { status: AnalysisStatus },
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
