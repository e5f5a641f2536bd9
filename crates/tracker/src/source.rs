//! The fetch seam between the tracker and the Job Service.

use async_trait::async_trait;
use mentorscope_core::AnalysisRecord;

/// Read-only fetch-by-id capability the poller drives.
///
/// Implementations must be idempotent reads and own their transport
/// timeouts; the poller trusts every call to resolve.
#[async_trait]
pub trait AnalysisSource: Send + Sync {
    /// Fetch the current record for one analysis job.
    async fn fetch_analysis(&self, analysis_id: &str) -> Result<AnalysisRecord, SourceError>;
}

/// Why a fetch produced no record.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("Service returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),
}
