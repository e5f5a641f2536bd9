//! [`AnalysisSource`] implementation over the HTTP client.

use async_trait::async_trait;

use mentorscope_core::AnalysisRecord;
use mentorscope_tracker::{AnalysisSource, SourceError};

use crate::api::{AnalysisApi, ApiError};

#[async_trait]
impl AnalysisSource for AnalysisApi {
    async fn fetch_analysis(&self, analysis_id: &str) -> Result<AnalysisRecord, SourceError> {
        self.get_analysis(analysis_id)
            .await
            .map_err(SourceError::from)
    }
}

impl From<ApiError> for SourceError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Request(e) if e.is_decode() => SourceError::Decode(e.to_string()),
            ApiError::Request(e) => SourceError::Transport(e.to_string()),
            ApiError::Api { status, body } => SourceError::Api {
                status,
                message: body,
            },
            // Upload-only failures; a status fetch never produces them.
            other => SourceError::Transport(other.to_string()),
        }
    }
}
