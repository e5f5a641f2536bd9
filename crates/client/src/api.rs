//! REST client for the platform HTTP endpoints.
//!
//! Wraps the Job Service (video upload, status fetch, listing) and the
//! Aggregation Service (mentor stats, leaderboards, health probes) using
//! [`reqwest`]. Submission preconditions are enforced locally before any
//! bytes move.

use std::path::Path;

use mentorscope_core::mentor::MentorDetail;
use mentorscope_core::submission::validate_submission;
use mentorscope_core::{AnalysisRecord, CoreError};

use crate::models::{AnalysisListing, HealthStatus, MentorListing, TopMentors, UploadResponse};

/// HTTP client for one platform deployment.
pub struct AnalysisApi {
    client: reqwest::Client,
    base_url: String,
}

/// Errors from the platform API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Platform API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The submission failed a local precondition; no request was made.
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The video file could not be read from disk.
    #[error("Failed to read video file: {0}")]
    VideoRead(#[from] std::io::Error),
}

impl AnalysisApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit a recorded session for analysis.
    ///
    /// Validates the filename extension, size cap, and required fields
    /// locally, then sends a `POST /api/analysis/upload` multipart form
    /// with the video bytes. Returns the new job's id; processing is
    /// asynchronous and must be observed via polling.
    pub async fn upload_analysis(
        &self,
        video: &Path,
        mentor_name: &str,
        subject: &str,
        mentor_id: Option<&str>,
    ) -> Result<UploadResponse, ApiError> {
        let file_name = video
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| CoreError::Validation("Video path has no filename".to_string()))?;

        let bytes = tokio::fs::read(video).await?;
        validate_submission(&file_name, bytes.len() as u64, mentor_name, subject)?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let mut form = reqwest::multipart::Form::new()
            .part("video", part)
            .text("mentor_name", mentor_name.to_string())
            .text("subject", subject.to_string());
        if let Some(id) = mentor_id {
            form = form.text("mentor_id", id.to_string());
        }

        let response = self
            .client
            .post(format!("{}/api/analysis/upload", self.base_url))
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the current record for one analysis job.
    ///
    /// Sends `GET /api/analysis/{id}`. This is the read the status
    /// poller drives on its fixed cadence.
    pub async fn get_analysis(&self, analysis_id: &str) -> Result<AnalysisRecord, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/analysis/{}", self.base_url, analysis_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one page of analyses, newest first.
    ///
    /// Sends `GET /api/analysis?skip={skip}&limit={limit}`.
    pub async fn list_analyses(&self, skip: u32, limit: u32) -> Result<AnalysisListing, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/analysis", self.base_url))
            .query(&[("skip", skip), ("limit", limit)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch aggregate stats for every known mentor.
    ///
    /// Sends `GET /api/mentors`.
    pub async fn list_mentors(&self) -> Result<MentorListing, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/mentors", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch the service-ranked leaderboard.
    ///
    /// Sends `GET /api/mentors/top?limit={limit}`. Ranks arrive
    /// precomputed; the client never orders mentors itself.
    pub async fn top_mentors(&self, limit: u32) -> Result<TopMentors, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/mentors/top", self.base_url))
            .query(&[("limit", limit)])
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Fetch one mentor's rollup with recent history.
    ///
    /// Sends `GET /api/mentors/{id}`.
    pub async fn mentor_detail(&self, mentor_id: &str) -> Result<MentorDetail, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/mentors/{}", self.base_url, mentor_id))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Probe service liveness via `GET /api/health`.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    /// Probe database connectivity via `GET /api/health/db`.
    pub async fn database_health(&self) -> Result<HealthStatus, ApiError> {
        let response = self
            .client
            .get(format!("{}/api/health/db", self.base_url))
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or an [`ApiError::Api`] containing
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
