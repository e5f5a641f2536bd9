//! CLI configuration loaded from environment variables.

/// Platform API base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a locally running platform.
/// Command-line flags take precedence over the environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Base URL of the platform API (default: `http://localhost:8000`).
    pub api_url: String,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default                 |
    /// |-----------------------|-------------------------|
    /// | `MENTORSCOPE_API_URL` | `http://localhost:8000` |
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("MENTORSCOPE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        Self { api_url }
    }
}
