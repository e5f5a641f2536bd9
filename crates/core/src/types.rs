/// Analysis and mentor identifiers are opaque service-assigned strings.
pub type AnalysisId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
