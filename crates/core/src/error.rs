use crate::analysis::IntegrityAnomaly;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Integrity(#[from] IntegrityAnomaly),
}
