#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
    #[error("invalid content hash {input:?}: {reason}")]
    InvalidHash { input: String, reason: String },

    #[error("content hash mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, VerificationError>;
