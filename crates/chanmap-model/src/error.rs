use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown match type: {0}")]
    UnknownMatchType(String),
    #[error("confidence out of range: {0}")]
    ConfidenceOutOfRange(String),
}
