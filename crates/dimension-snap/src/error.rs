use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapError {
    #[error("invalid value: {0} (must be finite and not negative)")]
    InvalidValue(f64),

    #[error("value must be positive, got {0}")]
    NonPositiveValue(f64),

    #[error("invalid multiple: {0} (must be finite and positive)")]
    InvalidMultiple(f64),

    #[error("bias must lie in [0, 1], got {0}")]
    BiasOutOfRange(f64),

    #[error("invalid preferred-value table: {0}")]
    InvalidSequence(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
