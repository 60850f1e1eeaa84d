use thiserror::Error;

/// Errors that can occur while building annotations or combining them.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlgebraError {
    #[error("Unsupported operator {0:?}")]
    UnsupportedOperator(String),

    #[error("Invalid interval {label}[{start}, {end}]: {reason}")]
    InvalidInterval {
        label: String,
        start: f64,
        end: f64,
        reason: &'static str,
    },

    #[error("Request does not name a label for {0}")]
    MissingLabel(&'static str),

    #[cfg(feature = "serde")]
    #[error("Malformed request: {0}")]
    Request(String),
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for AlgebraError {
    fn from(err: serde_json::Error) -> Self {
        AlgebraError::Request(err.to_string())
    }
}
