//! Error types for KPI generation and rendering

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KpiError {
    /// A sample that would make a KPI denominator zero
    #[error("Invalid sample: {field} {reason}")]
    InvalidSample { field: &'static str, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Template error")]
    Template(#[from] minijinja::Error),

    #[error("Serialization error")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for KPI operations.
pub type KpiResult<T> = Result<T, KpiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_wrapped_error_not_repeated_in_chain() {
        let err = KpiError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let chain = anyhow::Error::new(err).context("Failed to load configuration");

        assert_eq!(
            format!("{:#}", chain),
            "Failed to load configuration: I/O error: missing"
        );
    }

    #[test]
    fn test_source_is_exposed() {
        let err = KpiError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));

        assert_eq!(err.to_string(), "I/O error");
        assert_eq!(err.source().map(|s| s.to_string()), Some("missing".to_string()));
    }
}
