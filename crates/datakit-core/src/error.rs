//! Error types for the Datakit core library
//!
//! This module defines the error handling system for Datakit, using thiserror
//! for ergonomic error definitions and anyhow for opaque causes.

use crate::partials::PartialsError;
use thiserror::Error;

/// Main error type for Datakit operations
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed include/exclude/only/except path
    #[error("Invalid partial selector: {source}")]
    Partials {
        #[from]
        source: PartialsError,
    },

    /// A contract between the engine and its collaborators was broken
    #[error("Invariant violated: {message}")]
    Invariant { message: String },

    /// A lazy computation failed
    #[error("Resolution failed: {message}")]
    Resolution {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A transformer or cast received a value it cannot handle
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
        context: Option<String>,
    },

    /// A cast could not convert an input value
    #[error("Cast failed for property `{property}`: {message}")]
    Cast { property: String, message: String },

    /// No data class registered under the given name
    #[error("Unknown data class: {name}")]
    UnknownDataClass { name: String },

    /// A value was assigned to a property the class does not declare
    #[error("Data class `{class}` has no property `{property}`")]
    UnknownProperty { class: String, property: String },

    /// A data object could not be built from the given payload
    #[error("Cannot create data object `{class}`: {message}")]
    CannotCreateData { class: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// YAML parsing errors
    #[error("YAML error: {message}")]
    Yaml {
        message: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic internal error with context
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an invariant violation
    pub fn invariant(message: impl Into<String>) -> Self {
        Error::Invariant {
            message: message.into(),
        }
    }

    /// Build a resolution failure, typically returned from a lazy computation
    pub fn resolution(message: impl Into<String>) -> Self {
        Error::Resolution {
            message: message.into(),
            source: None,
        }
    }

    /// Build a type mismatch between an expected kind and the value found
    pub fn type_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::TypeMismatch {
            expected: expected.into(),
            found: found.into(),
            context: None,
        }
    }

    /// Build a configuration error without an underlying cause
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
            source: None,
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_error_display() {
        let err = Error::invariant("property `name` has no value");
        assert_eq!(
            err.to_string(),
            "Invariant violated: property `name` has no value"
        );
    }

    #[test]
    fn test_partials_error_conversion() {
        let err: Error = PartialsError::parse("Unclosed '{'", 2, "a.{b").into();
        assert!(matches!(err, Error::Partials { .. }));
        assert!(err.to_string().contains("Unclosed"));
    }

    #[test]
    fn test_resolution_error_keeps_source() {
        let err = Error::Resolution {
            message: "query failed".to_string(),
            source: Some(anyhow::anyhow!("connection reset")),
        };
        assert_eq!(err.source().map(|s| s.to_string()), Some("connection reset".to_string()));
    }
}
