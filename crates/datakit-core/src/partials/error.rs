//! Error types for partial selector parsing
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Errors raised while parsing include/exclude/only/except paths
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartialsError {
    /// Structural problems: empty segments, unclosed braces
    #[error("Parse error at position {position} in `{input}`: {message}")]
    Parse {
        message: String,
        position: usize,
        input: String,
    },

    /// An unexpected character
    #[error("Syntax error at position {position} in `{input}`: {message} (expected {}, found `{found}`)", .expected.join(" or "))]
    Syntax {
        message: String,
        position: usize,
        input: String,
        expected: Vec<String>,
        found: String,
    },
}

impl PartialsError {
    /// Create a parse error with position and input
    pub fn parse(message: impl Into<String>, position: usize, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            position,
            input: input.into(),
        }
    }

    /// Create a syntax error with the expected tokens and what was found
    pub fn syntax(
        message: impl Into<String>,
        position: usize,
        input: impl Into<String>,
        expected: Vec<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::Syntax {
            message: message.into(),
            position,
            input: input.into(),
            expected,
            found: found.into(),
        }
    }

    /// Byte offset of the problem within the (whitespace-free) path
    pub fn position(&self) -> usize {
        match self {
            Self::Parse { position, .. } | Self::Syntax { position, .. } => *position,
        }
    }
}

/// Result alias for partial parsing
pub type PartialsResult<T> = std::result::Result<T, PartialsError>;
