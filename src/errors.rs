//! Error types for riskboard operations.
//!
//! The core only fails on upstream bugs: a rating outside `[1, 5]`, a
//! malformed configuration, or a record whose stored fields contradict
//! each other. None of these are transient, so nothing here is retried.
//!
//! # Example
//!
//! ```rust
//! use riskboard::errors::Error;
//!
//! let err = Error::invalid_rating("impact", 7);
//! assert!(err.is_invalid_input());
//! assert_eq!(err.code(), "E001");
//! ```

use stillwater::{NonEmptyVec, Validation};
use thiserror::Error;

/// Main error type for riskboard operations
#[derive(Debug, Error)]
pub enum Error {
    /// A rating field (impact, probability, progress, cost tier) is outside its domain
    #[error("Invalid rating for {field}: {value} (expected {expected})")]
    InvalidRating {
        field: &'static str,
        value: i64,
        expected: &'static str,
    },

    /// Malformed configuration, detected when an engine is built
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An invariant that upstream validation should have guaranteed was broken
    #[error("Programming error: {0}")]
    Programming(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Create an error for a 1..=5 impact or probability rating
    pub fn invalid_rating(field: &'static str, value: i64) -> Self {
        Self::InvalidRating {
            field,
            value,
            expected: "1..=5",
        }
    }

    /// Create an error for a rating with a custom domain
    pub fn out_of_range(field: &'static str, value: i64, expected: &'static str) -> Self {
        Self::InvalidRating {
            field,
            value,
            expected,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn programming(message: impl Into<String>) -> Self {
        Self::Programming(message.into())
    }

    /// Structured error code for programmatic handling.
    ///
    /// - E001: invalid rating
    /// - E020: configuration
    /// - E030: programming / invariant violation
    /// - E040-E042: I/O and decoding at the shell
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidRating { .. } => "E001",
            Self::Configuration(_) => "E020",
            Self::Programming(_) => "E030",
            Self::Io(_) => "E040",
            Self::Json(_) => "E041",
            Self::Toml(_) => "E042",
        }
    }

    /// Whether the error was caused by the caller's input data
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidRating { .. } | Self::Programming(_))
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;

/// Accumulating validation over plain messages.
pub type ConfigValidation<T> = Validation<T, NonEmptyVec<String>>;

/// Fold every problem found while validating into one configuration error.
pub fn collect_problems(problems: Vec<String>) -> Result<()> {
    into_result(validation_from_problems(problems))
}

/// Build a validation from a list of problems (empty means success).
pub fn validation_from_problems(problems: Vec<String>) -> ConfigValidation<()> {
    let mut problems = problems.into_iter();
    match problems.next() {
        Some(head) => Validation::Failure(NonEmptyVec::new(head, problems.collect())),
        None => Validation::Success(()),
    }
}

/// Convert an accumulated validation into a fail-fast result.
pub fn into_result<T>(validation: ConfigValidation<T>) -> Result<T> {
    match validation {
        Validation::Success(value) => Ok(value),
        Validation::Failure(errors) => {
            let messages: Vec<String> = errors.into_vec();
            Err(Error::Configuration(messages.join("\n")))
        }
    }
}
