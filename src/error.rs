//! Error types for Sugerir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Sugerir operations.
///
/// Covers invalid configuration, scoring against an unfitted model,
/// out-of-vocabulary identifiers, and unsupported similarity metrics.
///
/// # Examples
///
/// ```
/// use sugerir::error::SugerirError;
///
/// let err = SugerirError::InvalidMetric {
///     metric: "cosine".to_string(),
/// };
/// assert!(err.to_string().contains("similarity metric"));
/// ```
#[derive(Debug)]
pub enum SugerirError {
    /// Unsupported similarity metric selector.
    InvalidMetric {
        /// Selector value that was provided
        metric: String,
    },

    /// A scoring operation was invoked before the model was fitted.
    EmptyModel {
        /// Operation that was attempted
        operation: String,
    },

    /// Identifier was not observed in the training vocabulary.
    UnknownIdentifier {
        /// Identifier kind ("user" or "item")
        kind: String,
        /// The offending identifier
        id: String,
    },

    /// Invalid configuration value provided.
    ConfigurationError {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SugerirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SugerirError::InvalidMetric { metric } => {
                write!(
                    f,
                    "Invalid similarity metric: {metric}, expected one of jaccard, lift, counts"
                )
            }
            SugerirError::EmptyModel { operation } => {
                write!(f, "Model is not fitted: call fit before {operation}")
            }
            SugerirError::UnknownIdentifier { kind, id } => {
                write!(f, "Unknown {kind} identifier: {id} was not seen in training")
            }
            SugerirError::ConfigurationError {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid configuration: {param} = {value}, expected {constraint}"
                )
            }
            SugerirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SugerirError {}

impl From<&str> for SugerirError {
    fn from(msg: &str) -> Self {
        SugerirError::Other(msg.to_string())
    }
}

impl From<String> for SugerirError {
    fn from(msg: String) -> Self {
        SugerirError::Other(msg)
    }
}

/// Convenience result type for Sugerir operations.
pub type Result<T> = std::result::Result<T, SugerirError>;
