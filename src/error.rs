//! Error types for ABAC evaluation
//!
//! A denied request is a [`Decision`](crate::Decision), not an error. Everything in
//! here describes input the engine could not evaluate.

use crate::abac::AttributeKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbacError {
    /// A condition references an attribute the request did not supply
    #[error("attribute {kind}:{key} not given")]
    AttributeMissing { kind: AttributeKind, key: String },

    /// Operand types do not fit the selected comparison strategy
    #[error("value type mismatch: {value_type} comparison between {origin} and {compare}")]
    ValueTypeMismatch {
        value_type: &'static str,
        origin: &'static str,
        compare: &'static str,
    },

    #[error("unsupported operator {operator} for {value_type} values")]
    UnsupportedOperator {
        operator: String,
        value_type: &'static str,
    },

    #[error("invalid effect '{0}' (expected allow or deny)")]
    InvalidEffect(String),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AbacError {
    fn from(err: serde_json::Error) -> Self {
        AbacError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for AbacError {
    fn from(err: toml::de::Error) -> Self {
        AbacError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AbacError>;
