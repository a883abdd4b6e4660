//! Engine configuration
//!
//! Configuration can be built in code, through [`EngineBuilder`](crate::EngineBuilder),
//! or loaded from TOML:
//!
//! ```toml
//! regex_cache_capacity = 512
//! condition_errors = "no_match"
//! ```

use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of compiled regex patterns kept by the engine
pub const DEFAULT_REGEX_CACHE_CAPACITY: usize = 256;

/// What a condition error (missing attribute, type mismatch, bad operator) does
/// to the final decision
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionErrorMode {
    /// Return the error unless a Deny short-circuits evaluation, even when
    /// another statement allowed
    #[default]
    Surface,
    /// Treat the failing statement as not matching
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Compiled regex patterns to keep; 0 compiles on every use
    pub regex_cache_capacity: usize,
    pub condition_errors: ConditionErrorMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            regex_cache_capacity: DEFAULT_REGEX_CACHE_CAPACITY,
            condition_errors: ConditionErrorMode::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AbacError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }
}
