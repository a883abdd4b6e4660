//! String pattern matching for resource names and conditions
//!
//! Supports:
//! - Glob patterns where `*` matches any run of characters (e.g. `doc-*-final`)
//! - Unanchored regular expressions
//! - Exact equality

use serde::{Deserialize, Serialize};
use tracing::warn;

const GLOB: &str = "*";

/// Match `subject` against a `*` glob pattern
///
/// # Examples
/// ```
/// use abac_rs::abac::glob_match;
///
/// assert!(glob_match("a*c", "abc"));
/// assert!(glob_match("*", ""));
/// assert!(!glob_match("a*c", "ab"));
/// ```
pub fn glob_match(pattern: &str, subject: &str) -> bool {
    // Empty pattern only matches an empty subject
    if pattern.is_empty() {
        return subject.is_empty();
    }

    if pattern == GLOB {
        return true;
    }

    let parts: Vec<&str> = pattern.split(GLOB).collect();
    if parts.len() == 1 {
        return subject == pattern;
    }

    let leading_glob = pattern.starts_with(GLOB);
    let trailing_glob = pattern.ends_with(GLOB);
    let end = parts.len() - 1;

    let mut rest = subject;
    for (i, part) in parts[..end].iter().enumerate() {
        let idx = match rest.find(part) {
            Some(idx) => idx,
            None => return false,
        };

        // First segment must anchor at the start unless the pattern opens with *
        if i == 0 && !leading_glob && idx != 0 {
            return false;
        }

        rest = &rest[idx + part.len()..];
    }

    trailing_glob || rest.ends_with(parts[end])
}

/// Unanchored regex search; a malformed pattern never matches
pub fn regex_match(pattern: &str, subject: &str) -> bool {
    match regex::Regex::new(pattern) {
        Ok(re) => re.is_match(subject),
        Err(err) => {
            warn!("Ignoring malformed regex pattern {:?}: {}", pattern, err);
            false
        }
    }
}

pub fn exact_match(pattern: &str, subject: &str) -> bool {
    pattern == subject
}

/// Source of regex matching, so callers can plug in a compiled-pattern cache
pub trait RegexMatcher {
    fn is_match(&self, pattern: &str, subject: &str) -> bool;
}

/// Compiles every pattern on use
#[derive(Debug, Clone, Copy, Default)]
pub struct Uncached;

impl RegexMatcher for Uncached {
    fn is_match(&self, pattern: &str, subject: &str) -> bool {
        regex_match(pattern, subject)
    }
}

/// How a resource matcher compares its name patterns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStrategy {
    #[default]
    Glob,
    Exact,
    Regex,
}

impl MatchStrategy {
    pub fn matches(&self, pattern: &str, subject: &str, regex: &dyn RegexMatcher) -> bool {
        match self {
            MatchStrategy::Glob => glob_match(pattern, subject),
            MatchStrategy::Exact => exact_match(pattern, subject),
            MatchStrategy::Regex => regex.is_match(pattern, subject),
        }
    }
}

/// True if `subject` matches at least one of `patterns`
pub fn match_patterns<S: AsRef<str>>(patterns: &[S], subject: &str, strategy: MatchStrategy) -> bool {
    match_patterns_with(patterns, subject, strategy, &Uncached)
}

pub fn match_patterns_with<S: AsRef<str>>(
    patterns: &[S],
    subject: &str,
    strategy: MatchStrategy,
    regex: &dyn RegexMatcher,
) -> bool {
    patterns
        .iter()
        .any(|pattern| strategy.matches(pattern.as_ref(), subject, regex))
}
