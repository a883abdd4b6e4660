//! Typed value comparison
//!
//! Two fixed strategies, selected by [`ValueType`]:
//! - string: lexicographic ordering plus `glob_match` / `regex_match`
//! - number: integer ordering only

use super::pattern::{glob_match, RegexMatcher, Uncached};
use super::value::{AttributeValue, ValueType};
use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Comparison operator used by conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Eq,
    Lt,
    Lte,
    Gt,
    Gte,
    Neq,
    GlobMatch,
    RegexMatch,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Neq => "neq",
            Operator::GlobMatch => "glob_match",
            Operator::RegexMatch => "regex_match",
        }
    }

    /// Ordering operators shared by both strategies
    fn holds(&self, ordering: Ordering) -> Option<bool> {
        let result = match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Lte => ordering != Ordering::Greater,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Gte => ordering != Ordering::Less,
            Operator::Neq => ordering != Ordering::Equal,
            Operator::GlobMatch | Operator::RegexMatch => return None,
        };
        Some(result)
    }
}

impl FromStr for Operator {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" => Ok(Operator::Eq),
            "lt" => Ok(Operator::Lt),
            "lte" => Ok(Operator::Lte),
            "gt" => Ok(Operator::Gt),
            "gte" => Ok(Operator::Gte),
            "neq" => Ok(Operator::Neq),
            "glob_match" => Ok(Operator::GlobMatch),
            "regex_match" => Ok(Operator::RegexMatch),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compare `origin` against `compare` using the strategy named by `value_type`
///
/// For the pattern operators `compare` is the pattern and `origin` the subject.
///
/// # Examples
/// ```
/// use abac_rs::abac::{compare, AttributeValue};
///
/// let five = AttributeValue::Number(5);
/// let three = AttributeValue::Number(3);
/// assert!(compare("number", "gt", &five, &three).unwrap());
/// assert!(compare("number", "eq", &AttributeValue::from("5"), &five).is_err());
/// ```
pub fn compare(
    value_type: &str,
    operator: &str,
    origin: &AttributeValue,
    compare: &AttributeValue,
) -> Result<bool> {
    compare_with(ValueType::from(value_type), operator, origin, compare, &Uncached)
}

/// [`compare`] with an explicit strategy and regex source
pub fn compare_with(
    value_type: ValueType,
    operator: &str,
    origin: &AttributeValue,
    compare: &AttributeValue,
    regex: &dyn RegexMatcher,
) -> Result<bool> {
    match value_type {
        ValueType::String => compare_strings(operator, origin, compare, regex),
        ValueType::Number => compare_numbers(operator, origin, compare),
    }
}

fn mismatch(value_type: ValueType, origin: &AttributeValue, compare: &AttributeValue) -> AbacError {
    AbacError::ValueTypeMismatch {
        value_type: value_type.as_str(),
        origin: origin.type_name(),
        compare: compare.type_name(),
    }
}

fn unsupported(value_type: ValueType, operator: &str) -> AbacError {
    AbacError::UnsupportedOperator {
        operator: operator.to_string(),
        value_type: value_type.as_str(),
    }
}

fn compare_strings(
    operator: &str,
    origin: &AttributeValue,
    compare: &AttributeValue,
    regex: &dyn RegexMatcher,
) -> Result<bool> {
    let (subject, other) = match (origin.as_str(), compare.as_str()) {
        (Some(subject), Some(other)) => (subject, other),
        _ => return Err(mismatch(ValueType::String, origin, compare)),
    };

    let op = Operator::from_str(operator).map_err(|_| unsupported(ValueType::String, operator))?;
    match op {
        Operator::GlobMatch => Ok(glob_match(other, subject)),
        Operator::RegexMatch => Ok(regex.is_match(other, subject)),
        _ => op
            .holds(subject.cmp(other))
            .ok_or_else(|| unsupported(ValueType::String, operator)),
    }
}

fn compare_numbers(operator: &str, origin: &AttributeValue, compare: &AttributeValue) -> Result<bool> {
    let (lhs, rhs) = match (origin.as_number(), compare.as_number()) {
        (Some(lhs), Some(rhs)) => (lhs, rhs),
        _ => return Err(mismatch(ValueType::Number, origin, compare)),
    };

    Operator::from_str(operator)
        .ok()
        .and_then(|op| op.holds(lhs.cmp(&rhs)))
        .ok_or_else(|| unsupported(ValueType::Number, operator))
}
