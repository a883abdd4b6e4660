//! Requests, decisions and evaluation reports

use super::attribute::{Attribute, AttributeSet};
use super::statement::{Resource, Verdict};
use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An authorization request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub action: String,
    pub resource: Resource,
    #[serde(default)]
    pub attributes: AttributeSet,
}

impl Request {
    pub fn new(action: impl Into<String>, resource: Resource) -> Self {
        Request {
            action: action.into(),
            resource,
            attributes: AttributeSet::new(),
        }
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.insert(attribute);
        self
    }

    pub fn with_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        for attribute in attributes {
            self.attributes.insert(attribute);
        }
        self
    }
}

/// Why a request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// A matching statement has effect Deny
    ExplicitDeny,
    /// No statement allowed the request
    NoMatchingStatement,
}

/// Final authorization decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Allowed,
    Denied(DenyReason),
}

impl Decision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Decision::Allowed)
    }
}

impl From<Verdict> for Decision {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Allow => Decision::Allowed,
            Verdict::Deny => Decision::Denied(DenyReason::ExplicitDeny),
            Verdict::NoMatch => Decision::Denied(DenyReason::NoMatchingStatement),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allowed => f.write_str("allowed"),
            Decision::Denied(DenyReason::ExplicitDeny) => f.write_str("denied by statement"),
            Decision::Denied(DenyReason::NoMatchingStatement) => {
                f.write_str("denied: no matching statement")
            }
        }
    }
}

/// Outcome of one statement during a traced evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub policy_id: u64,
    pub policy_name: String,
    /// Index of the statement within its policy
    pub statement: usize,
    pub outcome: Result<Verdict>,
}

/// Decision plus the statements that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationReport {
    pub decision: Result<Decision>,
    pub trace: Vec<TraceEntry>,
}

impl EvaluationReport {
    /// Statements that matched with the given verdict
    pub fn matched(&self, verdict: Verdict) -> impl Iterator<Item = &TraceEntry> {
        self.trace
            .iter()
            .filter(move |entry| entry.outcome.as_ref().ok() == Some(&verdict))
    }

    /// Condition errors hit while evaluating, including ones that did not change the decision
    pub fn errors(&self) -> impl Iterator<Item = &AbacError> {
        self.trace.iter().filter_map(|entry| entry.outcome.as_ref().err())
    }
}
