//! Policies and policy sets
//!
//! Both levels combine their children with the same deny-overrides rule:
//! - a Deny from any child stops evaluation immediately
//! - otherwise at least one Allow is needed
//! - no opinion from any child leaves the request unmatched (denied by the engine)

use super::attribute::AttributeSet;
use super::pattern::{RegexMatcher, Uncached};
use super::request::TraceEntry;
use super::statement::{Resource, Statement, Verdict};
use crate::config::ConditionErrorMode;
use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Subject an ABAC permission is attached to
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
    pub subject_type: String,
    pub subject: String,
}

impl Identity {
    pub fn new(subject_type: impl Into<String>, subject: impl Into<String>) -> Self {
        Identity {
            subject_type: subject_type.into(),
            subject: subject.into(),
        }
    }
}

/// Association of a policy with an identity
///
/// Plain record for callers that store grants; evaluation never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    #[serde(flatten)]
    pub policy: Policy,
    #[serde(flatten)]
    pub identity: Identity,
}

/// Per-call evaluation state shared by every level of the policy tree
pub struct Evaluation<'a> {
    regex: &'a dyn RegexMatcher,
    mode: ConditionErrorMode,
    trace: Option<Vec<TraceEntry>>,
}

impl<'a> Evaluation<'a> {
    pub fn new(regex: &'a dyn RegexMatcher, mode: ConditionErrorMode) -> Self {
        Evaluation {
            regex,
            mode,
            trace: None,
        }
    }

    /// Record every statement outcome
    pub fn traced(mut self) -> Self {
        self.trace = Some(Vec::new());
        self
    }

    pub fn into_trace(self) -> Vec<TraceEntry> {
        self.trace.unwrap_or_default()
    }

    fn record(&mut self, policy: &Policy, statement: usize, outcome: &Result<Verdict>) {
        if let Some(trace) = self.trace.as_mut() {
            trace.push(TraceEntry {
                policy_id: policy.id,
                policy_name: policy.name.clone(),
                statement,
                outcome: outcome.clone(),
            });
        }
    }
}

impl Default for Evaluation<'static> {
    fn default() -> Self {
        Evaluation::new(&Uncached, ConditionErrorMode::default())
    }
}

/// Anything the engine can evaluate a request against
pub trait Evaluate {
    fn evaluate_in(
        &self,
        action: &str,
        resource: &Resource,
        attributes: &AttributeSet,
        eval: &mut Evaluation<'_>,
    ) -> Result<Verdict>;
}

/// Deny-overrides reduction over an ordered list of children
///
/// Child errors are remembered (last one wins) and returned when no Deny cuts
/// evaluation short, unless `mode` folds them into no-match.
fn deny_overrides<T>(
    children: &[T],
    mode: ConditionErrorMode,
    mut eval: impl FnMut(&T) -> Result<Verdict>,
) -> Result<Verdict> {
    let mut allowed = false;
    let mut pending: Option<AbacError> = None;

    for child in children {
        match eval(child) {
            // Explicit deny - stop here
            Ok(Verdict::Deny) => return Ok(Verdict::Deny),
            Ok(Verdict::Allow) => allowed = true,
            Ok(Verdict::NoMatch) => {}
            Err(err) => match mode {
                ConditionErrorMode::Surface => pending = Some(err),
                ConditionErrorMode::NoMatch => {
                    debug!("Condition error treated as no match: {}", err);
                }
            },
        }
    }

    match pending {
        Some(err) => Err(err),
        None if allowed => Ok(Verdict::Allow),
        None => Ok(Verdict::NoMatch),
    }
}

/// A named, ordered list of statements
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Set when the policy was produced by tooling rather than written by hand
    #[serde(default)]
    pub generated: bool,
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl Policy {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Policy {
            id,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_statement(mut self, statement: Statement) -> Self {
        self.statements.push(statement);
        self
    }

    pub fn add_statement(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Evaluate with uncached regexes and surfaced condition errors
    pub fn allow(&self, action: &str, resource: &Resource, attributes: &AttributeSet) -> Result<Verdict> {
        self.evaluate_in(action, resource, attributes, &mut Evaluation::default())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate policy structure
    pub fn validate(&self) -> Result<()> {
        if self.statements.is_empty() {
            return Err(AbacError::InvalidPolicy(format!(
                "policy {} must have at least one statement",
                self.id
            )));
        }

        for (i, stmt) in self.statements.iter().enumerate() {
            if stmt.actions.is_empty() {
                return Err(AbacError::InvalidPolicy(format!(
                    "policy {} statement {} has no actions",
                    self.id, i
                )));
            }
            if stmt.resources.resource_type.is_empty() {
                return Err(AbacError::InvalidPolicy(format!(
                    "policy {} statement {} has no resource type",
                    self.id, i
                )));
            }
            if stmt.resources.resource_names.is_empty() {
                return Err(AbacError::InvalidPolicy(format!(
                    "policy {} statement {} has no resource names",
                    self.id, i
                )));
            }
        }

        Ok(())
    }
}

impl Evaluate for Policy {
    fn evaluate_in(
        &self,
        action: &str,
        resource: &Resource,
        attributes: &AttributeSet,
        eval: &mut Evaluation<'_>,
    ) -> Result<Verdict> {
        let mut index = 0;
        let mode = eval.mode;
        deny_overrides(&self.statements, mode, |statement| {
            let outcome = statement.validate_with(action, resource, attributes, eval.regex);
            trace!("Policy {} statement {} -> {:?}", self.id, index, outcome);
            eval.record(self, index, &outcome);
            index += 1;
            outcome
        })
    }
}

/// Ordered collection of policies evaluated as one tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PolicySet {
    policies: Vec<Policy>,
}

impl PolicySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, policy: Policy) {
        self.policies.push(policy);
    }

    pub fn with(mut self, policy: Policy) -> Self {
        self.policies.push(policy);
        self
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Policy> {
        self.policies.iter()
    }

    pub fn allow(&self, action: &str, resource: &Resource, attributes: &AttributeSet) -> Result<Verdict> {
        self.evaluate_in(action, resource, attributes, &mut Evaluation::default())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.policies.iter().try_for_each(Policy::validate)
    }
}

impl Evaluate for PolicySet {
    fn evaluate_in(
        &self,
        action: &str,
        resource: &Resource,
        attributes: &AttributeSet,
        eval: &mut Evaluation<'_>,
    ) -> Result<Verdict> {
        let mode = eval.mode;
        deny_overrides(&self.policies, mode, |policy| {
            policy.evaluate_in(action, resource, attributes, eval)
        })
    }
}

impl From<Vec<Policy>> for PolicySet {
    fn from(policies: Vec<Policy>) -> Self {
        PolicySet { policies }
    }
}

impl FromIterator<Policy> for PolicySet {
    fn from_iter<I: IntoIterator<Item = Policy>>(iter: I) -> Self {
        PolicySet {
            policies: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PolicySet {
    type Item = &'a Policy;
    type IntoIter = std::slice::Iter<'a, Policy>;

    fn into_iter(self) -> Self::IntoIter {
        self.policies.iter()
    }
}
