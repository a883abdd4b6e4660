//! Policy statements
//!
//! A statement gates a request on three things, in order: the resource, the
//! action and the conditions. Only when all three pass does its effect apply.

use super::attribute::AttributeSet;
use super::condition::{Condition, ConditionSet};
use super::pattern::{match_patterns_with, MatchStrategy, RegexMatcher, Uncached};
use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Effect of a matching statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Effect {
    Allow,
    /// Takes precedence over any Allow in the same policy set
    Deny,
}

impl Effect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::Allow => "allow",
            Effect::Deny => "deny",
        }
    }
}

impl FromStr for Effect {
    type Err = AbacError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("allow") {
            Ok(Effect::Allow)
        } else if s.eq_ignore_ascii_case("deny") {
            Ok(Effect::Deny)
        } else {
            Err(AbacError::InvalidEffect(s.to_string()))
        }
    }
}

impl TryFrom<String> for Effect {
    type Error = AbacError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Effect> for String {
    fn from(effect: Effect) -> Self {
        effect.as_str().to_string()
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete object a request targets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: String,
    pub resource_name: String,
}

impl Resource {
    pub fn new(resource_type: impl Into<String>, resource_name: impl Into<String>) -> Self {
        Resource {
            resource_type: resource_type.into(),
            resource_name: resource_name.into(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.resource_type, self.resource_name)
    }
}

/// Resource filter: exact type plus name patterns
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMatcher {
    pub resource_type: String,
    #[serde(default)]
    pub resource_names: Vec<String>,
    #[serde(default)]
    pub compare_func: MatchStrategy,
}

impl ResourceMatcher {
    pub fn new<S: Into<String>>(
        resource_type: impl Into<String>,
        resource_names: impl IntoIterator<Item = S>,
    ) -> Self {
        ResourceMatcher {
            resource_type: resource_type.into(),
            resource_names: resource_names.into_iter().map(Into::into).collect(),
            compare_func: MatchStrategy::Glob,
        }
    }

    /// # Examples
    /// ```
    /// use abac_rs::abac::{Resource, ResourceMatcher};
    ///
    /// let docs = ResourceMatcher::new("doc", ["a*"]);
    /// assert!(docs.matches(&Resource::new("doc", "abc")));
    /// assert!(!docs.matches(&Resource::new("file", "abc")));
    /// ```
    pub fn matches(&self, resource: &Resource) -> bool {
        self.matches_with(resource, &Uncached)
    }

    pub fn matches_with(&self, resource: &Resource, regex: &dyn RegexMatcher) -> bool {
        resource.resource_type == self.resource_type
            && match_patterns_with(
                &self.resource_names,
                &resource.resource_name,
                self.compare_func,
                regex,
            )
    }
}

/// Outcome of validating one statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Allow,
    Deny,
    /// The statement has no opinion on this request
    NoMatch,
}

/// A single policy statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(flatten)]
    pub resources: ResourceMatcher,

    pub effect: Effect,

    /// Matched by exact equality, never as patterns
    pub actions: Vec<String>,

    #[serde(default)]
    pub conditions: ConditionSet,
}

impl Statement {
    pub fn new<S: Into<String>>(
        effect: Effect,
        actions: impl IntoIterator<Item = S>,
        resources: ResourceMatcher,
    ) -> Self {
        Statement {
            resources,
            effect,
            actions: actions.into_iter().map(Into::into).collect(),
            conditions: ConditionSet::default(),
        }
    }

    pub fn allow<S: Into<String>>(actions: impl IntoIterator<Item = S>, resources: ResourceMatcher) -> Self {
        Self::new(Effect::Allow, actions, resources)
    }

    pub fn deny<S: Into<String>>(actions: impl IntoIterator<Item = S>, resources: ResourceMatcher) -> Self {
        Self::new(Effect::Deny, actions, resources)
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Change how resource names are matched (glob by default)
    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.resources.compare_func = strategy;
        self
    }

    pub fn applies_to_action(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a == action)
    }

    pub fn validate(&self, action: &str, resource: &Resource, attributes: &AttributeSet) -> Result<Verdict> {
        self.validate_with(action, resource, attributes, &Uncached)
    }

    /// Validate the request against this statement
    ///
    /// A condition error means the statement could not decide; it is returned
    /// rather than folded into [`Verdict::NoMatch`] so the caller can report it.
    pub fn validate_with(
        &self,
        action: &str,
        resource: &Resource,
        attributes: &AttributeSet,
        regex: &dyn RegexMatcher,
    ) -> Result<Verdict> {
        if !self.resources.matches_with(resource, regex) {
            trace!("Statement skipped: resource {} not matched", resource);
            return Ok(Verdict::NoMatch);
        }

        if !self.applies_to_action(action) {
            trace!("Statement skipped: action {} not listed", action);
            return Ok(Verdict::NoMatch);
        }

        if !self.conditions.judge_with(attributes, regex)? {
            trace!("Statement skipped: conditions not met");
            return Ok(Verdict::NoMatch);
        }

        Ok(match self.effect {
            Effect::Deny => Verdict::Deny,
            Effect::Allow => Verdict::Allow,
        })
    }
}
