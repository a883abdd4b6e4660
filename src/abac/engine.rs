//! Policy evaluation engine with deny precedence
//!
//! Evaluates a request against a policy tree and turns the combined verdict
//! into a [`Decision`]. Key features:
//! - Explicit deny takes precedence over allow, anywhere in the tree
//! - Fail-closed: no matching Allow means Denied
//! - Compiled regex patterns are cached across evaluations
//! - Condition errors are surfaced or folded into no-match, per configuration

use super::attribute::{Attribute, AttributeSet};
use super::cache::RegexCache;
use super::policy::{Evaluate, Evaluation, PolicySet};
use super::request::{Decision, EvaluationReport, Request};
use super::statement::Resource;
use crate::config::{ConditionErrorMode, EngineConfig};
use crate::error::Result;
use tracing::debug;

/// Policy evaluation engine
///
/// Holds no policy state; the same engine can evaluate any number of policy
/// sets concurrently.
#[derive(Debug)]
pub struct PolicyEngine {
    config: EngineConfig,
    regex: RegexCache,
}

impl PolicyEngine {
    pub fn new(config: EngineConfig) -> Self {
        PolicyEngine {
            regex: RegexCache::new(config.regex_cache_capacity),
            config,
        }
    }

    /// Create an engine with the default configuration
    pub fn new_default() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate whether `request` is allowed by `policies`
    ///
    /// # Returns
    ///
    /// `Ok(Decision::Allowed)` when at least one statement allows and none denies,
    /// `Ok(Decision::Denied(_))` otherwise, or the condition error that kept the
    /// engine from deciding (see [`ConditionErrorMode`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use abac_rs::abac::{Policy, PolicyEngine, Request, Resource, ResourceMatcher, Statement};
    /// use abac_rs::Decision;
    ///
    /// let engine = PolicyEngine::new_default();
    /// let policy = Policy::new(1, "readers")
    ///     .with_statement(Statement::allow(["read"], ResourceMatcher::new("doc", ["*"])));
    ///
    /// let request = Request::new("read", Resource::new("doc", "x"));
    /// assert_eq!(engine.evaluate(&policy, &request).unwrap(), Decision::Allowed);
    ///
    /// let request = Request::new("write", Resource::new("doc", "x"));
    /// assert!(!engine.evaluate(&policy, &request).unwrap().is_allowed());
    /// ```
    pub fn evaluate<P: Evaluate + ?Sized>(&self, policies: &P, request: &Request) -> Result<Decision> {
        let mut eval = Evaluation::new(&self.regex, self.config.condition_errors);
        self.run(policies, request, &mut eval)
    }

    /// Evaluate and keep the outcome of every statement that was considered
    pub fn evaluate_with_report<P: Evaluate + ?Sized>(
        &self,
        policies: &P,
        request: &Request,
    ) -> EvaluationReport {
        let mut eval = Evaluation::new(&self.regex, self.config.condition_errors).traced();
        let decision = self.run(policies, request, &mut eval);
        EvaluationReport {
            decision,
            trace: eval.into_trace(),
        }
    }

    fn run<P: Evaluate + ?Sized>(
        &self,
        policies: &P,
        request: &Request,
        eval: &mut Evaluation<'_>,
    ) -> Result<Decision> {
        let verdict = policies
            .evaluate_in(&request.action, &request.resource, &request.attributes, eval)
            .map_err(|err| {
                debug!(
                    "Evaluation of {} on {} failed: {}",
                    request.action, request.resource, err
                );
                err
            })?;

        let decision = Decision::from(verdict);
        debug!(
            "Request {} on {}: {}",
            request.action, request.resource, decision
        );
        Ok(decision)
    }

    /// Drop all compiled patterns
    pub fn clear_cache(&self) {
        self.regex.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.regex.len()
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new_default()
    }
}

/// Evaluate a single request with a default engine
///
/// Convenience for one-off checks; long-lived callers should keep a
/// [`PolicyEngine`] so compiled patterns are reused.
pub fn evaluate(
    action: &str,
    resource: Resource,
    attributes: impl IntoIterator<Item = Attribute>,
    policies: &PolicySet,
) -> Result<Decision> {
    let request = Request {
        action: action.to_string(),
        resource,
        attributes: attributes.into_iter().collect::<AttributeSet>(),
    };
    PolicyEngine::new(EngineConfig {
        regex_cache_capacity: 0,
        ..EngineConfig::default()
    })
    .evaluate(policies, &request)
}

/// Builder for customizing engine creation
///
/// # Examples
///
/// ```
/// use abac_rs::{ConditionErrorMode, EngineBuilder};
///
/// let engine = EngineBuilder::new()
///     .regex_cache_capacity(64)
///     .condition_errors(ConditionErrorMode::NoMatch)
///     .build();
/// assert_eq!(engine.config().regex_cache_capacity, 64);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from TOML
    pub fn from_config(config: EngineConfig) -> Self {
        EngineBuilder { config }
    }

    /// Number of compiled regex patterns to keep (0 disables caching)
    pub fn regex_cache_capacity(mut self, capacity: usize) -> Self {
        self.config.regex_cache_capacity = capacity;
        self
    }

    pub fn condition_errors(mut self, mode: ConditionErrorMode) -> Self {
        self.config.condition_errors = mode;
        self
    }

    pub fn build(self) -> PolicyEngine {
        debug!("Building policy engine with {:?}", self.config);
        PolicyEngine::new(self.config)
    }
}
