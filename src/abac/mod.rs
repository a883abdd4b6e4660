//! Attribute-based access control
//!
//! Provides the evaluation pipeline for ABAC policies:
//! - Typed value comparison (string/number strategies, glob and regex matching)
//! - Condition sets evaluated as conjunctions over request attributes
//! - Statements gated on resource, action and conditions
//! - Deny-overrides aggregation across statements and policies
//! - LRU caching of compiled regex patterns

mod attribute;
mod cache;
mod compare;
mod condition;
mod engine;
mod pattern;
mod policy;
mod request;
mod statement;
mod value;

pub use attribute::{Attribute, AttributeKind, AttributeSet};
pub use cache::RegexCache;
pub use compare::{compare, compare_with, Operator};
pub use condition::{Condition, ConditionSet};
pub use engine::{evaluate, EngineBuilder, PolicyEngine};
pub use pattern::{
    exact_match, glob_match, match_patterns, match_patterns_with, regex_match, MatchStrategy,
    RegexMatcher, Uncached,
};
pub use policy::{Evaluate, Evaluation, Identity, Permission, Policy, PolicySet};
pub use request::{Decision, DenyReason, EvaluationReport, Request, TraceEntry};
pub use statement::{Effect, Resource, ResourceMatcher, Statement, Verdict};
pub use value::{AttributeValue, ValueType};
