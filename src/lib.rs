//! # abac-rs - Attribute-Based Access Control
//!
//! `abac-rs` decides whether a request (an action on a resource, plus a bag of
//! subject, resource, action and environment attributes) is allowed by a set of
//! declarative policies.
//!
//! - **Statements** match a resource type and name patterns, an exact action list,
//!   and a conjunction of attribute conditions
//! - **Deny overrides**: a matching Deny anywhere in the policy set wins
//! - **Fail closed**: a request no statement allows is denied
//! - **Typed conditions**: string and number comparisons, glob and regex matching
//!
//! ## Quick Start
//!
//! ```rust
//! use abac_rs::abac::{
//!     Attribute, AttributeKind, Condition, Operator, Policy, PolicyEngine, PolicySet, Request,
//!     Resource, ResourceMatcher, Statement,
//! };
//! use abac_rs::{Decision, DenyReason, Result};
//!
//! # fn main() -> Result<()> {
//! let policies = PolicySet::new().with(
//!     Policy::new(1, "documents")
//!         .with_statement(
//!             Statement::allow(["read"], ResourceMatcher::new("doc", ["*"])).with_condition(
//!                 Condition::new(Operator::Gte, AttributeKind::Subject, "clearance", 2_i64),
//!             ),
//!         )
//!         .with_statement(Statement::deny(["read"], ResourceMatcher::new("doc", ["secret*"]))),
//! );
//!
//! let engine = PolicyEngine::new_default();
//!
//! let request = Request::new("read", Resource::new("doc", "roadmap"))
//!     .with_attribute(Attribute::subject("clearance", 3_i64));
//! assert_eq!(engine.evaluate(&policies, &request)?, Decision::Allowed);
//!
//! let request = Request::new("read", Resource::new("doc", "secret-plans"))
//!     .with_attribute(Attribute::subject("clearance", 3_i64));
//! assert_eq!(
//!     engine.evaluate(&policies, &request)?,
//!     Decision::Denied(DenyReason::ExplicitDeny)
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! PolicyEngine ─► PolicySet ─► Policy ─► Statement ─┬─► ResourceMatcher ─► glob / regex / exact
//!                 (deny-overrides)  (deny-overrides) ├─► action list (exact)
//!                                                    └─► ConditionSet ─► compare
//! ```

pub mod abac;
pub mod config;
pub mod error;

pub use abac::{Decision, DenyReason, EngineBuilder, PolicyEngine};
pub use config::{ConditionErrorMode, EngineConfig};
pub use error::{AbacError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
