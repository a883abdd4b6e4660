//! Condition evaluation for ABAC statements
//!
//! A condition compares one request attribute, addressed by `(kind, key)`, with a
//! literal. A condition set is the conjunction of its items.

use super::attribute::{AttributeKind, AttributeSet};
use super::compare::compare_with;
use super::pattern::{RegexMatcher, Uncached};
use super::value::AttributeValue;
use crate::error::{AbacError, Result};
use serde::{Deserialize, Serialize};

/// A single attribute comparison
///
/// The operator is kept as written by the policy author and resolved at
/// evaluation time, so an unknown operator surfaces as
/// [`AbacError::UnsupportedOperator`] instead of a rejected document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub operator: String,
    pub attribute_type: AttributeKind,
    pub attribute_key: String,
    pub value: AttributeValue,
}

impl Condition {
    pub fn new(
        operator: impl ToString,
        attribute_type: AttributeKind,
        attribute_key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        Condition {
            operator: operator.to_string(),
            attribute_type,
            attribute_key: attribute_key.into(),
            value: value.into(),
        }
    }

    /// Evaluate against `attributes`; the attribute is the origin, the literal the compare value
    pub fn evaluate(&self, attributes: &AttributeSet, regex: &dyn RegexMatcher) -> Result<bool> {
        let attribute = attributes
            .get(self.attribute_type, &self.attribute_key)
            .ok_or_else(|| AbacError::AttributeMissing {
                kind: self.attribute_type,
                key: self.attribute_key.clone(),
            })?;

        compare_with(
            attribute.value_type,
            &self.operator,
            &attribute.value,
            &self.value,
            regex,
        )
    }
}

/// Conjunction of conditions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionSet {
    #[serde(default)]
    pub items: Vec<Condition>,

    /// Reserved for boolean formulas over `items`; never consulted
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub formula: String,
}

impl ConditionSet {
    pub fn new(items: Vec<Condition>) -> Self {
        ConditionSet {
            items,
            formula: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, condition: Condition) {
        self.items.push(condition);
    }

    /// Judge the conjunction, compiling regex patterns on use
    ///
    /// # Examples
    /// ```
    /// use abac_rs::abac::{Attribute, AttributeKind, AttributeSet, Condition, ConditionSet};
    ///
    /// let conditions = ConditionSet::new(vec![
    ///     Condition::new("gte", AttributeKind::Subject, "level", 3_i64),
    /// ]);
    /// let attrs = AttributeSet::new().with(Attribute::subject("level", 5_i64));
    ///
    /// assert!(conditions.judge(&attrs).unwrap());
    /// assert!(ConditionSet::default().judge(&AttributeSet::new()).unwrap());
    /// ```
    pub fn judge(&self, attributes: &AttributeSet) -> Result<bool> {
        self.judge_with(attributes, &Uncached)
    }

    /// Judge the conjunction
    ///
    /// Every item is evaluated even after one judges false, so a missing attribute
    /// or bad operator is reported regardless of item order.
    pub fn judge_with(&self, attributes: &AttributeSet, regex: &dyn RegexMatcher) -> Result<bool> {
        let mut meet = true;
        for condition in &self.items {
            let holds = condition.evaluate(attributes, regex)?;
            meet = meet && holds;
        }
        Ok(meet)
    }
}

impl From<Vec<Condition>> for ConditionSet {
    fn from(items: Vec<Condition>) -> Self {
        ConditionSet::new(items)
    }
}
