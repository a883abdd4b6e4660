//! Request attributes and per-request attribute sets

use super::value::{AttributeValue, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which part of the request an attribute describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Subject,
    Resource,
    Action,
    Env,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKind::Subject => "subject",
            AttributeKind::Resource => "resource",
            AttributeKind::Action => "action",
            AttributeKind::Env => "env",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single attribute supplied with a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub kind: AttributeKind,
    pub key: String,
    #[serde(default)]
    pub value_type: ValueType,
    pub value: AttributeValue,
}

impl Attribute {
    /// Create an attribute whose comparison strategy follows its value
    pub fn new(kind: AttributeKind, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        let value = value.into();
        Attribute {
            kind,
            key: key.into(),
            value_type: ValueType::of(&value),
            value,
        }
    }

    pub fn subject(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new(AttributeKind::Subject, key, value)
    }

    pub fn resource(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new(AttributeKind::Resource, key, value)
    }

    pub fn action(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new(AttributeKind::Action, key, value)
    }

    pub fn env(key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self::new(AttributeKind::Env, key, value)
    }

    /// Override the declared value type (e.g. a number stored as a string attribute)
    pub fn with_value_type(mut self, value_type: impl Into<ValueType>) -> Self {
        self.value_type = value_type.into();
        self
    }
}

/// Attributes of one request, keyed by `(kind, key)`
///
/// When the same `(kind, key)` is supplied more than once the last one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Attribute>", into = "Vec<Attribute>")]
pub struct AttributeSet {
    attributes: HashMap<(AttributeKind, String), Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an attribute, returning the one it replaced
    pub fn insert(&mut self, attribute: Attribute) -> Option<Attribute> {
        self.attributes
            .insert((attribute.kind, attribute.key.clone()), attribute)
    }

    pub fn with(mut self, attribute: Attribute) -> Self {
        self.insert(attribute);
        self
    }

    pub fn get(&self, kind: AttributeKind, key: &str) -> Option<&Attribute> {
        self.attributes.get(&(kind, key.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl From<Vec<Attribute>> for AttributeSet {
    fn from(attributes: Vec<Attribute>) -> Self {
        attributes.into_iter().collect()
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.attributes.into_values().collect()
    }
}
