use indexmap::IndexMap;

use serde::Serialize;

/// Resolved value of one requested field
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Formatted value of a plain field
    Text(String),
    /// Values of the record a many-to-one field points at
    Record(ValueTree),
    /// Values of each record a one-to-many or many-to-many field points at
    Records(Vec<ValueTree>),
}

/// Formatted field values of one record, mirroring the requested key tree & its order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueTree(IndexMap<String, FieldValue>);

impl ValueTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        self.0.insert(name.into(), value);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
