//! Field metadata of the records database.
//!
//! [`ModelRegistry`] is a snapshot of every model & field definition, loaded once per request.
//! [`ModelSchema`] & [`FieldDescriptor`] form the field tree offered to the template key picker.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize, Serializer};

/// Type of a field as declared in the records database
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Boolean,
    Integer,
    Float,
    Char,
    Text,
    Monetary,
    Date,
    Datetime,
    Selection,
    Many2one,
    One2many,
    Many2many,
    Binary,
    Html,
    Json,
    /// Any type not known to docfill, values are converted to text as-is
    Other(String),
}

impl FieldKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Char => "char",
            Self::Text => "text",
            Self::Monetary => "monetary",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Selection => "selection",
            Self::Many2one => "many2one",
            Self::One2many => "one2many",
            Self::Many2many => "many2many",
            Self::Binary => "binary",
            Self::Html => "html",
            Self::Json => "json",
            Self::Other(kind) => kind,
        }
    }

    /// Whether the field points at records of another model
    pub fn is_relational(&self) -> bool {
        matches!(self, Self::Many2one | Self::One2many | Self::Many2many)
    }

    /// Binary, rich-text & structured values can't be used as template keys
    pub fn is_opaque(&self) -> bool {
        matches!(self, Self::Binary | Self::Html | Self::Json)
    }
}

impl From<&str> for FieldKind {
    fn from(kind: &str) -> Self {
        match kind {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "float" => Self::Float,
            "char" => Self::Char,
            "text" => Self::Text,
            "monetary" => Self::Monetary,
            "date" => Self::Date,
            "datetime" => Self::Datetime,
            "selection" => Self::Selection,
            "many2one" => Self::Many2one,
            "one2many" => Self::One2many,
            "many2many" => Self::Many2many,
            "binary" => Self::Binary,
            "html" => Self::Html,
            "json" => Self::Json,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One stored code of a selection field and its labels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOption {
    pub value: String,
    pub label: String,
    /// Labels keyed by locale, e.g. `fr_FR`
    #[serde(default)]
    pub translations: HashMap<String, String>,
}

impl SelectionOption {
    /// Label in the requested locale, falling back to the default label
    pub fn label_for(&self, lang: &str) -> &str {
        self.translations
            .get(lang)
            .map(String::as_str)
            .unwrap_or(self.label.as_str())
    }
}

/// Definition of one field of a model
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDefinition {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub relation: Option<String>,
    pub currency_field: Option<String>,
    pub selection: Vec<SelectionOption>,
    /// Only administrators may read the field
    pub admin_only: bool,
}

/// Definition of one model and its fields in declaration order
#[derive(Clone, Debug, PartialEq)]
pub struct ModelDefinition {
    pub model: String,
    pub description: String,
    pub fields: Vec<FieldDefinition>,
}

impl ModelDefinition {
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Snapshot of all model definitions keyed by technical model name
#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelDefinition>,
}

impl ModelRegistry {
    pub fn new(models: impl IntoIterator<Item = ModelDefinition>) -> Self {
        Self {
            models: models
                .into_iter()
                .map(|definition| (definition.model.clone(), definition))
                .collect(),
        }
    }

    pub fn get(&self, model: &str) -> Option<&ModelDefinition> {
        self.models.get(model)
    }
}

/// A usable template field of a model
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Present exactly for relationship fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_model: Option<String>,
    /// Fields of the related model, absent where expanding it would loop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Arc<ModelSchema>>,
}

/// Field tree of a model
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ModelSchema {
    pub model: String,
    pub description: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}
