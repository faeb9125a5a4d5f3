//! Values of requested template keys.
//!
//! [`ValueResolver`] walks a [`KeyTree`] against a record and the records reachable through
//! its relationship fields, producing the [`ValueTree`] handed to the fill job. Every read is
//! performed as the acting user: records the user may not read and fields restricted to
//! administrators are left out. A record that fails to resolve is logged and left out
//! without affecting its siblings.

pub mod format;

use std::{future::Future, pin::Pin};

use sea_orm::DatabaseConnection;
use serde_json::{Map, Value};

use crate::server::{
    data::record::RecordRepository,
    error::{template::TemplateError, Error},
    model::{
        field::{FieldDefinition, FieldKind, ModelDefinition, ModelRegistry},
        key_tree::{KeyNode, KeyTree},
        user::{AccessOperation, ActingUser},
        value_tree::{FieldValue, ValueTree},
    },
    service::{
        access::AccessService,
        resolver::format::{
            format_boolean, format_date, format_datetime, format_monetary, format_selection,
            format_text, is_absent, referenced_ids,
        },
    },
};

/// Relationship hops followed from the root record
pub const MAX_TRAVERSAL_DEPTH: usize = 4;

/// Many-to-one field holding the currency of monetary fields without an explicit one
pub const DEFAULT_CURRENCY_FIELD: &str = "currency_id";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A readable record with the definition of its model
struct RecordValues<'a> {
    definition: &'a ModelDefinition,
    values: Map<String, Value>,
}

pub struct ValueResolver<'a> {
    db: &'a DatabaseConnection,
    registry: &'a ModelRegistry,
    user: &'a ActingUser,
}

impl<'a> ValueResolver<'a> {
    /// Creates a new instance of [`ValueResolver`]
    pub fn new(
        db: &'a DatabaseConnection,
        registry: &'a ModelRegistry,
        user: &'a ActingUser,
    ) -> Self {
        Self { db, registry, user }
    }

    /// Resolves the requested keys of a record
    ///
    /// # Returns
    /// - `Some(ValueTree)` - Values of the keys that resolved to something
    /// - `None` - The record is missing, unreadable or none of its keys have a value
    pub async fn resolve(&self, model: &str, record_id: i32, keys: &KeyTree) -> Option<ValueTree> {
        self.resolve_record(model, record_id, keys.nodes(), 0).await
    }

    /// Display name of a record, `display_name` falling back to `name`
    pub async fn display_name(&self, model: &str, record_id: i32) -> Option<String> {
        match self.read_record(model, record_id).await {
            Ok(Some(record)) => record_display_name(&record.values),
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(
                    model = %model,
                    record_id = record_id,
                    "Failed to read display name: {}",
                    e
                );
                None
            }
        }
    }

    fn resolve_record<'b>(
        &'b self,
        model: &'b str,
        record_id: i32,
        keys: &'b [KeyNode],
        depth: usize,
    ) -> BoxFuture<'b, Option<ValueTree>> {
        Box::pin(async move {
            if depth > MAX_TRAVERSAL_DEPTH {
                tracing::debug!(
                    model = %model,
                    record_id = record_id,
                    "Not following relationships deeper than {} hops",
                    MAX_TRAVERSAL_DEPTH
                );
                return None;
            }

            let record = match self.read_record(model, record_id).await {
                Ok(Some(record)) => record,
                Ok(None) => return None,
                Err(e) => {
                    tracing::debug!(
                        model = %model,
                        record_id = record_id,
                        "Failed to resolve record: {}",
                        e
                    );
                    return None;
                }
            };

            let mut tree = ValueTree::new();
            for node in keys {
                let Some(field) = record.definition.field(node.name()) else {
                    tracing::debug!(model = %model, "Unknown field {} requested", node.name());
                    continue;
                };

                if field.kind.is_opaque() || (field.admin_only && !self.user.is_admin) {
                    continue;
                }

                let raw = record.values.get(&field.name).unwrap_or(&Value::Null);

                let value = match node {
                    KeyNode::Leaf(_) => self
                        .format_leaf(&record, field, raw)
                        .await
                        .map(FieldValue::Text),
                    KeyNode::Branch { children, .. } => {
                        self.resolve_relation(field, raw, children, depth).await
                    }
                };

                if let Some(value) = value {
                    tree.insert(field.name.clone(), value);
                }
            }

            if tree.is_empty() {
                None
            } else {
                Some(tree)
            }
        })
    }

    async fn resolve_relation(
        &self,
        field: &FieldDefinition,
        raw: &Value,
        children: &[KeyNode],
        depth: usize,
    ) -> Option<FieldValue> {
        let Some(relation) = field.relation.as_deref() else {
            tracing::debug!("Field {} has no related records to expand", field.name);
            return None;
        };

        let ids = referenced_ids(raw);

        match field.kind {
            FieldKind::Many2one => {
                let id = *ids.first()?;

                self.resolve_record(relation, id, children, depth + 1)
                    .await
                    .map(FieldValue::Record)
            }
            _ => {
                let mut records = Vec::with_capacity(ids.len());
                for id in ids {
                    if let Some(tree) = self.resolve_record(relation, id, children, depth + 1).await
                    {
                        records.push(tree);
                    }
                }

                if records.is_empty() {
                    None
                } else {
                    Some(FieldValue::Records(records))
                }
            }
        }
    }

    async fn format_leaf(
        &self,
        record: &RecordValues<'_>,
        field: &FieldDefinition,
        raw: &Value,
    ) -> Option<String> {
        match &field.kind {
            FieldKind::Boolean => Some(format_boolean(raw)),
            FieldKind::Integer
            | FieldKind::Float
            | FieldKind::Char
            | FieldKind::Text
            | FieldKind::Other(_) => format_text(raw),
            FieldKind::Monetary => {
                if is_absent(raw) {
                    return None;
                }

                let currency = self.currency_code(record, field).await;
                format_monetary(raw, currency.as_deref())
            }
            FieldKind::Date => format_date(raw),
            FieldKind::Datetime => format_datetime(raw),
            FieldKind::Selection => format_selection(raw, &field.selection, &self.user.lang),
            FieldKind::Many2one | FieldKind::One2many | FieldKind::Many2many => {
                self.related_display_names(field, raw).await
            }
            FieldKind::Binary | FieldKind::Html | FieldKind::Json => None,
        }
    }

    /// Display name of the currency a monetary field is expressed in
    async fn currency_code(
        &self,
        record: &RecordValues<'_>,
        field: &FieldDefinition,
    ) -> Option<String> {
        let currency_field = field
            .currency_field
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_FIELD);

        let relation = record.definition.field(currency_field)?.relation.as_deref()?;
        let currency_id = *referenced_ids(record.values.get(currency_field)?).first()?;

        self.display_name(relation, currency_id).await
    }

    /// Display names of the related records, comma separated
    async fn related_display_names(&self, field: &FieldDefinition, raw: &Value) -> Option<String> {
        let relation = field.relation.as_deref()?;

        let mut names = Vec::new();
        for id in referenced_ids(raw) {
            if let Some(name) = self.display_name(relation, id).await {
                names.push(name);
            }
        }

        if names.is_empty() {
            None
        } else {
            Some(names.join(", "))
        }
    }

    async fn read_record(
        &self,
        model: &str,
        record_id: i32,
    ) -> Result<Option<RecordValues<'a>>, Error> {
        let definition = self
            .registry
            .get(model)
            .ok_or_else(|| TemplateError::ModelNotFound(model.to_string()))?;

        let access_service = AccessService::new(self.db);
        if !access_service
            .can(self.user, model, AccessOperation::Read)
            .await?
        {
            tracing::debug!(
                user_id = self.user.id,
                model = %model,
                "User may not read records of {}",
                model
            );
            return Ok(None);
        }

        let record_repo = RecordRepository::new(self.db);
        let Some(record) = record_repo.get(model, record_id).await? else {
            return Ok(None);
        };

        match record.field_values {
            Value::Object(values) => Ok(Some(RecordValues { definition, values })),
            other => Err(Error::ParseError(format!(
                "Record ID {} of model {} holds {} instead of field values",
                record_id, model, other
            ))),
        }
    }
}

fn record_display_name(values: &Map<String, Value>) -> Option<String> {
    ["display_name", "name"]
        .iter()
        .filter_map(|key| values.get(*key).and_then(Value::as_str))
        .find(|name| !name.is_empty())
        .map(str::to_string)
}
