//! Field tree offered to the template key picker.
//!
//! Relationship fields expand into the schema of their related model. Each model is resolved
//! at most once per build: later references share the resolved schema, and a reference back
//! to a model still being resolved on the current path is left unexpanded.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::server::{
    error::template::TemplateError,
    model::{
        field::{FieldDescriptor, ModelRegistry, ModelSchema},
        user::ActingUser,
    },
};

/// State of a single schema build
#[derive(Default, Debug)]
pub struct SchemaCache {
    resolved: HashMap<String, Arc<ModelSchema>>,
    in_progress: HashSet<String>,
}

impl SchemaCache {
    pub fn is_resolved(&self, model: &str) -> bool {
        self.resolved.contains_key(model)
    }

    pub fn is_in_progress(&self, model: &str) -> bool {
        self.in_progress.contains(model)
    }
}

pub struct FieldSchemaBuilder<'a> {
    registry: &'a ModelRegistry,
    user: &'a ActingUser,
}

impl<'a> FieldSchemaBuilder<'a> {
    /// Creates a new instance of [`FieldSchemaBuilder`]
    ///
    /// Fields restricted to administrators are left out for other users.
    pub fn new(registry: &'a ModelRegistry, user: &'a ActingUser) -> Self {
        Self { registry, user }
    }

    /// Builds the field tree of a model
    ///
    /// # Returns
    /// - `Ok(Arc<ModelSchema>)` - Usable fields in declaration order
    /// - `Err(TemplateError::ModelNotFound)` - The model is not registered
    pub fn build_schema(&self, model: &str) -> Result<Arc<ModelSchema>, TemplateError> {
        let mut cache = SchemaCache::default();

        self.build_with_cache(model, &mut cache)
            .ok_or_else(|| TemplateError::ModelNotFound(model.to_string()))
    }

    /// Builds the field tree of a model, sharing resolved schemas through `cache`
    ///
    /// Returns `None` for unknown models and for models already being resolved higher up
    /// the current path.
    pub fn build_with_cache(
        &self,
        model: &str,
        cache: &mut SchemaCache,
    ) -> Option<Arc<ModelSchema>> {
        if let Some(schema) = cache.resolved.get(model) {
            return Some(schema.clone());
        }

        if cache.in_progress.contains(model) {
            tracing::trace!(model = %model, "Not expanding {} again on the same path", model);
            return None;
        }

        let Some(definition) = self.registry.get(model) else {
            tracing::debug!("Model {} is not registered", model);
            return None;
        };

        cache.in_progress.insert(model.to_string());

        let mut fields = Vec::with_capacity(definition.fields.len());
        for field in &definition.fields {
            if field.kind.is_opaque() || (field.admin_only && !self.user.is_admin) {
                continue;
            }

            let schema = match &field.relation {
                Some(relation) => self.build_with_cache(relation, cache),
                None => None,
            };

            fields.push(FieldDescriptor {
                name: field.name.clone(),
                label: field.label.clone(),
                kind: field.kind.clone(),
                related_model: field.relation.clone(),
                schema,
            });
        }

        cache.in_progress.remove(model);

        let schema = Arc::new(ModelSchema {
            model: definition.model.clone(),
            description: definition.description.clone(),
            fields,
        });
        cache.resolved.insert(model.to_string(), schema.clone());

        Some(schema)
    }
}

#[cfg(test)]
mod tests {
    use crate::server::{
        error::template::TemplateError,
        model::{
            field::{
                FieldDefinition, FieldKind, ModelDefinition, ModelRegistry, ModelSchema,
            },
            user::ActingUser,
        },
        service::schema::{FieldSchemaBuilder, SchemaCache},
    };

    fn field(name: &str, kind: &str, relation: Option<&str>) -> FieldDefinition {
        FieldDefinition {
            name: name.to_string(),
            label: name.to_string(),
            kind: FieldKind::from(kind),
            relation: relation.map(str::to_string),
            currency_field: None,
            selection: Vec::new(),
            admin_only: false,
        }
    }

    fn model(name: &str, fields: Vec<FieldDefinition>) -> ModelDefinition {
        ModelDefinition {
            model: name.to_string(),
            description: name.to_string(),
            fields,
        }
    }

    fn user(is_admin: bool) -> ActingUser {
        ActingUser {
            id: 1,
            lang: "en_US".to_string(),
            is_admin,
        }
    }

    /// Longest chain of nested schemas below `schema`
    fn depth(schema: &ModelSchema) -> usize {
        schema
            .fields
            .iter()
            .filter_map(|field| field.schema.as_deref())
            .map(|nested| 1 + depth(nested))
            .max()
            .unwrap_or(0)
    }

    /// Expect a relationship cycle to terminate with the cyclic reference left unexpanded
    #[test]
    fn truncates_relationship_cycle() {
        let registry = ModelRegistry::new(vec![
            model(
                "sale.order",
                vec![
                    field("name", "char", None),
                    field("partner_id", "many2one", Some("res.partner")),
                ],
            ),
            model(
                "res.partner",
                vec![
                    field("name", "char", None),
                    field("sale_order_ids", "one2many", Some("sale.order")),
                    field("parent_id", "many2one", Some("res.partner")),
                ],
            ),
        ]);
        let user = user(false);

        let schema = FieldSchemaBuilder::new(&registry, &user)
            .build_schema("sale.order")
            .unwrap();

        let partner = schema.field("partner_id").unwrap();
        assert_eq!(partner.related_model.as_deref(), Some("res.partner"));
        let partner_schema = partner.schema.as_deref().unwrap();

        let orders = partner_schema.field("sale_order_ids").unwrap();
        assert_eq!(orders.related_model.as_deref(), Some("sale.order"));
        assert!(orders.schema.is_none());
        assert!(partner_schema.field("parent_id").unwrap().schema.is_none());
        assert_eq!(depth(&schema), 1);
    }

    /// Expect sibling fields pointing at the same model to share an equal subtree
    #[test]
    fn shares_schema_between_sibling_fields() {
        let registry = ModelRegistry::new(vec![
            model(
                "account.move",
                vec![
                    field("partner_id", "many2one", Some("res.partner")),
                    field("partner_shipping_id", "many2one", Some("res.partner")),
                ],
            ),
            model(
                "res.partner",
                vec![
                    field("name", "char", None),
                    field("country_id", "many2one", Some("res.country")),
                ],
            ),
            model("res.country", vec![field("code", "char", None)]),
        ]);
        let user = user(false);

        let schema = FieldSchemaBuilder::new(&registry, &user)
            .build_schema("account.move")
            .unwrap();

        let billing = schema.field("partner_id").unwrap();
        let shipping = schema.field("partner_shipping_id").unwrap();
        assert_eq!(billing.name, "partner_id");
        assert_eq!(shipping.name, "partner_shipping_id");
        assert!(billing.schema.is_some());
        assert_eq!(billing.schema, shipping.schema);
        assert_eq!(depth(&schema), 2);
    }

    /// Expect a model to be expandable again from a sibling branch once resolved
    #[test]
    fn clears_in_progress_marker_after_resolution() {
        let registry = ModelRegistry::new(vec![
            model(
                "sale.order",
                vec![field("partner_id", "many2one", Some("res.partner"))],
            ),
            model("res.partner", vec![field("name", "char", None)]),
        ]);
        let user = user(false);
        let builder = FieldSchemaBuilder::new(&registry, &user);
        let mut cache = SchemaCache::default();

        builder.build_with_cache("sale.order", &mut cache).unwrap();

        assert!(cache.is_resolved("res.partner"));
        assert!(!cache.is_in_progress("res.partner"));
        assert!(!cache.is_in_progress("sale.order"));
    }

    /// Expect binary, rich-text & structured fields to be excluded, order otherwise kept
    #[test]
    fn excludes_opaque_fields() {
        let registry = ModelRegistry::new(vec![model(
            "res.partner",
            vec![
                field("name", "char", None),
                field("image_1920", "binary", None),
                field("comment", "html", None),
                field("properties", "json", None),
                field("active", "boolean", None),
            ],
        )]);
        let user = user(false);

        let schema = FieldSchemaBuilder::new(&registry, &user)
            .build_schema("res.partner")
            .unwrap();

        let names: Vec<&str> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "active"]);
    }

    #[test]
    fn hides_admin_only_fields_from_users() {
        let mut salary = field("salary", "monetary", None);
        salary.admin_only = true;
        let registry = ModelRegistry::new(vec![model(
            "hr.employee",
            vec![field("name", "char", None), salary],
        )]);

        let regular = user(false);
        let schema = FieldSchemaBuilder::new(&registry, &regular)
            .build_schema("hr.employee")
            .unwrap();
        assert!(schema.field("salary").is_none());

        let admin = user(true);
        let schema = FieldSchemaBuilder::new(&registry, &admin)
            .build_schema("hr.employee")
            .unwrap();
        assert!(schema.field("salary").is_some());
    }

    #[test]
    fn unknown_model_is_not_found() {
        let registry = ModelRegistry::default();
        let user = user(true);

        let result = FieldSchemaBuilder::new(&registry, &user).build_schema("res.partner");

        assert!(matches!(result, Err(TemplateError::ModelNotFound(model)) if model == "res.partner"));
    }

    /// Expect the tree to serialize with type names & related model only on relationships
    #[test]
    fn serializes_field_tree() {
        let registry = ModelRegistry::new(vec![
            model(
                "sale.order",
                vec![
                    field("name", "char", None),
                    field("partner_id", "many2one", Some("res.partner")),
                ],
            ),
            model("res.partner", vec![field("name", "char", None)]),
        ]);
        let user = user(false);

        let schema = FieldSchemaBuilder::new(&registry, &user)
            .build_schema("sale.order")
            .unwrap();

        assert_eq!(
            serde_json::to_value(&*schema).unwrap(),
            serde_json::json!({
                "model": "sale.order",
                "description": "sale.order",
                "fields": [
                    {"name": "name", "label": "name", "type": "char"},
                    {
                        "name": "partner_id",
                        "label": "partner_id",
                        "type": "many2one",
                        "related_model": "res.partner",
                        "schema": {
                            "model": "res.partner",
                            "description": "res.partner",
                            "fields": [{"name": "name", "label": "name", "type": "char"}]
                        }
                    }
                ]
            })
        );
    }
}
