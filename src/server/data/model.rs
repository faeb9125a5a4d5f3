use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::field::{
    FieldDefinition, FieldKind, ModelDefinition, ModelRegistry, SelectionOption,
};

/// Field to create with [`DataModelRepository::create_field`]
pub struct NewField<'a> {
    pub name: &'a str,
    pub label: &'a str,
    pub kind: &'a str,
    pub relation: Option<&'a str>,
    pub currency_field: Option<&'a str>,
    pub selection: Option<serde_json::Value>,
    pub admin_only: bool,
    pub sequence: i32,
}

pub struct DataModelRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DataModelRepository<'a, C> {
    /// Creates a new instance of [`DataModelRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_model(
        &self,
        model: &str,
        description: &str,
    ) -> Result<entity::data_model::Model, DbErr> {
        let data_model = entity::data_model::ActiveModel {
            model: ActiveValue::Set(model.to_string()),
            description: ActiveValue::Set(description.to_string()),
            ..Default::default()
        };

        data_model.insert(self.db).await
    }

    pub async fn create_field(
        &self,
        model: &str,
        field: NewField<'_>,
    ) -> Result<entity::data_field::Model, DbErr> {
        let data_field = entity::data_field::ActiveModel {
            model: ActiveValue::Set(model.to_string()),
            name: ActiveValue::Set(field.name.to_string()),
            label: ActiveValue::Set(field.label.to_string()),
            kind: ActiveValue::Set(field.kind.to_string()),
            relation: ActiveValue::Set(field.relation.map(str::to_string)),
            currency_field: ActiveValue::Set(field.currency_field.map(str::to_string)),
            selection: ActiveValue::Set(field.selection),
            admin_only: ActiveValue::Set(field.admin_only),
            sequence: ActiveValue::Set(field.sequence),
            ..Default::default()
        };

        data_field.insert(self.db).await
    }

    pub async fn get(&self, model: &str) -> Result<Option<entity::data_model::Model>, DbErr> {
        entity::prelude::DataModel::find()
            .filter(entity::data_model::Column::Model.eq(model))
            .one(self.db)
            .await
    }

    /// Loads every model with its fields in declaration order
    pub async fn load_registry(&self) -> Result<ModelRegistry, DbErr> {
        let models = entity::prelude::DataModel::find().all(self.db).await?;
        let fields = entity::prelude::DataField::find()
            .order_by_asc(entity::data_field::Column::Model)
            .order_by_asc(entity::data_field::Column::Sequence)
            .order_by_asc(entity::data_field::Column::Id)
            .all(self.db)
            .await?;

        let mut fields_by_model: HashMap<String, Vec<FieldDefinition>> = HashMap::new();
        for field in fields {
            let model = field.model.clone();
            if let Some(definition) = field_definition(field) {
                fields_by_model.entry(model).or_default().push(definition);
            }
        }

        Ok(ModelRegistry::new(models.into_iter().map(|model| {
            ModelDefinition {
                fields: fields_by_model.remove(&model.model).unwrap_or_default(),
                model: model.model,
                description: model.description,
            }
        })))
    }
}

/// Converts a stored field, dropping relationship fields without a related model
fn field_definition(field: entity::data_field::Model) -> Option<FieldDefinition> {
    let kind = FieldKind::from(field.kind.as_str());

    if kind.is_relational() && field.relation.is_none() {
        tracing::warn!(
            model = %field.model,
            field = %field.name,
            "Skipping {} field without related model",
            kind
        );
        return None;
    }

    let selection = match field.selection {
        Some(options) => serde_json::from_value::<Vec<SelectionOption>>(options).unwrap_or_else(|e| {
            tracing::warn!(
                model = %field.model,
                field = %field.name,
                "Ignoring malformed selection options: {}",
                e
            );
            Vec::new()
        }),
        None => Vec::new(),
    };

    Some(FieldDefinition {
        relation: field.relation.filter(|_| kind.is_relational()),
        name: field.name,
        label: field.label,
        kind,
        currency_field: field.currency_field,
        selection,
        admin_only: field.admin_only,
    })
}
