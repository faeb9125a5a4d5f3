use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, fixtures::factory::FieldSpec, TestContext};

impl TestContext {
    pub fn record<'a>(&'a mut self) -> RecordFixtures<'a> {
        RecordFixtures { test: self }
    }
}

pub struct RecordFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> RecordFixtures<'a> {
    /// Inserts a model & its fields, fields keep the order provided
    pub async fn insert_model(
        &self,
        model: &str,
        description: &str,
        fields: Vec<FieldSpec>,
    ) -> Result<entity::data_model::Model, TestError> {
        let data_model = entity::prelude::DataModel::insert(entity::data_model::ActiveModel {
            model: ActiveValue::Set(model.to_string()),
            description: ActiveValue::Set(description.to_string()),
            ..Default::default()
        })
        .exec_with_returning(&self.test.db)
        .await?;

        for (sequence, field) in fields.into_iter().enumerate() {
            entity::prelude::DataField::insert(entity::data_field::ActiveModel {
                model: ActiveValue::Set(model.to_string()),
                name: ActiveValue::Set(field.name),
                label: ActiveValue::Set(field.label),
                kind: ActiveValue::Set(field.kind),
                relation: ActiveValue::Set(field.relation),
                currency_field: ActiveValue::Set(field.currency_field),
                selection: ActiveValue::Set(field.selection),
                admin_only: ActiveValue::Set(field.admin_only),
                sequence: ActiveValue::Set(sequence as i32 * 10),
                ..Default::default()
            })
            .exec(&self.test.db)
            .await?;
        }

        Ok(data_model)
    }

    pub async fn insert_record(
        &self,
        model: &str,
        values: serde_json::Value,
    ) -> Result<entity::data_record::Model, TestError> {
        Ok(
            entity::prelude::DataRecord::insert(entity::data_record::ActiveModel {
                model: ActiveValue::Set(model.to_string()),
                field_values: ActiveValue::Set(values),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }
}
