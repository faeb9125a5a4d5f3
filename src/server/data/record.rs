use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
};

pub struct RecordRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecordRepository<'a, C> {
    /// Creates a new instance of [`RecordRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        model: &str,
        field_values: serde_json::Value,
    ) -> Result<entity::data_record::Model, DbErr> {
        let record = entity::data_record::ActiveModel {
            model: ActiveValue::Set(model.to_string()),
            field_values: ActiveValue::Set(field_values),
            ..Default::default()
        };

        record.insert(self.db).await
    }

    /// Gets a record of the model, records of other models are not returned
    pub async fn get(
        &self,
        model: &str,
        record_id: i32,
    ) -> Result<Option<entity::data_record::Model>, DbErr> {
        entity::prelude::DataRecord::find_by_id(record_id)
            .filter(entity::data_record::Column::Model.eq(model))
            .one(self.db)
            .await
    }

}
