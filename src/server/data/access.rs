use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    QueryFilter,
};

use crate::server::model::user::AccessOperation;

pub struct AccessRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccessRepository<'a, C> {
    /// Creates a new instance of [`AccessRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates an access rule, a rule without user applies to every user
    pub async fn create(
        &self,
        model: &str,
        user_id: Option<i32>,
        perm_read: bool,
        perm_write: bool,
    ) -> Result<entity::model_access::Model, DbErr> {
        let rule = entity::model_access::ActiveModel {
            model: ActiveValue::Set(model.to_string()),
            user_id: ActiveValue::Set(user_id),
            perm_read: ActiveValue::Set(perm_read),
            perm_write: ActiveValue::Set(perm_write),
            ..Default::default()
        };

        rule.insert(self.db).await
    }

    /// Whether any rule for the model grants the operation to the user
    pub async fn has_access(
        &self,
        user_id: i32,
        model: &str,
        operation: AccessOperation,
    ) -> Result<bool, DbErr> {
        let permission = match operation {
            AccessOperation::Read => entity::model_access::Column::PermRead,
            AccessOperation::Write => entity::model_access::Column::PermWrite,
        };

        let rule = entity::prelude::ModelAccess::find()
            .filter(entity::model_access::Column::Model.eq(model))
            .filter(permission.eq(true))
            .filter(
                Condition::any()
                    .add(entity::model_access::Column::UserId.eq(user_id))
                    .add(entity::model_access::Column::UserId.is_null()),
            )
            .one(self.db)
            .await?;

        Ok(rule.is_some())
    }
}
