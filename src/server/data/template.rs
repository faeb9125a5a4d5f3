use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, QueryOrder,
};

pub struct TemplateRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TemplateRepository<'a, C> {
    /// Creates a new instance of [`TemplateRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        model: &str,
        mimetype: &str,
        attachment_id: Option<i32>,
    ) -> Result<entity::template::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let template = entity::template::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            model: ActiveValue::Set(model.to_string()),
            attachment_id: ActiveValue::Set(attachment_id),
            mimetype: ActiveValue::Set(mimetype.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        template.insert(self.db).await
    }

    pub async fn get(&self, template_id: i32) -> Result<Option<entity::template::Model>, DbErr> {
        entity::prelude::Template::find_by_id(template_id)
            .one(self.db)
            .await
    }

    /// Lists templates, most recently updated first
    pub async fn list(&self) -> Result<Vec<entity::template::Model>, DbErr> {
        entity::prelude::Template::find()
            .order_by_desc(entity::template::Column::UpdatedAt)
            .order_by_desc(entity::template::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update_name(
        &self,
        template_id: i32,
        name: &str,
    ) -> Result<Option<entity::template::Model>, DbErr> {
        let template = match self.get(template_id).await? {
            Some(template) => template,
            None => return Ok(None),
        };

        let mut template_am: entity::template::ActiveModel = template.into();
        template_am.name = ActiveValue::Set(name.to_string());
        template_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(template_am.update(self.db).await?))
    }

    /// Points the template at another stored file
    pub async fn set_attachment(
        &self,
        template_id: i32,
        attachment_id: i32,
        mimetype: &str,
    ) -> Result<Option<entity::template::Model>, DbErr> {
        let template = match self.get(template_id).await? {
            Some(template) => template,
            None => return Ok(None),
        };

        let mut template_am: entity::template::ActiveModel = template.into();
        template_am.attachment_id = ActiveValue::Set(Some(attachment_id));
        template_am.mimetype = ActiveValue::Set(mimetype.to_string());
        template_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(template_am.update(self.db).await?))
    }

    /// Returns whether a template was deleted
    pub async fn delete(&self, template_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Template::delete_by_id(template_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
