use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait};

/// File to store with [`AttachmentRepository::create`]
pub struct NewAttachment<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub mimetype: &'a str,
    pub datas: Vec<u8>,
    pub res_model: &'a str,
    pub res_id: Option<i32>,
}

pub struct AttachmentRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttachmentRepository<'a, C> {
    /// Creates a new instance of [`AttachmentRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        attachment: NewAttachment<'_>,
    ) -> Result<entity::attachment::Model, DbErr> {
        let attachment = entity::attachment::ActiveModel {
            name: ActiveValue::Set(attachment.name.to_string()),
            display_name: ActiveValue::Set(attachment.display_name.to_string()),
            mimetype: ActiveValue::Set(attachment.mimetype.to_string()),
            datas: ActiveValue::Set(attachment.datas),
            res_model: ActiveValue::Set(attachment.res_model.to_string()),
            res_id: ActiveValue::Set(attachment.res_id),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        attachment.insert(self.db).await
    }

    pub async fn get(&self, attachment_id: i32) -> Result<Option<entity::attachment::Model>, DbErr> {
        entity::prelude::Attachment::find_by_id(attachment_id)
            .one(self.db)
            .await
    }

    /// Links the attachment to the record owning it
    pub async fn set_owner(
        &self,
        attachment_id: i32,
        res_id: i32,
    ) -> Result<Option<entity::attachment::Model>, DbErr> {
        let attachment = match self.get(attachment_id).await? {
            Some(attachment) => attachment,
            None => return Ok(None),
        };

        let mut attachment_am: entity::attachment::ActiveModel = attachment.into();
        attachment_am.res_id = ActiveValue::Set(Some(res_id));

        Ok(Some(attachment_am.update(self.db).await?))
    }

    /// Renames the attachment, keeping the file extension of the stored name
    pub async fn rename(
        &self,
        attachment_id: i32,
        display_name: &str,
    ) -> Result<Option<entity::attachment::Model>, DbErr> {
        let attachment = match self.get(attachment_id).await? {
            Some(attachment) => attachment,
            None => return Ok(None),
        };

        let name = match attachment.name.rsplit_once('.') {
            Some((_, extension)) => format!("{}.{}", display_name, extension),
            None => display_name.to_string(),
        };

        let mut attachment_am: entity::attachment::ActiveModel = attachment.into();
        attachment_am.name = ActiveValue::Set(name);
        attachment_am.display_name = ActiveValue::Set(display_name.to_string());

        Ok(Some(attachment_am.update(self.db).await?))
    }

    /// Returns whether an attachment was deleted
    pub async fn delete(&self, attachment_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Attachment::delete_by_id(attachment_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
