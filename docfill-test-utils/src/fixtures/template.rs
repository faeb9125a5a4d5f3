use chrono::Utc;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

/// Mimetype of templates created by fixtures
pub static DOCX_MIMETYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl TestContext {
    pub fn template<'a>(&'a mut self) -> TemplateFixtures<'a> {
        TemplateFixtures { test: self }
    }
}

pub struct TemplateFixtures<'a> {
    test: &'a mut TestContext,
}

impl<'a> TemplateFixtures<'a> {
    pub async fn insert_attachment(
        &self,
        name: &str,
        datas: Vec<u8>,
        res_id: Option<i32>,
    ) -> Result<entity::attachment::Model, TestError> {
        Ok(
            entity::prelude::Attachment::insert(entity::attachment::ActiveModel {
                name: ActiveValue::Set(format!("{}.docx", name)),
                display_name: ActiveValue::Set(name.to_string()),
                mimetype: ActiveValue::Set(DOCX_MIMETYPE.to_string()),
                datas: ActiveValue::Set(datas),
                res_model: ActiveValue::Set("docfill.template".to_string()),
                res_id: ActiveValue::Set(res_id),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_template(
        &self,
        name: &str,
        model: &str,
        attachment_id: Option<i32>,
    ) -> Result<entity::template::Model, TestError> {
        let now = Utc::now().naive_utc();
        Ok(
            entity::prelude::Template::insert(entity::template::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                model: ActiveValue::Set(model.to_string()),
                attachment_id: ActiveValue::Set(attachment_id),
                mimetype: ActiveValue::Set(DOCX_MIMETYPE.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Inserts a template with a file attached
    pub async fn insert_template_with_file(
        &self,
        name: &str,
        model: &str,
        datas: Vec<u8>,
    ) -> Result<(entity::template::Model, entity::attachment::Model), TestError> {
        let attachment = self.insert_attachment(name, datas, None).await?;
        let template = self
            .insert_template(name, model, Some(attachment.id))
            .await?;

        Ok((template, attachment))
    }
}
