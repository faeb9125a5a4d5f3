//! Template lifecycle: creation, renaming, file replacement & deletion.
//!
//! Every template owns exactly one attachment holding its document. Template and attachment
//! are always written together inside a transaction.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::template::{TemplateDto, UpdateTemplateDto},
    server::{
        data::{
            attachment::{AttachmentRepository, NewAttachment},
            model::DataModelRepository,
            template::TemplateRepository,
        },
        error::{template::TemplateError, Error},
        model::{
            field::ModelSchema,
            user::{AccessOperation, ActingUser},
        },
        service::{access::AccessService, schema::FieldSchemaBuilder},
    },
};

/// Access rules for templates are declared on this model
pub const TEMPLATE_MODEL: &str = "docfill.template";
/// Access rules for template files are declared on this model
pub const ATTACHMENT_MODEL: &str = "docfill.attachment";

pub const DOCX_MIMETYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Document used for templates created without a file
pub const BLANK_TEMPLATE: &[u8] = include_bytes!("../../../assets/blank.docx");

/// Local file header signature, OOXML documents are zip archives
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

pub struct TemplateService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TemplateService<'a> {
    /// Creates a new instance of [`TemplateService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a template filled from records of `model_name`
    ///
    /// # Arguments
    /// - `file` - Base64 encoded document, the blank document is used when `None`
    ///
    /// # Returns
    /// - `Ok(TemplateDto)` - The created template
    /// - `Err(Error::AuthError)` - The user may not write templates
    /// - `Err(Error::TemplateError)` - Empty name, unknown model or invalid file
    pub async fn create(
        &self,
        user: &ActingUser,
        name: &str,
        model_name: &str,
        file: Option<&str>,
    ) -> Result<TemplateDto, Error> {
        self.ensure(user, AccessOperation::Write).await?;

        let name = validate_name(name)?;
        let datas = match file {
            Some(file) => decode_file(file)?,
            None => BLANK_TEMPLATE.to_vec(),
        };

        if DataModelRepository::new(self.db)
            .get(model_name)
            .await?
            .is_none()
        {
            return Err(TemplateError::ModelNotFound(model_name.to_string()).into());
        }

        let txn = self.db.begin().await?;

        let template_repo = TemplateRepository::new(&txn);
        let template = template_repo
            .create(name, model_name, DOCX_MIMETYPE, None)
            .await?;
        let attachment = create_attachment(&txn, template.id, name, datas).await?;
        let template = template_repo
            .set_attachment(template.id, attachment.id, DOCX_MIMETYPE)
            .await?
            .ok_or(TemplateError::TemplateNotFound(template.id))?;

        txn.commit().await?;

        tracing::debug!(
            template_id = template.id,
            model = %model_name,
            "Created template {:?}",
            template.name
        );

        Ok(template.into())
    }

    pub async fn get(&self, user: &ActingUser, template_id: i32) -> Result<TemplateDto, Error> {
        self.ensure(user, AccessOperation::Read).await?;

        let template = TemplateRepository::new(self.db)
            .get(template_id)
            .await?
            .ok_or(TemplateError::TemplateNotFound(template_id))?;

        Ok(template.into())
    }

    /// Lists templates, most recently updated first
    pub async fn list(&self, user: &ActingUser) -> Result<Vec<TemplateDto>, Error> {
        self.ensure(user, AccessOperation::Read).await?;

        let templates = TemplateRepository::new(self.db).list().await?;

        Ok(templates.into_iter().map(TemplateDto::from).collect())
    }

    /// Applies the changes present in `update` in one transaction, the name first
    ///
    /// Name & file are validated before anything is written, a failed update leaves the
    /// template untouched.
    pub async fn update(
        &self,
        user: &ActingUser,
        template_id: i32,
        update: UpdateTemplateDto,
    ) -> Result<TemplateDto, Error> {
        let template = self.get(user, template_id).await?;

        let name = update.name.as_deref().map(validate_name).transpose()?;
        let datas = update.file.as_deref().map(decode_file).transpose()?;
        if name.is_none() && datas.is_none() {
            return Ok(template);
        }

        self.ensure(user, AccessOperation::Write).await?;

        let txn = self.db.begin().await?;

        let mut template = None;
        if let Some(name) = name {
            template = Some(rename_template(&txn, template_id, name).await?);
        }
        if let Some(datas) = datas {
            template = Some(swap_file(&txn, template_id, datas).await?);
        }
        let template = template.ok_or(TemplateError::TemplateNotFound(template_id))?;

        txn.commit().await?;

        Ok(template.into())
    }

    /// Renames the template & its file
    pub async fn rename(
        &self,
        user: &ActingUser,
        template_id: i32,
        name: &str,
    ) -> Result<TemplateDto, Error> {
        self.ensure(user, AccessOperation::Write).await?;

        let name = validate_name(name)?;
        let txn = self.db.begin().await?;

        let template = rename_template(&txn, template_id, name).await?;

        txn.commit().await?;

        Ok(template.into())
    }

    /// Stores `datas` as the new file of the template, deleting the previous file
    pub async fn replace_file(
        &self,
        user: &ActingUser,
        template_id: i32,
        datas: Vec<u8>,
    ) -> Result<TemplateDto, Error> {
        self.ensure(user, AccessOperation::Write).await?;

        let txn = self.db.begin().await?;

        let template = swap_file(&txn, template_id, datas).await?;

        txn.commit().await?;

        Ok(template.into())
    }

    /// Deletes the template & its file
    pub async fn delete(&self, user: &ActingUser, template_id: i32) -> Result<(), Error> {
        self.ensure(user, AccessOperation::Write).await?;

        let txn = self.db.begin().await?;

        let template_repo = TemplateRepository::new(&txn);
        let template = template_repo
            .get(template_id)
            .await?
            .ok_or(TemplateError::TemplateNotFound(template_id))?;

        template_repo.delete(template_id).await?;
        if let Some(attachment_id) = template.attachment_id {
            AttachmentRepository::new(&txn).delete(attachment_id).await?;
        }

        txn.commit().await?;

        tracing::debug!(template_id = template_id, "Deleted template");

        Ok(())
    }

    /// Field tree of a model for picking template keys
    pub async fn fields(
        &self,
        user: &ActingUser,
        model_name: &str,
    ) -> Result<Arc<ModelSchema>, Error> {
        AccessService::new(self.db)
            .ensure(user, model_name, AccessOperation::Read)
            .await?;

        let registry = DataModelRepository::new(self.db).load_registry().await?;

        Ok(FieldSchemaBuilder::new(&registry, user).build_schema(model_name)?)
    }

    /// Stored template file
    pub async fn get_attachment(
        &self,
        user: &ActingUser,
        attachment_id: i32,
    ) -> Result<entity::attachment::Model, Error> {
        AccessService::new(self.db)
            .ensure(user, ATTACHMENT_MODEL, AccessOperation::Read)
            .await?;

        let attachment = AttachmentRepository::new(self.db)
            .get(attachment_id)
            .await?
            .ok_or(TemplateError::AttachmentNotFound(attachment_id))?;

        Ok(attachment)
    }

    async fn ensure(&self, user: &ActingUser, operation: AccessOperation) -> Result<(), Error> {
        AccessService::new(self.db)
            .ensure(user, TEMPLATE_MODEL, operation)
            .await
    }
}

async fn rename_template<C: ConnectionTrait>(
    db: &C,
    template_id: i32,
    name: &str,
) -> Result<entity::template::Model, Error> {
    let template = TemplateRepository::new(db)
        .update_name(template_id, name)
        .await?
        .ok_or(TemplateError::TemplateNotFound(template_id))?;
    if let Some(attachment_id) = template.attachment_id {
        AttachmentRepository::new(db)
            .rename(attachment_id, name)
            .await?;
    }

    Ok(template)
}

async fn swap_file<C: ConnectionTrait>(
    db: &C,
    template_id: i32,
    datas: Vec<u8>,
) -> Result<entity::template::Model, Error> {
    let template_repo = TemplateRepository::new(db);
    let previous = template_repo
        .get(template_id)
        .await?
        .ok_or(TemplateError::TemplateNotFound(template_id))?;

    let attachment = create_attachment(db, template_id, &previous.name, datas).await?;
    let template = template_repo
        .set_attachment(template_id, attachment.id, DOCX_MIMETYPE)
        .await?
        .ok_or(TemplateError::TemplateNotFound(template_id))?;
    if let Some(attachment_id) = previous.attachment_id {
        AttachmentRepository::new(db).delete(attachment_id).await?;
    }

    Ok(template)
}

async fn create_attachment<C: ConnectionTrait>(
    db: &C,
    template_id: i32,
    name: &str,
    datas: Vec<u8>,
) -> Result<entity::attachment::Model, Error> {
    let filename = format!("{}.docxf", name);

    let attachment = AttachmentRepository::new(db)
        .create(NewAttachment {
            name: &filename,
            display_name: name,
            mimetype: DOCX_MIMETYPE,
            datas,
            res_model: TEMPLATE_MODEL,
            res_id: Some(template_id),
        })
        .await?;

    Ok(attachment)
}

fn validate_name(name: &str) -> Result<&str, TemplateError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(TemplateError::InvalidName);
    }

    Ok(name)
}

/// Decodes an uploaded document
fn decode_file(file: &str) -> Result<Vec<u8>, TemplateError> {
    let datas = STANDARD
        .decode(file.trim())
        .map_err(|e| TemplateError::InvalidFile(e.to_string()))?;

    if !datas.starts_with(ZIP_SIGNATURE) {
        return Err(TemplateError::InvalidFile(
            "file is not an OOXML document".to_string(),
        ));
    }

    Ok(datas)
}
