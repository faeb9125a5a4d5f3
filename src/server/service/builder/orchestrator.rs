//! Two-phase fill of a template.
//!
//! Filling a template takes one job for the user and one job nested inside it:
//!
//! 1. [`BuilderJobOrchestrator::fill_template`] submits the fill job, naming the fill callback.
//! 2. While serving the fill callback, [`BuilderJobOrchestrator::build_fill_script`] submits
//!    a key extraction job naming the keys callback, downloads the extracted keys, resolves
//!    their values and returns the script filling the template.
//! 3. The fill job saves the filled document and its URL is returned to the user.
//!
//! Callback URLs carry a security token so the builder service acts as the requesting user.

use sea_orm::DatabaseConnection;

use crate::{
    model::template::FillResultDto,
    server::{
        config::Config,
        data::{
            attachment::AttachmentRepository, model::DataModelRepository,
            record::RecordRepository, template::TemplateRepository,
        },
        error::{template::TemplateError, Error},
        model::{
            user::{AccessOperation, ActingUser},
            value_tree::ValueTree,
        },
        service::{
            access::AccessService,
            builder::{
                script::{fill_filename, fill_script, keys_script},
                BuilderClient, ErrorCodeTable,
            },
            keys::{parse_key_list, parse_keys},
            resolver::ValueResolver,
            template::{ATTACHMENT_MODEL, TEMPLATE_MODEL},
            token::SecurityTokenMediator,
        },
        util::url::app_url,
    },
};

pub const FILL_CALLBACK_PATH: &str = "template/callback/fill_template";
pub const KEYS_CALLBACK_PATH: &str = "template/callback/get_keys";
pub const DOWNLOAD_PATH: &str = "template/download";

pub struct BuilderJobOrchestrator<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    builder: BuilderClient<'a>,
    tokens: SecurityTokenMediator,
}

impl<'a> BuilderJobOrchestrator<'a> {
    /// Creates a new instance of [`BuilderJobOrchestrator`]
    pub fn new(
        db: &'a DatabaseConnection,
        http_client: &'a reqwest::Client,
        config: &'a Config,
    ) -> Self {
        Self {
            db,
            config,
            builder: BuilderClient::new(http_client, config),
            tokens: SecurityTokenMediator::from_config(config),
        }
    }

    pub fn with_error_codes(mut self, error_codes: ErrorCodeTable) -> Self {
        self.builder = self.builder.with_error_codes(error_codes);
        self
    }

    /// Fills a template with a record and returns the download link of the result
    ///
    /// Failures of the builder service are returned as [`FillResultDto::Error`] with a user
    /// facing message.
    ///
    /// # Returns
    /// - `Ok(FillResultDto::Href)` - URL of the filled document
    /// - `Ok(FillResultDto::Error)` - The builder service could not be reached or failed
    /// - `Err(Error::AuthError)` - The user may not read templates
    /// - `Err(Error::TemplateError)` - The template or its file doesn't exist
    pub async fn fill_template(
        &self,
        user: &ActingUser,
        template_id: i32,
        record_id: i32,
        model_name: &str,
    ) -> Result<FillResultDto, Error> {
        AccessService::new(self.db)
            .ensure(user, TEMPLATE_MODEL, AccessOperation::Read)
            .await?;

        let template = TemplateRepository::new(self.db)
            .get(template_id)
            .await?
            .ok_or(TemplateError::TemplateNotFound(template_id))?;
        let attachment_id = template
            .attachment_id
            .ok_or(TemplateError::MissingFile(template_id))?;

        let token = self.tokens.issue(user.id)?;
        let callback_url = app_url(
            &self.config.app_url,
            FILL_CALLBACK_PATH,
            &[
                ("attachment_id", attachment_id.to_string()),
                ("model_name", model_name.to_string()),
                ("record_id", record_id.to_string()),
                ("oo_security_token", token),
            ],
        )?;

        match self.builder.run_job(&callback_url).await {
            Ok(href) => Ok(FillResultDto::Href { href }),
            Err(e) => {
                tracing::warn!(
                    template_id = template_id,
                    record_id = record_id,
                    "Fill job failed: {}",
                    e
                );

                Ok(FillResultDto::Error {
                    error: e.user_message(),
                })
            }
        }
    }

    /// Script extracting the form keys of a template file
    pub async fn build_keys_script(
        &self,
        user: &ActingUser,
        token: &str,
        attachment_id: i32,
    ) -> Result<String, Error> {
        self.ensure_attachment(user, attachment_id).await?;

        let template_url = self.download_url(token, attachment_id)?;

        Ok(keys_script(&template_url)?)
    }

    /// Script filling a template file with the values of a record
    ///
    /// Runs the key extraction job to learn which keys the template uses.
    pub async fn build_fill_script(
        &self,
        user: &ActingUser,
        token: &str,
        attachment_id: i32,
        model_name: &str,
        record_id: i32,
    ) -> Result<String, Error> {
        self.ensure_attachment(user, attachment_id).await?;

        let registry = DataModelRepository::new(self.db).load_registry().await?;
        let definition = registry
            .get(model_name)
            .ok_or_else(|| TemplateError::ModelNotFound(model_name.to_string()))?;

        AccessService::new(self.db)
            .ensure(user, model_name, AccessOperation::Read)
            .await?;
        if RecordRepository::new(self.db)
            .get(model_name, record_id)
            .await?
            .is_none()
        {
            return Err(TemplateError::RecordNotFound {
                model: model_name.to_string(),
                id: record_id,
            }
            .into());
        }

        let keys = self.extract_keys(token, attachment_id).await?;
        let key_tree = parse_keys(&keys);

        let resolver = ValueResolver::new(self.db, &registry, user);
        let values = resolver
            .resolve(model_name, record_id, &key_tree)
            .await
            .unwrap_or_else(ValueTree::new);
        let display_name = resolver.display_name(model_name, record_id).await;

        let filename =
            fill_filename(&definition.description, display_name.as_deref(), record_id);
        let template_url = self.download_url(token, attachment_id)?;

        tracing::debug!(
            model = %model_name,
            record_id = record_id,
            "Resolved values of {} top-level fields for {} template keys",
            values.len(),
            keys.len()
        );

        Ok(fill_script(&template_url, &values, &filename)?)
    }

    /// Runs the key extraction job and reads the keys it saved
    async fn extract_keys(&self, token: &str, attachment_id: i32) -> Result<Vec<String>, Error> {
        let callback_url = app_url(
            &self.config.app_url,
            KEYS_CALLBACK_PATH,
            &[
                ("attachment_id", attachment_id.to_string()),
                ("oo_security_token", token.to_string()),
            ],
        )?;

        let output_url = self.builder.run_job(&callback_url).await?;
        let content = self.builder.fetch_output(&output_url).await?;

        Ok(parse_key_list(&content))
    }

    async fn ensure_attachment(&self, user: &ActingUser, attachment_id: i32) -> Result<(), Error> {
        AccessService::new(self.db)
            .ensure(user, ATTACHMENT_MODEL, AccessOperation::Read)
            .await?;

        AttachmentRepository::new(self.db)
            .get(attachment_id)
            .await?
            .ok_or(TemplateError::AttachmentNotFound(attachment_id))?;

        Ok(())
    }

    fn download_url(&self, token: &str, attachment_id: i32) -> Result<String, Error> {
        app_url(
            &self.config.app_url,
            &format!("{}/{}", DOWNLOAD_PATH, attachment_id),
            &[("oo_security_token", token.to_string())],
        )
    }
}
