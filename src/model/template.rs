use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct TemplateDto {
    pub id: i32,
    pub name: String,
    /// Technical name of the model records are filled from
    pub model: String,
    pub attachment_id: Option<i32>,
    pub mimetype: String,
    pub updated_at: NaiveDateTime,
}

impl From<entity::template::Model> for TemplateDto {
    fn from(template: entity::template::Model) -> Self {
        Self {
            id: template.id,
            name: template.name,
            model: template.model,
            attachment_id: template.attachment_id,
            mimetype: template.mimetype,
            updated_at: template.updated_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTemplateDto {
    pub name: String,
    pub model_name: String,
    /// Base64 encoded template document, a blank document is used when omitted
    pub file: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateTemplateDto {
    pub name: Option<String>,
    /// Base64 encoded replacement for the template document
    pub file: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct FillTemplateDto {
    pub template_id: i32,
    pub record_id: i32,
    pub model_name: String,
}

/// Outcome of a fill request, either a download link or a user facing error message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum FillResultDto {
    Href { href: String },
    Error { error: String },
}
