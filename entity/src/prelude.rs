pub use super::app_user::Entity as AppUser;
pub use super::attachment::Entity as Attachment;
pub use super::data_field::Entity as DataField;
pub use super::data_model::Entity as DataModel;
pub use super::data_record::Entity as DataRecord;
pub use super::model_access::Entity as ModelAccess;
pub use super::template::Entity as Template;
