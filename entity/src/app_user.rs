use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    /// Locale used for translated labels, e.g. `en_US`
    pub lang: String,
    pub is_admin: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::model_access::Entity")]
    ModelAccess,
}

impl Related<super::model_access::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ModelAccess.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
