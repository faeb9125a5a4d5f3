use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_field")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Technical name of the model owning the field
    pub model: String,
    pub name: String,
    pub label: String,
    /// Field type as stored by the records database, e.g. `char` or `many2one`
    pub kind: String,
    /// Related model for relationship fields
    pub relation: Option<String>,
    /// Many-to-one field holding the currency of a monetary field
    pub currency_field: Option<String>,
    /// Selection options as `[{"value", "label", "translations"}]`
    pub selection: Option<Json>,
    pub admin_only: bool,
    /// Declaration order within the model
    pub sequence: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
