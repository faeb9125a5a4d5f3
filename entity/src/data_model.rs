use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "data_model")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Technical model name, e.g. `sale.order`
    #[sea_orm(unique)]
    pub model: String,
    /// Human readable description, e.g. `Sales Order`
    pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
