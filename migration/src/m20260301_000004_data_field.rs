use sea_orm_migration::{prelude::*, schema::*};

static IDX_DATA_FIELD_MODEL: &str = "idx-data_field-model";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DataField::Table)
                    .if_not_exists()
                    .col(pk_auto(DataField::Id))
                    .col(string(DataField::Model))
                    .col(string(DataField::Name))
                    .col(string(DataField::Label))
                    .col(string(DataField::Kind))
                    .col(string_null(DataField::Relation))
                    .col(string_null(DataField::CurrencyField))
                    .col(json_null(DataField::Selection))
                    .col(boolean(DataField::AdminOnly).default(false))
                    .col(integer(DataField::Sequence).default(0))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DATA_FIELD_MODEL)
                    .table(DataField::Table)
                    .col(DataField::Model)
                    .col(DataField::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DATA_FIELD_MODEL)
                    .table(DataField::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DataField::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DataField {
    Table,
    Id,
    Model,
    Name,
    Label,
    Kind,
    Relation,
    CurrencyField,
    Selection,
    AdminOnly,
    Sequence,
}
