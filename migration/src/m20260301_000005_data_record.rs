use sea_orm_migration::{prelude::*, schema::*};

static IDX_DATA_RECORD_MODEL: &str = "idx-data_record-model";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DataRecord::Table)
                    .if_not_exists()
                    .col(pk_auto(DataRecord::Id))
                    .col(string(DataRecord::Model))
                    .col(json(DataRecord::FieldValues))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DATA_RECORD_MODEL)
                    .table(DataRecord::Table)
                    .col(DataRecord::Model)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DATA_RECORD_MODEL)
                    .table(DataRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DataRecord::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DataRecord {
    Table,
    Id,
    Model,
    FieldValues,
}
