use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attachment::Table)
                    .if_not_exists()
                    .col(pk_auto(Attachment::Id))
                    .col(string(Attachment::Name))
                    .col(string(Attachment::DisplayName))
                    .col(string(Attachment::Mimetype))
                    .col(blob(Attachment::Datas))
                    .col(string(Attachment::ResModel))
                    .col(integer_null(Attachment::ResId))
                    .col(timestamp(Attachment::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attachment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Attachment {
    Table,
    Id,
    Name,
    DisplayName,
    Mimetype,
    Datas,
    ResModel,
    ResId,
    CreatedAt,
}
