use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000006_attachment::Attachment;

static FK_TEMPLATE_ATTACHMENT_ID: &str = "fk-template-attachment_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Template::Table)
                    .if_not_exists()
                    .col(pk_auto(Template::Id))
                    .col(string(Template::Name))
                    .col(string(Template::Model))
                    .col(integer_null(Template::AttachmentId))
                    .col(string(Template::Mimetype))
                    .col(timestamp(Template::CreatedAt))
                    .col(timestamp(Template::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_TEMPLATE_ATTACHMENT_ID)
                            .from(Template::Table, Template::AttachmentId)
                            .to(Attachment::Table, Attachment::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Template::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Template {
    Table,
    Id,
    Name,
    Model,
    AttachmentId,
    Mimetype,
    CreatedAt,
    UpdatedAt,
}
