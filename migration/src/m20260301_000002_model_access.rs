use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260301_000001_app_user::AppUser;

static IDX_MODEL_ACCESS_MODEL: &str = "idx-model_access-model";
static FK_MODEL_ACCESS_USER_ID: &str = "fk-model_access-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ModelAccess::Table)
                    .if_not_exists()
                    .col(pk_auto(ModelAccess::Id))
                    .col(string(ModelAccess::Model))
                    .col(integer_null(ModelAccess::UserId))
                    .col(boolean(ModelAccess::PermRead).default(false))
                    .col(boolean(ModelAccess::PermWrite).default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_MODEL_ACCESS_USER_ID)
                            .from(ModelAccess::Table, ModelAccess::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MODEL_ACCESS_MODEL)
                    .table(ModelAccess::Table)
                    .col(ModelAccess::Model)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MODEL_ACCESS_MODEL)
                    .table(ModelAccess::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ModelAccess::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ModelAccess {
    Table,
    Id,
    Model,
    UserId,
    PermRead,
    PermWrite,
}
