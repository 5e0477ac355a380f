use sea_orm_migration::prelude::*;

use crate::m20240601_000001_v1_create_users::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .if_not_exists()
                    .table(Account::Table)
                    .col(
                        ColumnDef::new(Account::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Account::UserId).integer().not_null())
                    .col(ColumnDef::new(Account::Currency).string_len(3).not_null())
                    .col(
                        ColumnDef::new(Account::Amount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Account::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Account::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_accounts_user_id")
                            .from(Account::Table, Account::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .take(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Account::Table)
                    .col(Account::UserId)
                    .name("idx_accounts_user_id")
                    .take(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().if_exists().table(Account::Table).take())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Account {
    #[sea_orm(iden = "accounts")]
    Table,
    Id,
    UserId,
    Currency,
    Amount,
    CreatedAt,
    UpdatedAt,
}
