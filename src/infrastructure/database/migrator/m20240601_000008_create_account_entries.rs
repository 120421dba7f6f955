//! Create account_entries table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccountEntries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccountEntries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccountEntries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(AccountEntries::Description)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountEntries::Counterparty).string())
                    .col(
                        ColumnDef::new(AccountEntries::Amount)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AccountEntries::DueDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AccountEntries::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(ColumnDef::new(AccountEntries::PaidAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(AccountEntries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AccountEntries::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_account_entries_status")
                    .table(AccountEntries::Table)
                    .col(AccountEntries::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccountEntries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum AccountEntries {
    Table,
    Id,
    Kind,
    Description,
    Counterparty,
    Amount,
    DueDate,
    Status,
    PaidAt,
    CreatedAt,
    UpdatedAt,
}
