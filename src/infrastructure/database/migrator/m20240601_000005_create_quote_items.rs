//! Create quote_items table

use sea_orm_migration::prelude::*;

use super::m20240601_000004_create_quotes::Quotes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QuoteItems::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(QuoteItems::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(QuoteItems::QuoteId).integer().not_null())
                    .col(ColumnDef::new(QuoteItems::Kind).string().not_null())
                    .col(ColumnDef::new(QuoteItems::Description).string().not_null())
                    .col(
                        ColumnDef::new(QuoteItems::Quantity)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QuoteItems::UnitPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quote_items_quote")
                            .from(QuoteItems::Table, QuoteItems::QuoteId)
                            .to(Quotes::Table, Quotes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_quote_items_quote_id")
                    .table(QuoteItems::Table)
                    .col(QuoteItems::QuoteId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QuoteItems::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum QuoteItems {
    Table,
    Id,
    QuoteId,
    Kind,
    Description,
    Quantity,
    UnitPrice,
}
