//! Create parts table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Parts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Parts::Name).string().not_null())
                    .col(ColumnDef::new(Parts::Sku).string())
                    .col(ColumnDef::new(Parts::Description).string())
                    .col(
                        ColumnDef::new(Parts::Quantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Parts::MinQuantity)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Parts::UnitPrice)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Parts::Supplier).string())
                    .col(
                        ColumnDef::new(Parts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Parts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parts_sku")
                    .table(Parts::Table)
                    .col(Parts::Sku)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Parts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Parts {
    Table,
    Id,
    Name,
    Sku,
    Description,
    Quantity,
    MinQuantity,
    UnitPrice,
    Supplier,
    CreatedAt,
    UpdatedAt,
}
