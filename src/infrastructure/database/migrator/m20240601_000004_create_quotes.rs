//! Create quotes table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_customers::Customers;
use super::m20240601_000002_create_vehicles::Vehicles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Quotes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Quotes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Quotes::CustomerId).integer().not_null())
                    .col(ColumnDef::new(Quotes::VehicleId).integer())
                    .col(ColumnDef::new(Quotes::Description).string())
                    .col(
                        ColumnDef::new(Quotes::Status)
                            .string()
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(Quotes::Discount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quotes::LaborTotal)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quotes::PartsTotal)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Quotes::GrandTotal)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Quotes::ValidUntil).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Quotes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Quotes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_customer")
                            .from(Quotes::Table, Quotes::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quotes_vehicle")
                            .from(Quotes::Table, Quotes::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Quotes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Quotes {
    Table,
    Id,
    CustomerId,
    VehicleId,
    Description,
    Status,
    Discount,
    LaborTotal,
    PartsTotal,
    GrandTotal,
    ValidUntil,
    CreatedAt,
    UpdatedAt,
}
