//! Create service_orders table

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_customers::Customers;
use super::m20240601_000002_create_vehicles::Vehicles;
use super::m20240601_000004_create_quotes::Quotes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceOrders::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceOrders::CustomerId).integer().not_null())
                    .col(ColumnDef::new(ServiceOrders::VehicleId).integer())
                    .col(ColumnDef::new(ServiceOrders::QuoteId).integer())
                    .col(ColumnDef::new(ServiceOrders::Description).string().not_null())
                    .col(
                        ColumnDef::new(ServiceOrders::Status)
                            .string()
                            .not_null()
                            .default("Open"),
                    )
                    .col(
                        ColumnDef::new(ServiceOrders::Total)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(ServiceOrders::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ServiceOrders::DeliveredAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ServiceOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceOrders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_orders_customer")
                            .from(ServiceOrders::Table, ServiceOrders::CustomerId)
                            .to(Customers::Table, Customers::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_orders_vehicle")
                            .from(ServiceOrders::Table, ServiceOrders::VehicleId)
                            .to(Vehicles::Table, Vehicles::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_orders_quote")
                            .from(ServiceOrders::Table, ServiceOrders::QuoteId)
                            .to(Quotes::Table, Quotes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ServiceOrders::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum ServiceOrders {
    Table,
    Id,
    CustomerId,
    VehicleId,
    QuoteId,
    Description,
    Status,
    Total,
    CompletedAt,
    DeliveredAt,
    CreatedAt,
    UpdatedAt,
}
