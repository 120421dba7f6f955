//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_customers;
mod m20240601_000002_create_vehicles;
mod m20240601_000003_create_users;
mod m20240601_000004_create_quotes;
mod m20240601_000005_create_quote_items;
mod m20240601_000006_create_service_orders;
mod m20240601_000007_create_parts;
mod m20240601_000008_create_account_entries;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_customers::Migration),
            Box::new(m20240601_000002_create_vehicles::Migration),
            Box::new(m20240601_000003_create_users::Migration),
            Box::new(m20240601_000004_create_quotes::Migration),
            Box::new(m20240601_000005_create_quote_items::Migration),
            Box::new(m20240601_000006_create_service_orders::Migration),
            Box::new(m20240601_000007_create_parts::Migration),
            Box::new(m20240601_000008_create_account_entries::Migration),
        ]
    }
}
