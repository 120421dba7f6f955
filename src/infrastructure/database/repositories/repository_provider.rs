//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::customer::CustomerRepository;
use crate::domain::finance::FinanceRepository;
use crate::domain::part::PartRepository;
use crate::domain::quote::QuoteRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::service_order::ServiceOrderRepository;
use crate::domain::user::UserRepository;
use crate::domain::vehicle::VehicleRepository;

use super::customer_repository::SeaOrmCustomerRepository;
use super::finance_repository::SeaOrmFinanceRepository;
use super::part_repository::SeaOrmPartRepository;
use super::quote_repository::SeaOrmQuoteRepository;
use super::service_order_repository::SeaOrmServiceOrderRepository;
use super::user_repository::SeaOrmUserRepository;
use super::vehicle_repository::SeaOrmVehicleRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let customer = repos.customers().find_by_id(42).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    customers: SeaOrmCustomerRepository,
    vehicles: SeaOrmVehicleRepository,
    quotes: SeaOrmQuoteRepository,
    service_orders: SeaOrmServiceOrderRepository,
    parts: SeaOrmPartRepository,
    finance: SeaOrmFinanceRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            customers: SeaOrmCustomerRepository::new(db.clone()),
            vehicles: SeaOrmVehicleRepository::new(db.clone()),
            quotes: SeaOrmQuoteRepository::new(db.clone()),
            service_orders: SeaOrmServiceOrderRepository::new(db.clone()),
            parts: SeaOrmPartRepository::new(db.clone()),
            finance: SeaOrmFinanceRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn vehicles(&self) -> &dyn VehicleRepository {
        &self.vehicles
    }

    fn quotes(&self) -> &dyn QuoteRepository {
        &self.quotes
    }

    fn service_orders(&self) -> &dyn ServiceOrderRepository {
        &self.service_orders
    }

    fn parts(&self) -> &dyn PartRepository {
        &self.parts
    }

    fn finance(&self) -> &dyn FinanceRepository {
        &self.finance
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}
