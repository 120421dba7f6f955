//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod customer_repository;
pub mod finance_repository;
pub mod part_repository;
pub mod quote_repository;
pub mod repository_provider;
pub mod service_order_repository;
pub mod user_repository;
pub mod vehicle_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use crate::domain::DomainError;

pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Validation(format!("Database error: {}", e))
}
