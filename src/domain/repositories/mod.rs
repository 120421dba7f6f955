//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives handlers unified access to all per-aggregate
//! repositories without knowing the storage backend.

use super::customer::CustomerRepository;
use super::finance::FinanceRepository;
use super::part::PartRepository;
use super::quote::QuoteRepository;
use super::service_order::ServiceOrderRepository;
use super::user::UserRepository;
use super::vehicle::VehicleRepository;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let customer = repos.customers().find_by_id(42).await?;
///     let quotes = repos.quotes().find_by_customer(42).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn customers(&self) -> &dyn CustomerRepository;
    fn vehicles(&self) -> &dyn VehicleRepository;
    fn quotes(&self) -> &dyn QuoteRepository;
    fn service_orders(&self) -> &dyn ServiceOrderRepository;
    fn parts(&self) -> &dyn PartRepository;
    fn finance(&self) -> &dyn FinanceRepository;
    fn users(&self) -> &dyn UserRepository;
}
