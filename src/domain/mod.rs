//! Core business entities, repository traits and the pure calculation
//! components (quote totals, pagination lives in `shared::types`).

pub mod customer;
pub mod finance;
pub mod repositories;
pub mod part;
pub mod quote;
pub mod service_order;
pub mod user;
pub mod vehicle;

pub use customer::{Customer, CustomerRepository};
pub use finance::{AccountEntry, EntryKind, EntryStatus, FinanceRepository, FinanceSummary};
pub use part::{Part, PartRepository};
pub use repositories::RepositoryProvider;
pub use quote::{LineItem, Quote, QuoteError, QuoteItem, QuoteItemKind, QuoteRepository, QuoteStatus};
pub use service_order::{OrderStatus, ServiceOrder, ServiceOrderRepository};
pub use user::{User, UserRepository, UserRole};
pub use vehicle::{Vehicle, VehicleRepository};

// Re-export for convenience
pub use crate::shared::types::{DomainError, DomainResult};
