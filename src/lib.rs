//! # Moto Workshop Service
//!
//! Operations backend for a motorcycle repair shop: customers, vehicles,
//! quotes, service orders, parts inventory and accounts receivable/payable.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and pure
//!   calculations (quote totals, status workflows)
//! - **infrastructure**: Database (sea-orm entities, migrations,
//!   repository implementations)
//! - **api**: REST API with Swagger documentation
//! - **auth**: JWT authentication and password handling
//! - **shared**: Cross-cutting types (errors, pagination, shutdown)

pub mod api;
pub mod auth;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use api::create_api_router;
