//! Database entities module

pub mod account_entry;
pub mod customer;
pub mod part;
pub mod quote;
pub mod quote_item;
pub mod service_order;
pub mod user;
pub mod vehicle;

pub use account_entry::Entity as AccountEntry;
pub use customer::Entity as Customer;
pub use part::Entity as Part;
pub use quote::Entity as Quote;
pub use quote_item::Entity as QuoteItem;
pub use service_order::Entity as ServiceOrder;
pub use user::Entity as User;
pub use vehicle::Entity as Vehicle;
