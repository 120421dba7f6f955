pub mod model;
pub mod repository;

pub use model::{OrderStatus, ServiceOrder};
pub use repository::ServiceOrderRepository;
