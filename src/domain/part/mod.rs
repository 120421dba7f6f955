pub mod model;
pub mod repository;

pub use model::Part;
pub use repository::PartRepository;
