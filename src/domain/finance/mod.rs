pub mod model;
pub mod repository;

pub use model::{summarize, AccountEntry, EntryKind, EntryStatus, FinanceSummary};
pub use repository::FinanceRepository;
