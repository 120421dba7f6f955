pub mod calculator;
pub mod model;
pub mod repository;

pub use calculator::{compute_totals, line_total, LineItem, QuoteError, QuoteTotals};
pub use model::{Quote, QuoteItem, QuoteItemKind, QuoteStatus};
pub use repository::QuoteRepository;
