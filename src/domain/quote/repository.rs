//! Quote repository interface

use async_trait::async_trait;

use super::model::Quote;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// Load a quote with its line items.
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Quote>>;
    async fn find_all(&self) -> DomainResult<Vec<Quote>>;
    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Quote>>;
    /// Insert the quote and its line items.
    async fn save(&self, quote: Quote) -> DomainResult<Quote>;
    /// Update the quote and replace its line items.
    async fn update(&self, quote: Quote) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
