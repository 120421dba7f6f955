//! Accounts receivable/payable repository interface

use async_trait::async_trait;

use super::model::AccountEntry;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait FinanceRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<AccountEntry>>;
    async fn find_all(&self) -> DomainResult<Vec<AccountEntry>>;
    async fn save(&self, entry: AccountEntry) -> DomainResult<AccountEntry>;
    async fn update(&self, entry: AccountEntry) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
