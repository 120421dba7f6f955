//! Service order repository interface

use async_trait::async_trait;

use super::model::ServiceOrder;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait ServiceOrderRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceOrder>>;
    async fn find_all(&self) -> DomainResult<Vec<ServiceOrder>>;
    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ServiceOrder>>;
    async fn save(&self, order: ServiceOrder) -> DomainResult<ServiceOrder>;
    async fn update(&self, order: ServiceOrder) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
