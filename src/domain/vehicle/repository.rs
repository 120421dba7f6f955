//! Vehicle repository interface

use async_trait::async_trait;

use super::model::Vehicle;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>>;
    async fn find_all(&self) -> DomainResult<Vec<Vehicle>>;
    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Vehicle>>;
    async fn save(&self, vehicle: Vehicle) -> DomainResult<Vehicle>;
    async fn update(&self, vehicle: Vehicle) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
