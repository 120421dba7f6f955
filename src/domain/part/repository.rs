//! Parts inventory repository interface

use async_trait::async_trait;

use super::model::Part;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait PartRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Part>>;
    async fn find_all(&self) -> DomainResult<Vec<Part>>;
    async fn save(&self, part: Part) -> DomainResult<Part>;
    async fn update(&self, part: Part) -> DomainResult<()>;
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
