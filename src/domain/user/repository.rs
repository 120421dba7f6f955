//! User repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::User;
use crate::shared::types::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn count(&self) -> DomainResult<u64>;
    async fn save(&self, user: User) -> DomainResult<User>;
    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()>;
    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()>;
}
