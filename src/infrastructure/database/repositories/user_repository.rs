//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use tracing::info;

use super::db_err;
use crate::domain::user::{User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::user;

fn role_to_domain(r: user::UserRole) -> UserRole {
    match r {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::Operator => UserRole::Operator,
    }
}

fn role_to_entity(r: UserRole) -> user::UserRole {
    match r {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::Operator => user::UserRole::Operator,
    }
}

fn entity_to_domain(u: user::Model) -> User {
    User {
        id: u.id,
        username: u.username,
        email: u.email,
        password_hash: u.password_hash,
        role: role_to_domain(u.role),
        is_active: u.is_active,
        last_login_at: u.last_login_at,
        created_at: u.created_at,
        updated_at: u.updated_at,
    }
}

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn save(&self, u: User) -> DomainResult<User> {
        let model = user::ActiveModel {
            id: Set(u.id),
            username: Set(u.username),
            email: Set(u.email),
            password_hash: Set(u.password_hash),
            role: Set(role_to_entity(u.role)),
            is_active: Set(u.is_active),
            last_login_at: Set(u.last_login_at),
            created_at: Set(u.created_at),
            updated_at: Set(u.updated_at),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("User saved: {}", result.username);
        Ok(entity_to_domain(result))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("User", "id", id));
        };

        let mut model: user::ActiveModel = existing.into();
        model.password_hash = Set(password_hash.to_string());
        model.updated_at = Set(Utc::now());
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn record_login(&self, id: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let existing = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("User", "id", id));
        };

        let mut model: user::ActiveModel = existing.into();
        model.last_login_at = Set(Some(at));
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }
}
