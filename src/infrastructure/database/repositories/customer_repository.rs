//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::db_err;
use crate::domain::customer::{Customer, CustomerRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;

fn entity_to_domain(c: customer::Model) -> Customer {
    Customer {
        id: c.id,
        name: c.name,
        phone: c.phone,
        email: c.email,
        document: c.document,
        notes: c.notes,
        created_at: c.created_at,
        updated_at: c.updated_at,
    }
}

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_asc(customer::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, c: Customer) -> DomainResult<Customer> {
        let now = Utc::now();
        let model = customer::ActiveModel {
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
            document: Set(c.document),
            notes: Set(c.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Customer saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, c: Customer) -> DomainResult<()> {
        let existing = customer::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Customer", "id", c.id));
        };

        let model = customer::ActiveModel {
            id: Set(c.id),
            name: Set(c.name),
            phone: Set(c.phone),
            email: Set(c.email),
            document: Set(c.document),
            notes: Set(c.notes),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Customer", "id", id));
        }
        Ok(())
    }
}
