//! SeaORM implementation of PartRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::db_err;
use crate::domain::part::{Part, PartRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::part;

fn entity_to_domain(p: part::Model) -> Part {
    Part {
        id: p.id,
        name: p.name,
        sku: p.sku,
        description: p.description,
        quantity: p.quantity,
        min_quantity: p.min_quantity,
        unit_price: p.unit_price,
        supplier: p.supplier,
        created_at: p.created_at,
        updated_at: p.updated_at,
    }
}

pub struct SeaOrmPartRepository {
    db: DatabaseConnection,
}

impl SeaOrmPartRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PartRepository for SeaOrmPartRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Part>> {
        let model = part::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Part>> {
        let models = part::Entity::find()
            .order_by_asc(part::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, p: Part) -> DomainResult<Part> {
        let now = Utc::now();
        let model = part::ActiveModel {
            name: Set(p.name),
            sku: Set(p.sku),
            description: Set(p.description),
            quantity: Set(p.quantity),
            min_quantity: Set(p.min_quantity),
            unit_price: Set(p.unit_price),
            supplier: Set(p.supplier),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Part saved: {} ({})", result.name, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, p: Part) -> DomainResult<()> {
        let existing = part::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Part", "id", p.id));
        };

        let model = part::ActiveModel {
            id: Set(p.id),
            name: Set(p.name),
            sku: Set(p.sku),
            description: Set(p.description),
            quantity: Set(p.quantity),
            min_quantity: Set(p.min_quantity),
            unit_price: Set(p.unit_price),
            supplier: Set(p.supplier),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = part::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Part", "id", id));
        }
        Ok(())
    }
}
