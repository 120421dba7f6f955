//! SeaORM implementation of VehicleRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::vehicle::{Vehicle, VehicleRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::vehicle;

fn entity_to_domain(v: vehicle::Model) -> Vehicle {
    Vehicle {
        id: v.id,
        customer_id: v.customer_id,
        plate: v.plate,
        brand: v.brand,
        model: v.model,
        year: v.year,
        color: v.color,
        odometer_km: v.odometer_km,
        created_at: v.created_at,
        updated_at: v.updated_at,
    }
}

pub struct SeaOrmVehicleRepository {
    db: DatabaseConnection,
}

impl SeaOrmVehicleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleRepository for SeaOrmVehicleRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Vehicle>> {
        let model = vehicle::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Vehicle>> {
        let models = vehicle::Entity::find()
            .filter(vehicle::Column::CustomerId.eq(customer_id))
            .order_by_asc(vehicle::Column::Plate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, v: Vehicle) -> DomainResult<Vehicle> {
        let now = Utc::now();
        let model = vehicle::ActiveModel {
            customer_id: Set(v.customer_id),
            plate: Set(v.plate),
            brand: Set(v.brand),
            model: Set(v.model),
            year: Set(v.year),
            color: Set(v.color),
            odometer_km: Set(v.odometer_km),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Vehicle saved: {} ({})", result.plate, result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, v: Vehicle) -> DomainResult<()> {
        let existing = vehicle::Entity::find_by_id(v.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Vehicle", "id", v.id));
        };

        let model = vehicle::ActiveModel {
            id: Set(v.id),
            customer_id: Set(v.customer_id),
            plate: Set(v.plate),
            brand: Set(v.brand),
            model: Set(v.model),
            year: Set(v.year),
            color: Set(v.color),
            odometer_km: Set(v.odometer_km),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = vehicle::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Vehicle", "id", id));
        }
        Ok(())
    }
}
