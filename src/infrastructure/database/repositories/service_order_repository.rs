//! SeaORM implementation of ServiceOrderRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::db_err;
use crate::domain::service_order::{OrderStatus, ServiceOrder, ServiceOrderRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::service_order;

fn status_to_domain(s: service_order::OrderStatus) -> OrderStatus {
    match s {
        service_order::OrderStatus::Open => OrderStatus::Open,
        service_order::OrderStatus::InProgress => OrderStatus::InProgress,
        service_order::OrderStatus::Completed => OrderStatus::Completed,
        service_order::OrderStatus::Delivered => OrderStatus::Delivered,
        service_order::OrderStatus::Canceled => OrderStatus::Canceled,
    }
}

fn status_to_entity(s: OrderStatus) -> service_order::OrderStatus {
    match s {
        OrderStatus::Open => service_order::OrderStatus::Open,
        OrderStatus::InProgress => service_order::OrderStatus::InProgress,
        OrderStatus::Completed => service_order::OrderStatus::Completed,
        OrderStatus::Delivered => service_order::OrderStatus::Delivered,
        OrderStatus::Canceled => service_order::OrderStatus::Canceled,
    }
}

fn entity_to_domain(o: service_order::Model) -> ServiceOrder {
    ServiceOrder {
        id: o.id,
        customer_id: o.customer_id,
        vehicle_id: o.vehicle_id,
        quote_id: o.quote_id,
        description: o.description,
        status: status_to_domain(o.status),
        total: o.total,
        completed_at: o.completed_at,
        delivered_at: o.delivered_at,
        created_at: o.created_at,
        updated_at: o.updated_at,
    }
}

pub struct SeaOrmServiceOrderRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceOrderRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ServiceOrderRepository for SeaOrmServiceOrderRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<ServiceOrder>> {
        let model = service_order::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<ServiceOrder>> {
        let models = service_order::Entity::find()
            .order_by_desc(service_order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<ServiceOrder>> {
        let models = service_order::Entity::find()
            .filter(service_order::Column::CustomerId.eq(customer_id))
            .order_by_desc(service_order::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, o: ServiceOrder) -> DomainResult<ServiceOrder> {
        let now = Utc::now();
        let model = service_order::ActiveModel {
            customer_id: Set(o.customer_id),
            vehicle_id: Set(o.vehicle_id),
            quote_id: Set(o.quote_id),
            description: Set(o.description),
            status: Set(status_to_entity(o.status)),
            total: Set(o.total),
            completed_at: Set(o.completed_at),
            delivered_at: Set(o.delivered_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Service order saved: {}", result.id);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, o: ServiceOrder) -> DomainResult<()> {
        let existing = service_order::Entity::find_by_id(o.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("ServiceOrder", "id", o.id));
        };

        let model = service_order::ActiveModel {
            id: Set(o.id),
            customer_id: Set(o.customer_id),
            vehicle_id: Set(o.vehicle_id),
            quote_id: Set(o.quote_id),
            description: Set(o.description),
            status: Set(status_to_entity(o.status)),
            total: Set(o.total),
            completed_at: Set(o.completed_at),
            delivered_at: Set(o.delivered_at),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = service_order::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("ServiceOrder", "id", id));
        }
        Ok(())
    }
}
