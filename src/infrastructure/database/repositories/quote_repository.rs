//! SeaORM implementation of QuoteRepository
//!
//! Quote headers and their line items are written in one transaction so a
//! failed item insert never leaves a header with dangling totals.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;

use super::db_err;
use crate::domain::quote::{Quote, QuoteItem, QuoteItemKind, QuoteRepository, QuoteStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{quote, quote_item};

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_domain(s: quote::QuoteStatus) -> QuoteStatus {
    match s {
        quote::QuoteStatus::Pending => QuoteStatus::Pending,
        quote::QuoteStatus::Approved => QuoteStatus::Approved,
        quote::QuoteStatus::Rejected => QuoteStatus::Rejected,
        quote::QuoteStatus::Converted => QuoteStatus::Converted,
    }
}

fn status_to_entity(s: QuoteStatus) -> quote::QuoteStatus {
    match s {
        QuoteStatus::Pending => quote::QuoteStatus::Pending,
        QuoteStatus::Approved => quote::QuoteStatus::Approved,
        QuoteStatus::Rejected => quote::QuoteStatus::Rejected,
        QuoteStatus::Converted => quote::QuoteStatus::Converted,
    }
}

fn kind_to_domain(k: quote_item::ItemKind) -> QuoteItemKind {
    match k {
        quote_item::ItemKind::Labor => QuoteItemKind::Labor,
        quote_item::ItemKind::Part => QuoteItemKind::Part,
    }
}

fn kind_to_entity(k: QuoteItemKind) -> quote_item::ItemKind {
    match k {
        QuoteItemKind::Labor => quote_item::ItemKind::Labor,
        QuoteItemKind::Part => quote_item::ItemKind::Part,
    }
}

fn item_to_domain(i: quote_item::Model) -> QuoteItem {
    QuoteItem {
        id: i.id,
        kind: kind_to_domain(i.kind),
        description: i.description,
        quantity: i.quantity,
        unit_price: i.unit_price,
    }
}

fn entity_to_domain(q: quote::Model, items: Vec<quote_item::Model>) -> Quote {
    Quote {
        id: q.id,
        customer_id: q.customer_id,
        vehicle_id: q.vehicle_id,
        description: q.description,
        status: status_to_domain(q.status),
        discount: q.discount,
        labor_total: q.labor_total,
        parts_total: q.parts_total,
        grand_total: q.grand_total,
        valid_until: q.valid_until,
        items: items.into_iter().map(item_to_domain).collect(),
        created_at: q.created_at,
        updated_at: q.updated_at,
    }
}

async fn insert_items(
    txn: &DatabaseTransaction,
    quote_id: i32,
    items: &[QuoteItem],
) -> Result<(), sea_orm::DbErr> {
    for item in items {
        let model = quote_item::ActiveModel {
            quote_id: Set(quote_id),
            kind: Set(kind_to_entity(item.kind)),
            description: Set(item.description.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
            ..Default::default()
        };
        model.insert(txn).await?;
    }
    Ok(())
}

// ── SeaOrmQuoteRepository ───────────────────────────────────────

pub struct SeaOrmQuoteRepository {
    db: DatabaseConnection,
}

impl SeaOrmQuoteRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load_items(&self, quote_id: i32) -> DomainResult<Vec<quote_item::Model>> {
        quote_item::Entity::find()
            .filter(quote_item::Column::QuoteId.eq(quote_id))
            .order_by_asc(quote_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)
    }
}

#[async_trait]
impl QuoteRepository for SeaOrmQuoteRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Quote>> {
        let model = quote::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        let Some(model) = model else {
            return Ok(None);
        };
        let items = self.load_items(model.id).await?;
        Ok(Some(entity_to_domain(model, items)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Quote>> {
        let models = quote::Entity::find()
            .order_by_desc(quote::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut quotes = Vec::with_capacity(models.len());
        for model in models {
            let items = self.load_items(model.id).await?;
            quotes.push(entity_to_domain(model, items));
        }
        Ok(quotes)
    }

    async fn find_by_customer(&self, customer_id: i32) -> DomainResult<Vec<Quote>> {
        let models = quote::Entity::find()
            .filter(quote::Column::CustomerId.eq(customer_id))
            .order_by_desc(quote::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let mut quotes = Vec::with_capacity(models.len());
        for model in models {
            let items = self.load_items(model.id).await?;
            quotes.push(entity_to_domain(model, items));
        }
        Ok(quotes)
    }

    async fn save(&self, q: Quote) -> DomainResult<Quote> {
        let now = Utc::now();
        let txn = self.db.begin().await.map_err(db_err)?;

        let model = quote::ActiveModel {
            customer_id: Set(q.customer_id),
            vehicle_id: Set(q.vehicle_id),
            description: Set(q.description.clone()),
            status: Set(status_to_entity(q.status)),
            discount: Set(q.discount),
            labor_total: Set(q.labor_total),
            parts_total: Set(q.parts_total),
            grand_total: Set(q.grand_total),
            valid_until: Set(q.valid_until),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let header = model.insert(&txn).await.map_err(db_err)?;

        insert_items(&txn, header.id, &q.items).await.map_err(db_err)?;
        txn.commit().await.map_err(db_err)?;

        info!("Quote saved: {} (total {})", header.id, header.grand_total);
        self.find_by_id(header.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Quote", "id", header.id))
    }

    async fn update(&self, q: Quote) -> DomainResult<()> {
        let existing = quote::Entity::find_by_id(q.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Quote", "id", q.id));
        };

        let txn = self.db.begin().await.map_err(db_err)?;

        let model = quote::ActiveModel {
            id: Set(q.id),
            customer_id: Set(q.customer_id),
            vehicle_id: Set(q.vehicle_id),
            description: Set(q.description.clone()),
            status: Set(status_to_entity(q.status)),
            discount: Set(q.discount),
            labor_total: Set(q.labor_total),
            parts_total: Set(q.parts_total),
            grand_total: Set(q.grand_total),
            valid_until: Set(q.valid_until),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&txn).await.map_err(db_err)?;

        // Replace the full item set; the diff is never worth tracking at
        // this scale.
        quote_item::Entity::delete_many()
            .filter(quote_item::Column::QuoteId.eq(q.id))
            .exec(&txn)
            .await
            .map_err(db_err)?;
        insert_items(&txn, q.id, &q.items).await.map_err(db_err)?;

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await.map_err(db_err)?;

        quote_item::Entity::delete_many()
            .filter(quote_item::Column::QuoteId.eq(id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        let result = quote::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Quote", "id", id));
        }

        txn.commit().await.map_err(db_err)?;
        Ok(())
    }
}
