//! SeaORM implementation of FinanceRepository

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::info;

use super::db_err;
use crate::domain::finance::{AccountEntry, EntryKind, EntryStatus, FinanceRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::account_entry;

fn kind_to_domain(k: account_entry::EntryKind) -> EntryKind {
    match k {
        account_entry::EntryKind::Receivable => EntryKind::Receivable,
        account_entry::EntryKind::Payable => EntryKind::Payable,
    }
}

fn kind_to_entity(k: EntryKind) -> account_entry::EntryKind {
    match k {
        EntryKind::Receivable => account_entry::EntryKind::Receivable,
        EntryKind::Payable => account_entry::EntryKind::Payable,
    }
}

fn status_to_domain(s: account_entry::EntryStatus) -> EntryStatus {
    match s {
        account_entry::EntryStatus::Pending => EntryStatus::Pending,
        account_entry::EntryStatus::Paid => EntryStatus::Paid,
    }
}

fn status_to_entity(s: EntryStatus) -> account_entry::EntryStatus {
    match s {
        EntryStatus::Pending => account_entry::EntryStatus::Pending,
        EntryStatus::Paid => account_entry::EntryStatus::Paid,
    }
}

fn entity_to_domain(e: account_entry::Model) -> AccountEntry {
    AccountEntry {
        id: e.id,
        kind: kind_to_domain(e.kind),
        description: e.description,
        counterparty: e.counterparty,
        amount: e.amount,
        due_date: e.due_date,
        status: status_to_domain(e.status),
        paid_at: e.paid_at,
        created_at: e.created_at,
        updated_at: e.updated_at,
    }
}

pub struct SeaOrmFinanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmFinanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FinanceRepository for SeaOrmFinanceRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<AccountEntry>> {
        let model = account_entry::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<AccountEntry>> {
        let models = account_entry::Entity::find()
            .order_by_asc(account_entry::Column::DueDate)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn save(&self, e: AccountEntry) -> DomainResult<AccountEntry> {
        let now = Utc::now();
        let model = account_entry::ActiveModel {
            kind: Set(kind_to_entity(e.kind)),
            description: Set(e.description),
            counterparty: Set(e.counterparty),
            amount: Set(e.amount),
            due_date: Set(e.due_date),
            status: Set(status_to_entity(e.status)),
            paid_at: Set(e.paid_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!("Account entry saved: {} ({})", result.id, result.amount);
        Ok(entity_to_domain(result))
    }

    async fn update(&self, e: AccountEntry) -> DomainResult<()> {
        let existing = account_entry::Entity::find_by_id(e.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("AccountEntry", "id", e.id));
        };

        let model = account_entry::ActiveModel {
            id: Set(e.id),
            kind: Set(kind_to_entity(e.kind)),
            description: Set(e.description),
            counterparty: Set(e.counterparty),
            amount: Set(e.amount),
            due_date: Set(e.due_date),
            status: Set(status_to_entity(e.status)),
            paid_at: Set(e.paid_at),
            created_at: Set(existing.created_at),
            updated_at: Set(Utc::now()),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = account_entry::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("AccountEntry", "id", id));
        }
        Ok(())
    }
}
