//! Accounts receivable/payable entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Entry direction
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(15))")]
pub enum EntryKind {
    #[sea_orm(string_value = "Receivable")]
    Receivable,
    #[sea_orm(string_value = "Payable")]
    Payable,
}

/// Settlement status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum EntryStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Paid")]
    Paid,
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// One line in the books
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "account_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub kind: EntryKind,

    pub description: String,

    /// Customer or supplier name, free-form
    pub counterparty: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub amount: Decimal,

    pub due_date: Option<DateTime<Utc>>,

    pub status: EntryStatus,

    pub paid_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
