//! Quote entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quote status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum QuoteStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
    #[sea_orm(string_value = "Converted")]
    Converted,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Quote header; line items live in `quote_items`
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quotes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,

    pub vehicle_id: Option<i32>,

    pub description: Option<String>,

    pub status: QuoteStatus,

    /// Flat discount on the grand total
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub discount: Decimal,

    /// Stored totals, recomputed from the line items on every write
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub labor_total: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub parts_total: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub grand_total: Decimal,

    pub valid_until: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::quote_item::Entity")]
    QuoteItem,
}

impl Related<super::quote_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QuoteItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
