//! Service order entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service order status
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Open")]
    Open,
    #[sea_orm(string_value = "InProgress")]
    InProgress,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Delivered")]
    Delivered,
    #[sea_orm(string_value = "Canceled")]
    Canceled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Service order record
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub customer_id: i32,

    pub vehicle_id: Option<i32>,

    /// Source quote when the order was converted from one
    pub quote_id: Option<i32>,

    pub description: String,

    pub status: OrderStatus,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub total: Decimal,

    pub completed_at: Option<DateTime<Utc>>,

    pub delivered_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
