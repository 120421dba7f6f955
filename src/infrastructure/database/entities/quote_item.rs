//! Quote line item entity

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Labor or part line
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum ItemKind {
    #[sea_orm(string_value = "Labor")]
    Labor,
    #[sea_orm(string_value = "Part")]
    Part,
}

/// A single priced line on a quote
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quote_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub quote_id: i32,

    pub kind: ItemKind,

    pub description: String,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub quantity: Decimal,

    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub unit_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quote::Entity",
        from = "Column::QuoteId",
        to = "super::quote::Column::Id"
    )]
    Quote,
}

impl Related<super::quote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
