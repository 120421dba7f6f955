//! Parts inventory domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::types::{DomainError, DomainResult};

/// A stocked spare part
#[derive(Debug, Clone)]
pub struct Part {
    pub id: i32,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    /// On-hand quantity
    pub quantity: i32,
    /// Reorder threshold
    pub min_quantity: i32,
    pub unit_price: Decimal,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Part {
    /// On-hand quantity is at or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }

    /// Apply a stock movement (positive receipt, negative consumption).
    /// Stock can reach zero but never go negative.
    pub fn adjust_stock(&mut self, delta: i32) -> DomainResult<i32> {
        let new_quantity = self.quantity.checked_add(delta).ok_or_else(|| {
            DomainError::Validation(format!(
                "Stock adjustment of {} for '{}' is out of range",
                delta, self.name
            ))
        })?;
        if new_quantity < 0 {
            return Err(DomainError::Validation(format!(
                "Cannot remove {} units of '{}': only {} in stock",
                delta.unsigned_abs(),
                self.name,
                self.quantity
            )));
        }
        self.quantity = new_quantity;
        Ok(self.quantity)
    }

    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self
                .sku
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
            || self
                .supplier
                .as_deref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn part(quantity: i32, min_quantity: i32) -> Part {
        Part {
            id: 1,
            name: "Oil filter".into(),
            sku: Some("OF-100".into()),
            description: None,
            quantity,
            min_quantity,
            unit_price: dec!(15.90),
            supplier: Some("MotoParts Ltd".into()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn low_stock_at_or_below_threshold() {
        assert!(part(3, 5).is_low_stock());
        assert!(part(5, 5).is_low_stock());
        assert!(!part(6, 5).is_low_stock());
    }

    #[test]
    fn adjust_stock_applies_receipts_and_consumption() {
        let mut p = part(10, 2);
        assert_eq!(p.adjust_stock(5).unwrap(), 15);
        assert_eq!(p.adjust_stock(-15).unwrap(), 0);
    }

    #[test]
    fn adjust_stock_rejects_going_negative() {
        let mut p = part(2, 1);
        assert!(p.adjust_stock(-3).is_err());
        assert_eq!(p.quantity, 2);
    }

    #[test]
    fn adjust_stock_rejects_out_of_range_deltas() {
        let mut p = part(i32::MAX, 1);
        assert!(p.adjust_stock(1).is_err());
        assert_eq!(p.quantity, i32::MAX);

        let mut p = part(2, 1);
        assert!(p.adjust_stock(i32::MIN).is_err());
        assert_eq!(p.quantity, 2);
    }

    #[test]
    fn search_matches_name_sku_and_supplier() {
        let p = part(1, 1);
        assert!(p.matches_search("oil"));
        assert!(p.matches_search("of-100"));
        assert!(p.matches_search("motoparts"));
        assert!(!p.matches_search("spark"));
    }
}
