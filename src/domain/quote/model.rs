//! Service quote ("budget") domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::calculator::{self, LineItem, QuoteError};
use crate::shared::types::{DomainError, DomainResult};

/// Quote lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStatus {
    /// Awaiting the customer's decision
    Pending,
    Approved,
    Rejected,
    /// Approved and turned into a service order
    Converted,
}

impl Default for QuoteStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Approved => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Converted => write!(f, "Converted"),
        }
    }
}

/// Whether a quote line prices labor or a part
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteItemKind {
    Labor,
    Part,
}

impl std::fmt::Display for QuoteItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Labor => write!(f, "Labor"),
            Self::Part => write!(f, "Part"),
        }
    }
}

/// A persisted quote line. `quantity × unit_price` is never stored; totals
/// are recomputed from the lines on every write.
#[derive(Debug, Clone)]
pub struct QuoteItem {
    pub id: i32,
    pub kind: QuoteItemKind,
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl QuoteItem {
    pub fn as_line_item(&self) -> LineItem {
        LineItem::new(self.description.clone(), self.quantity, self.unit_price)
    }
}

/// A price estimate awaiting the customer's approval
#[derive(Debug, Clone)]
pub struct Quote {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    pub description: Option<String>,
    pub status: QuoteStatus,
    pub discount: Decimal,
    pub labor_total: Decimal,
    pub parts_total: Decimal,
    pub grand_total: Decimal,
    pub valid_until: Option<DateTime<Utc>>,
    pub items: Vec<QuoteItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Quote {
    pub fn labor_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .filter(|i| i.kind == QuoteItemKind::Labor)
            .map(QuoteItem::as_line_item)
            .collect()
    }

    pub fn part_items(&self) -> Vec<LineItem> {
        self.items
            .iter()
            .filter(|i| i.kind == QuoteItemKind::Part)
            .map(QuoteItem::as_line_item)
            .collect()
    }

    /// Recompute stored totals from the current lines and discount.
    pub fn recompute_totals(&mut self) -> Result<(), QuoteError> {
        let totals =
            calculator::compute_totals(&self.labor_items(), &self.part_items(), self.discount)?;
        self.labor_total = totals.labor_total;
        self.parts_total = totals.parts_total;
        self.grand_total = totals.grand_total;
        Ok(())
    }

    fn transition(&mut self, target: QuoteStatus) -> DomainResult<()> {
        let allowed = matches!(
            (self.status, target),
            (QuoteStatus::Pending, QuoteStatus::Approved)
                | (QuoteStatus::Pending, QuoteStatus::Rejected)
                | (QuoteStatus::Approved, QuoteStatus::Converted)
        );
        if !allowed {
            return Err(DomainError::Validation(format!(
                "Quote cannot go from {} to {}",
                self.status, target
            )));
        }
        self.status = target;
        Ok(())
    }

    pub fn approve(&mut self) -> DomainResult<()> {
        self.transition(QuoteStatus::Approved)
    }

    pub fn reject(&mut self) -> DomainResult<()> {
        self.transition(QuoteStatus::Rejected)
    }

    pub fn mark_converted(&mut self) -> DomainResult<()> {
        self.transition(QuoteStatus::Converted)
    }

    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&term))
            || self
                .items
                .iter()
                .any(|i| i.description.to_lowercase().contains(&term))
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_quote() -> Quote {
        Quote {
            id: 1,
            customer_id: 1,
            vehicle_id: None,
            description: Some("Front brake overhaul".into()),
            status: QuoteStatus::Pending,
            discount: Decimal::ZERO,
            labor_total: Decimal::ZERO,
            parts_total: Decimal::ZERO,
            grand_total: Decimal::ZERO,
            valid_until: None,
            items: vec![
                QuoteItem {
                    id: 1,
                    kind: QuoteItemKind::Labor,
                    description: "Replace brake pads".into(),
                    quantity: dec!(1.5),
                    unit_price: dec!(40),
                },
                QuoteItem {
                    id: 2,
                    kind: QuoteItemKind::Part,
                    description: "Brake pad set".into(),
                    quantity: dec!(1),
                    unit_price: dec!(55),
                },
            ],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn recompute_totals_fills_all_three_fields() {
        let mut q = sample_quote();
        q.discount = dec!(5);
        q.recompute_totals().unwrap();
        assert_eq!(q.labor_total, dec!(60.00));
        assert_eq!(q.parts_total, dec!(55));
        assert_eq!(q.grand_total, dec!(110.00));
    }

    #[test]
    fn recompute_fails_without_items() {
        let mut q = sample_quote();
        q.items.clear();
        assert_eq!(q.recompute_totals(), Err(QuoteError::EmptyQuote));
    }

    #[test]
    fn pending_quote_can_be_approved_or_rejected() {
        let mut q = sample_quote();
        assert!(q.approve().is_ok());
        assert_eq!(q.status, QuoteStatus::Approved);

        let mut q = sample_quote();
        assert!(q.reject().is_ok());
        assert_eq!(q.status, QuoteStatus::Rejected);
    }

    #[test]
    fn only_approved_quotes_convert() {
        let mut q = sample_quote();
        assert!(q.mark_converted().is_err());

        q.approve().unwrap();
        assert!(q.mark_converted().is_ok());
        assert_eq!(q.status, QuoteStatus::Converted);
    }

    #[test]
    fn rejected_quote_is_terminal() {
        let mut q = sample_quote();
        q.reject().unwrap();
        assert!(q.approve().is_err());
        assert!(q.mark_converted().is_err());
    }

    #[test]
    fn search_matches_quote_and_line_descriptions() {
        let q = sample_quote();
        assert!(q.matches_search("brake overhaul"));
        assert!(q.matches_search("pad set"));
        assert!(!q.matches_search("chain"));
    }
}
