//! Quote totals calculation
//!
//! Pure arithmetic over caller-supplied line items; no persistence, no I/O.
//! Monetary values use fixed-precision decimals so repeated edits of a quote
//! never accumulate floating-point drift.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Invalid line item: {0}")]
    InvalidLineItem(&'static str),

    #[error("Discount cannot be negative")]
    InvalidDiscount,

    #[error("A quote needs at least one labor or part line item")]
    EmptyQuote,
}

/// A single priced row on a quote (labor or part).
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }
}

/// Computed subtotals and grand total for a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteTotals {
    pub labor_total: Decimal,
    pub parts_total: Decimal,
    pub grand_total: Decimal,
}

/// Total for a single line: `quantity × unit_price`, rounded to 2 decimal
/// places.
pub fn line_total(item: &LineItem) -> Result<Decimal, QuoteError> {
    if item.description.trim().is_empty() {
        return Err(QuoteError::InvalidLineItem("description is empty"));
    }
    if item.quantity <= Decimal::ZERO {
        return Err(QuoteError::InvalidLineItem("quantity must be positive"));
    }
    if item.unit_price < Decimal::ZERO {
        return Err(QuoteError::InvalidLineItem("unit price cannot be negative"));
    }
    Ok((item.quantity * item.unit_price).round_dp(2))
}

fn sum_totals(items: &[LineItem]) -> Result<Decimal, QuoteError> {
    let mut total = Decimal::ZERO;
    for item in items {
        total += line_total(item)?;
    }
    Ok(total)
}

/// Compute labor/parts subtotals and the discounted grand total.
///
/// The grand total is deliberately not floored at zero: a discount larger
/// than the subtotal yields a negative total and the caller decides what to
/// do with it.
pub fn compute_totals(
    labor_items: &[LineItem],
    part_items: &[LineItem],
    discount: Decimal,
) -> Result<QuoteTotals, QuoteError> {
    if labor_items.is_empty() && part_items.is_empty() {
        return Err(QuoteError::EmptyQuote);
    }
    if discount < Decimal::ZERO {
        return Err(QuoteError::InvalidDiscount);
    }

    let labor_total = sum_totals(labor_items)?;
    let parts_total = sum_totals(part_items)?;

    Ok(QuoteTotals {
        labor_total,
        parts_total,
        grand_total: labor_total + parts_total - discount,
    })
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(description: &str, quantity: Decimal, unit_price: Decimal) -> LineItem {
        LineItem::new(description, quantity, unit_price)
    }

    #[test]
    fn line_total_is_quantity_times_price() {
        let oil = item("Oil change", dec!(1), dec!(50));
        assert_eq!(line_total(&oil), Ok(dec!(50)));

        let pads = item("Brake pads", dec!(2), dec!(35.50));
        assert_eq!(line_total(&pads), Ok(dec!(71.00)));
    }

    #[test]
    fn line_total_rounds_to_cents() {
        let fluid = item("Brake fluid", dec!(0.33), dec!(10.10));
        // 0.33 * 10.10 = 3.333
        assert_eq!(line_total(&fluid), Ok(dec!(3.33)));
    }

    #[test]
    fn line_total_rejects_zero_quantity() {
        let bad = item("Labor", dec!(0), dec!(30));
        assert_eq!(
            line_total(&bad),
            Err(QuoteError::InvalidLineItem("quantity must be positive"))
        );
    }

    #[test]
    fn line_total_rejects_negative_price() {
        let bad = item("Labor", dec!(1), dec!(-1));
        assert_eq!(
            line_total(&bad),
            Err(QuoteError::InvalidLineItem("unit price cannot be negative"))
        );
    }

    #[test]
    fn line_total_rejects_blank_description() {
        let bad = item("   ", dec!(1), dec!(10));
        assert_eq!(
            line_total(&bad),
            Err(QuoteError::InvalidLineItem("description is empty"))
        );
    }

    #[test]
    fn free_line_is_allowed() {
        let freebie = item("Courtesy wash", dec!(1), dec!(0));
        assert_eq!(line_total(&freebie), Ok(dec!(0)));
    }

    #[test]
    fn totals_for_labor_only_quote() {
        let labor = vec![item("Oil change", dec!(1), dec!(50))];
        let totals = compute_totals(&labor, &[], Decimal::ZERO).unwrap();
        assert_eq!(totals.labor_total, dec!(50));
        assert_eq!(totals.parts_total, dec!(0));
        assert_eq!(totals.grand_total, dec!(50));
    }

    #[test]
    fn totals_with_parts_and_discount() {
        let labor = vec![item("Labor", dec!(2), dec!(30))];
        let parts = vec![item("Filter", dec!(1), dec!(20))];
        let totals = compute_totals(&labor, &parts, dec!(10)).unwrap();
        assert_eq!(totals.labor_total, dec!(60));
        assert_eq!(totals.parts_total, dec!(20));
        assert_eq!(totals.grand_total, dec!(70));
    }

    #[test]
    fn empty_quote_is_rejected() {
        assert_eq!(
            compute_totals(&[], &[], Decimal::ZERO),
            Err(QuoteError::EmptyQuote)
        );
    }

    #[test]
    fn negative_discount_is_rejected() {
        let labor = vec![item("Labor", dec!(1), dec!(30))];
        assert_eq!(
            compute_totals(&labor, &[], dec!(-5)),
            Err(QuoteError::InvalidDiscount)
        );
    }

    #[test]
    fn oversized_discount_yields_negative_grand_total() {
        let labor = vec![item("Labor", dec!(1), dec!(30))];
        let totals = compute_totals(&labor, &[], dec!(40)).unwrap();
        assert_eq!(totals.grand_total, dec!(-10));
    }

    #[test]
    fn invalid_item_anywhere_fails_the_computation() {
        let labor = vec![item("Labor", dec!(1), dec!(30))];
        let parts = vec![item("", dec!(1), dec!(5))];
        assert_eq!(
            compute_totals(&labor, &parts, Decimal::ZERO),
            Err(QuoteError::InvalidLineItem("description is empty"))
        );
    }
}
