//! Service order domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::types::{DomainError, DomainResult};

/// Service order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Open,
    InProgress,
    Completed,
    /// Vehicle handed back to the customer
    Delivered,
    Canceled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::InProgress => write!(f, "InProgress"),
            Self::Completed => write!(f, "Completed"),
            Self::Delivered => write!(f, "Delivered"),
            Self::Canceled => write!(f, "Canceled"),
        }
    }
}

/// A job the workshop has agreed to carry out
#[derive(Debug, Clone)]
pub struct ServiceOrder {
    pub id: i32,
    pub customer_id: i32,
    pub vehicle_id: Option<i32>,
    /// Quote this order was converted from, when there is one
    pub quote_id: Option<i32>,
    pub description: String,
    pub status: OrderStatus,
    pub total: Decimal,
    pub completed_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceOrder {
    /// Move the order to `target`, enforcing the workflow
    /// Open → InProgress → Completed → Delivered, with cancelation allowed
    /// while the work has not finished.
    pub fn transition_to(&mut self, target: OrderStatus) -> DomainResult<()> {
        let allowed = matches!(
            (self.status, target),
            (OrderStatus::Open, OrderStatus::InProgress)
                | (OrderStatus::InProgress, OrderStatus::Completed)
                | (OrderStatus::Completed, OrderStatus::Delivered)
                | (OrderStatus::Open, OrderStatus::Canceled)
                | (OrderStatus::InProgress, OrderStatus::Canceled)
        );
        if !allowed {
            return Err(DomainError::Validation(format!(
                "Service order cannot go from {} to {}",
                self.status, target
            )));
        }

        self.status = target;
        match target {
            OrderStatus::Completed => self.completed_at = Some(Utc::now()),
            OrderStatus::Delivered => self.delivered_at = Some(Utc::now()),
            _ => {}
        }
        Ok(())
    }

    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        self.description
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn order(status: OrderStatus) -> ServiceOrder {
        ServiceOrder {
            id: 1,
            customer_id: 1,
            vehicle_id: Some(2),
            quote_id: None,
            description: "Chain and sprocket replacement".into(),
            status,
            total: dec!(180),
            completed_at: None,
            delivered_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn happy_path_runs_open_to_delivered() {
        let mut o = order(OrderStatus::Open);
        o.transition_to(OrderStatus::InProgress).unwrap();
        o.transition_to(OrderStatus::Completed).unwrap();
        assert!(o.completed_at.is_some());
        o.transition_to(OrderStatus::Delivered).unwrap();
        assert!(o.delivered_at.is_some());
    }

    #[test]
    fn cannot_skip_stages() {
        let mut o = order(OrderStatus::Open);
        assert!(o.transition_to(OrderStatus::Completed).is_err());
        assert!(o.transition_to(OrderStatus::Delivered).is_err());
    }

    #[test]
    fn cancel_allowed_only_before_completion() {
        let mut o = order(OrderStatus::Open);
        assert!(o.transition_to(OrderStatus::Canceled).is_ok());

        let mut o = order(OrderStatus::InProgress);
        assert!(o.transition_to(OrderStatus::Canceled).is_ok());

        let mut o = order(OrderStatus::Completed);
        assert!(o.transition_to(OrderStatus::Canceled).is_err());
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [OrderStatus::Delivered, OrderStatus::Canceled] {
            let mut o = order(terminal);
            for target in [
                OrderStatus::Open,
                OrderStatus::InProgress,
                OrderStatus::Completed,
                OrderStatus::Delivered,
                OrderStatus::Canceled,
            ] {
                assert!(o.transition_to(target).is_err());
            }
        }
    }
}
