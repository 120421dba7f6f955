//! Accounts receivable/payable domain entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::shared::types::{DomainError, DomainResult};

/// Direction of an account entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Money owed to the workshop
    Receivable,
    /// Money the workshop owes
    Payable,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Receivable => write!(f, "Receivable"),
            Self::Payable => write!(f, "Payable"),
        }
    }
}

/// Settlement status of an account entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Pending,
    Paid,
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Paid => write!(f, "Paid"),
        }
    }
}

/// One receivable or payable line in the books
#[derive(Debug, Clone)]
pub struct AccountEntry {
    pub id: i32,
    pub kind: EntryKind,
    pub description: String,
    /// Customer or supplier the entry refers to, free-form
    pub counterparty: Option<String>,
    pub amount: Decimal,
    pub due_date: Option<DateTime<Utc>>,
    pub status: EntryStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AccountEntry {
    /// Still pending past its due date.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == EntryStatus::Pending && self.due_date.is_some_and(|due| due < now)
    }

    /// Mark the entry as paid. Settling twice is a validation error.
    pub fn settle(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status == EntryStatus::Paid {
            return Err(DomainError::Validation(format!(
                "Entry {} is already paid",
                self.id
            )));
        }
        self.status = EntryStatus::Paid;
        self.paid_at = Some(now);
        Ok(())
    }

    /// Case-insensitive match against the list-view search box.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.description.to_lowercase().contains(&term)
            || self
                .counterparty
                .as_deref()
                .is_some_and(|c| c.to_lowercase().contains(&term))
    }
}

/// Aggregate view over all open entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceSummary {
    /// Sum of pending receivable amounts
    pub receivable_open: Decimal,
    /// Sum of pending payable amounts
    pub payable_open: Decimal,
    pub receivable_overdue: u64,
    pub payable_overdue: u64,
    /// `receivable_open - payable_open`
    pub balance: Decimal,
}

/// Fold a set of entries into the dashboard summary. Paid entries only stop
/// counting toward the open totals; they stay in the books.
pub fn summarize(entries: &[AccountEntry], now: DateTime<Utc>) -> FinanceSummary {
    let mut summary = FinanceSummary {
        receivable_open: Decimal::ZERO,
        payable_open: Decimal::ZERO,
        receivable_overdue: 0,
        payable_overdue: 0,
        balance: Decimal::ZERO,
    };

    for entry in entries {
        if entry.status != EntryStatus::Pending {
            continue;
        }
        match entry.kind {
            EntryKind::Receivable => {
                summary.receivable_open += entry.amount;
                if entry.is_overdue(now) {
                    summary.receivable_overdue += 1;
                }
            }
            EntryKind::Payable => {
                summary.payable_open += entry.amount;
                if entry.is_overdue(now) {
                    summary.payable_overdue += 1;
                }
            }
        }
    }

    summary.balance = summary.receivable_open - summary.payable_open;
    summary
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn entry(kind: EntryKind, amount: Decimal, due_in_days: i64) -> AccountEntry {
        AccountEntry {
            id: 1,
            kind,
            description: "Entry".into(),
            counterparty: None,
            amount,
            due_date: Some(Utc::now() + Duration::days(due_in_days)),
            status: EntryStatus::Pending,
            paid_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn overdue_only_when_pending_and_past_due() {
        let now = Utc::now();
        assert!(entry(EntryKind::Receivable, dec!(100), -1).is_overdue(now));
        assert!(!entry(EntryKind::Receivable, dec!(100), 1).is_overdue(now));

        let mut paid = entry(EntryKind::Receivable, dec!(100), -1);
        paid.settle(now).unwrap();
        assert!(!paid.is_overdue(now));
    }

    #[test]
    fn settle_records_timestamp_and_rejects_double_settlement() {
        let now = Utc::now();
        let mut e = entry(EntryKind::Payable, dec!(50), 5);
        e.settle(now).unwrap();
        assert_eq!(e.status, EntryStatus::Paid);
        assert_eq!(e.paid_at, Some(now));
        assert!(e.settle(now).is_err());
    }

    #[test]
    fn summary_splits_kinds_and_counts_overdue() {
        let now = Utc::now();
        let mut paid = entry(EntryKind::Receivable, dec!(500), -3);
        paid.settle(now).unwrap();

        let entries = vec![
            entry(EntryKind::Receivable, dec!(300), -2),
            entry(EntryKind::Receivable, dec!(200), 10),
            entry(EntryKind::Payable, dec!(150), -1),
            paid,
        ];

        let s = summarize(&entries, now);
        assert_eq!(s.receivable_open, dec!(500));
        assert_eq!(s.payable_open, dec!(150));
        assert_eq!(s.receivable_overdue, 1);
        assert_eq!(s.payable_overdue, 1);
        assert_eq!(s.balance, dec!(350));
    }

    #[test]
    fn summary_of_no_entries_is_zero() {
        let s = summarize(&[], Utc::now());
        assert_eq!(s.receivable_open, Decimal::ZERO);
        assert_eq!(s.payable_open, Decimal::ZERO);
        assert_eq!(s.balance, Decimal::ZERO);
    }
}
