//! The transaction model.

use serde::Deserialize;
use time::{Date, OffsetDateTime};

/// A single posted or pending monetary movement against an account.
///
/// Amounts are signed: deposits and refunds are positive, spending is
/// negative. The sign only drives color-coding at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Transaction {
    /// The backend's identifier for the transaction.
    pub id: String,
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The signed amount.
    pub amount: f64,
    /// The description reported by the source.
    #[serde(default)]
    pub description: String,
    /// The date the transaction happened.
    pub transaction_date: Date,
    /// When the transaction was posted, if it has been. Preferred over
    /// [transaction_date](Transaction::transaction_date) for display.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub posted_date: Option<OffsetDateTime>,
    /// The counterparty, when the source identified one.
    #[serde(default)]
    pub payee: Option<String>,
    /// Free-form memo text.
    #[serde(default)]
    pub memo: Option<String>,
    /// Whether the transaction has not yet settled.
    #[serde(default)]
    pub pending: Option<bool>,
    /// The spending category, when the source assigned one.
    #[serde(default)]
    pub category: Option<String>,
}

impl Transaction {
    /// The date shown to the user: the posted date when the transaction has
    /// settled, otherwise the transaction date.
    pub fn display_date(&self) -> Date {
        match self.posted_date {
            Some(posted) => posted.date(),
            None => self.transaction_date,
        }
    }

    /// The label shown in the description column: the payee when known,
    /// otherwise the raw description.
    pub fn display_description(&self) -> &str {
        match self.payee.as_deref() {
            Some(payee) if !payee.is_empty() => payee,
            _ => &self.description,
        }
    }

    /// Whether the transaction should carry the "(Pending)" marker.
    pub fn is_pending(&self) -> bool {
        self.pending.unwrap_or(false)
    }
}


#[cfg(test)]
mod display_description_tests {
    use time::macros::date;

    use crate::test_utils::transaction;

    #[test]
    fn prefers_the_payee() {
        let mut purchase = transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 03));
        purchase.description = "POS 992 1100".to_owned();
        purchase.payee = Some("Corner Grocery".to_owned());

        assert_eq!(purchase.display_description(), "Corner Grocery");
    }

    #[test]
    fn ignores_an_empty_payee() {
        let mut purchase = transaction("txn-1", "act-1", -20.0, date!(2026 - 08 - 03));
        purchase.description = "POS 992 1100".to_owned();
        purchase.payee = Some(String::new());

        assert_eq!(purchase.display_description(), "POS 992 1100");
    }
}
