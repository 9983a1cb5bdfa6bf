//! Wire types shared with the bookkeeping backend.

use serde::{Deserialize, Serialize};
use time::Date;

/// The envelope every backend response body is wrapped in.
///
/// The payload sits in `data`; `error` is only populated when `success` is
/// false. Beyond unwrapping, the shape of `data` is trusted as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the backend handled the request.
    pub success: bool,
    /// The payload, present on success.
    pub data: Option<T>,
    /// A human-readable message, present on failure.
    pub error: Option<String>,
}

/// The result of a SimpleFin sync run, reported by the backend.
///
/// The numbers are passed through to the UI unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SyncStats {
    /// How many existing accounts had their balance refreshed.
    pub accounts_updated: u32,
    /// How many accounts were seen for the first time.
    pub accounts_created: u32,
    /// How many new transactions were pulled in.
    pub transactions_created: u32,
    /// How many balance history records were written.
    pub balance_records_created: u32,
    /// Wall-clock duration of the sync run.
    pub sync_duration_ms: u64,
}

/// The request body for creating an account through the backend.
#[derive(Debug, Clone, Serialize)]
pub struct CreateAccountRequest {
    /// The account name.
    pub name: String,
    /// The institution holding the account.
    pub institution: String,
    /// A label such as "checking" or "credit".
    pub account_type: String,
    /// The opening balance in dollars.
    pub balance: f64,
}

/// The request body for creating a transaction through the backend.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTransactionRequest {
    /// The account the transaction belongs to.
    pub account_id: String,
    /// The signed amount in dollars; spending is negative.
    pub amount: f64,
    /// The description shown in the transaction table.
    pub description: String,
    /// The date the transaction happened.
    pub transaction_date: Date,
    /// The spending category, if any.
    pub category: Option<String>,
}
