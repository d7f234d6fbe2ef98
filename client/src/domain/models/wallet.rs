//! Wallet balance, transactions, and payment payloads.
//!
//! Amounts are plain `f64` INR values, matching the wire format the backend
//! uses. The precision caveat of binary floats on money is inherited from
//! that contract; the client never does arithmetic on amounts beyond
//! carrying server-computed values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of transactions kept in the wallet's recent list.
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

/// One wallet transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Signed amount in INR.
    pub amount: f64,
    /// Transaction kind (`deposit`, `payment`, ...), when provided.
    #[serde(rename = "type", default)]
    pub transaction_type: Option<String>,
    /// Human-readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// When the transaction happened.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
}

/// Balance plus the short recent-transactions list shown on the wallet card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletSummary {
    /// Current balance in INR.
    pub balance: f64,
    /// Most recent transactions, newest first, at most
    /// [`RECENT_TRANSACTION_LIMIT`] entries.
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
}

/// Server payload after a deposit or payment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletMutation {
    /// Balance after the mutation.
    pub balance: f64,
    /// The transaction the mutation created.
    pub transaction: Transaction,
}

/// One page of transaction history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// Transactions on this page.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Total number of transactions across all pages.
    #[serde(default)]
    pub total_transactions: u32,
    /// 1-based page number.
    #[serde(default)]
    pub current_page: u32,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
}

/// Body for adding money to the wallet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositRequest {
    /// Amount to add in INR.
    pub amount: f64,
}

/// Body for paying a vendor from the wallet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    /// Amount to pay in INR.
    pub amount: f64,
    /// What the payment is for.
    pub description: String,
    /// Vendor receiving the payment.
    pub vendor_id: String,
}
