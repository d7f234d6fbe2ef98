//! Admin dashboard aggregates.

use serde::{Deserialize, Serialize};

use super::events::Event;
use super::wallet::Transaction;

/// Headline counters shown on the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Registered platform users.
    #[serde(default)]
    pub total_users: u32,
    /// Platform revenue in INR.
    #[serde(default)]
    pub total_revenue: f64,
    /// Events currently open.
    #[serde(default)]
    pub active_events: u32,
    /// Vendors currently active.
    #[serde(default)]
    pub active_vendors: u32,
}

/// Full dashboard payload from `GET /api/dashboard/stats`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Headline counters.
    #[serde(default)]
    pub stats: DashboardStats,
    /// Most recent platform transactions.
    #[serde(default)]
    pub recent_transactions: Vec<Transaction>,
    /// Upcoming events.
    #[serde(default)]
    pub upcoming_events: Vec<Event>,
}
