//! Cafeteria vendors and vendor-side payloads.

use serde::{Deserialize, Serialize};

/// Operational status of a vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    /// Open for orders.
    Active,
    /// Temporarily closed.
    Inactive,
    /// Awaiting admin approval.
    Pending,
}

/// A cafeteria vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Trading name shown to users.
    pub business_name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Image URL, when uploaded.
    #[serde(default)]
    pub image: Option<String>,
    /// Average rating.
    #[serde(default)]
    pub rating: f64,
    /// Number of ratings received.
    #[serde(default)]
    pub total_ratings: u32,
    /// Operational status.
    pub status: VendorStatus,
    /// Menu categories offered.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Contact phone number.
    #[serde(default)]
    pub phone_number: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Stall or shop location on campus.
    #[serde(default)]
    pub location: Option<String>,
}

/// Body for updating the vendor's own profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProfileUpdate {
    /// Trading name shown to users.
    pub business_name: String,
    /// Long-form description.
    pub description: String,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Stall or shop location on campus.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Menu categories offered.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Body for toggling the vendor's operational status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorStatusUpdate {
    /// Requested status.
    pub status: VendorStatus,
}

/// Body for requesting a payout of accumulated earnings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalRequest {
    /// Amount to withdraw in INR.
    pub amount: f64,
}

/// Server acknowledgement of a withdrawal request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalReceipt {
    /// Withdrawal identifier, when assigned.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Amount requested, when echoed back.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Processing status, when reported.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional server confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}
