//! Cafeteria meals, orders, and pickup tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A meal offered by a cafeteria vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long-form description.
    #[serde(default)]
    pub description: String,
    /// Unit price in INR.
    pub price: f64,
    /// Image URL, when the vendor uploaded one.
    #[serde(default)]
    pub image: Option<String>,
    /// Menu category.
    #[serde(default)]
    pub category: Option<String>,
    /// Whether the meal is vegetarian.
    #[serde(default)]
    pub is_vegetarian: bool,
    /// Average rating, when rated.
    #[serde(default)]
    pub rating: Option<f64>,
    /// Whether the meal can currently be ordered.
    #[serde(default = "default_available")]
    pub available: bool,
    /// Vendor display name, when the server joins it in.
    #[serde(default)]
    pub vendor_name: Option<String>,
}

fn default_available() -> bool {
    true
}

/// Body for creating or updating a meal (vendor-side).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDraft {
    /// Display name.
    pub name: String,
    /// Long-form description.
    pub description: String,
    /// Unit price in INR.
    pub price: f64,
    /// Menu category.
    pub category: String,
    /// Whether the meal is vegetarian.
    pub is_vegetarian: bool,
    /// Whether the meal can currently be ordered.
    pub available: bool,
    /// Image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Body for placing a meal order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOrderRequest {
    /// Meal being ordered.
    pub meal_id: String,
    /// Number of portions.
    pub quantity: u32,
    /// Pickup slot (`breakfast`, `lunch`, `dinner`).
    pub pickup_time: String,
}

/// Server acknowledgement of a placed order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealOrderReceipt {
    /// Pickup token issued for the order, when returned inline.
    #[serde(default)]
    pub token: Option<MealToken>,
    /// Optional server confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Lifecycle status of a pickup token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenStatus {
    /// Redeemable at the counter.
    Active,
    /// Already redeemed.
    Used,
    /// Expired before pickup.
    Expired,
    /// Cancelled by the user.
    Cancelled,
}

/// Summary of the meal a token refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealSummary {
    /// Meal identifier, when the server includes it.
    #[serde(rename = "_id", alias = "id", default)]
    pub id: Option<String>,
    /// Meal display name.
    pub name: String,
    /// Unit price in INR, when included.
    #[serde(default)]
    pub price: Option<f64>,
}

/// A cafeteria pickup token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealToken {
    /// Server-assigned identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Human-readable token number shown at the counter.
    pub token_number: String,
    /// Meal the token redeems.
    pub meal: MealSummary,
    /// Number of portions.
    pub quantity: u32,
    /// Pickup slot.
    pub pickup_time: String,
    /// Current status.
    pub status: TokenStatus,
    /// When the token was issued.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// When the token stops being redeemable.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl MealToken {
    /// Whether the token can still be redeemed or cancelled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TokenStatus::Active
    }
}
