//! Platform-wide settings managed by administrators.

use serde::{Deserialize, Serialize};

/// Platform settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// School display name.
    pub school_name: String,
    /// Support contact email.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Support contact phone.
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Whether platform notifications are enabled.
    #[serde(default)]
    pub notification_enabled: bool,
    /// Whether parents may self-register.
    #[serde(default)]
    pub allow_parent_registration: bool,
    /// Whether vendors may self-register.
    #[serde(default)]
    pub allow_vendor_registration: bool,
    /// Per-student daily spend cap in INR.
    #[serde(default)]
    pub max_daily_spend_limit: f64,
}
