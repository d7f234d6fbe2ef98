//! Domain models mirroring the backend's JSON wire shapes.
//!
//! All structs decode the backend's camelCase payloads; Mongo-style `_id`
//! fields are accepted under both `_id` and `id`.

pub mod dashboard;
pub mod events;
pub mod meals;
pub mod settings;
pub mod user;
pub mod vendors;
pub mod wallet;

pub use dashboard::{DashboardSnapshot, DashboardStats};
pub use events::{CancellationAck, Event, EventDraft, RegistrationResponse};
pub use meals::{
    Meal, MealDraft, MealOrderReceipt, MealOrderRequest, MealSummary, MealToken, TokenStatus,
};
pub use settings::Settings;
pub use user::{AuthResponse, Credentials, Registration, Role, User};
pub use vendors::{
    Vendor, VendorProfileUpdate, VendorStatus, VendorStatusUpdate, WithdrawalReceipt,
    WithdrawalRequest,
};
pub use wallet::{
    DepositRequest, PaymentRequest, Transaction, TransactionPage, WalletMutation, WalletSummary,
    RECENT_TRANSACTION_LIMIT,
};
