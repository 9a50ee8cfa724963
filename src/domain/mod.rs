//! Framework-agnostic entities and the cashback rules that operate on them.

pub mod cashback;
pub mod money;
pub mod purchase;
pub mod reseller;

pub use cashback::{CashbackAllocation, CashbackError, Classification, Tier, TierClassifier};
pub use purchase::{NewPurchase, Purchase, PurchaseStatus, PurchaseView};
pub use reseller::{NewReseller, Reseller};
