//! Application use cases. Each one is built from explicit collaborators at
//! the composition root (`AppState`) and knows nothing about HTTP.

pub mod cashback_breakdown;
pub mod login;
pub mod record_purchase;
pub mod register_reseller;

pub use cashback_breakdown::CashbackBreakdown;
pub use login::{Credentials, Login};
pub use record_purchase::{PurchaseRequest, RecordPurchase};
pub use register_reseller::{RegisterReseller, ResellerRegistration};
