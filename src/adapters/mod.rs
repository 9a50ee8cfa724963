pub mod sqlite_purchase_repository;
pub mod sqlite_reseller_repository;

pub use sqlite_purchase_repository::SqlitePurchaseRepository;
pub use sqlite_reseller_repository::SqliteResellerRepository;

#[cfg(test)]
pub mod memory;
