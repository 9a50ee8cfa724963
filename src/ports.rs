//! Storage seams. The HTTP layer and the use cases only see these traits;
//! `adapters` holds the SQLite implementations.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewPurchase, NewReseller, Purchase, Reseller};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Conflict(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait ResellerRepository: Send + Sync {
    /// Fails with `RepositoryError::Conflict` when the CPF is already taken.
    async fn insert(&self, reseller: &NewReseller) -> RepositoryResult<Reseller>;

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Reseller>>;
}

#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    async fn insert(&self, purchase: &NewPurchase) -> RepositoryResult<Purchase>;

    /// All purchases of a reseller, in insertion order.
    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Vec<Purchase>>;
}
