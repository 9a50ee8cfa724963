//! In-memory repositories for unit tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::{NewPurchase, NewReseller, Purchase, Reseller};
use crate::ports::{PurchaseRepository, RepositoryError, RepositoryResult, ResellerRepository};

#[derive(Default)]
pub struct InMemoryResellerRepository {
    resellers: Mutex<Vec<Reseller>>,
}

#[async_trait]
impl ResellerRepository for InMemoryResellerRepository {
    async fn insert(&self, reseller: &NewReseller) -> RepositoryResult<Reseller> {
        let mut resellers = self.resellers.lock().unwrap();
        if resellers.iter().any(|r| r.cpf == reseller.cpf) {
            return Err(RepositoryError::Conflict("duplicate cpf".to_string()));
        }
        let stored = Reseller::from(reseller.clone());
        resellers.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Reseller>> {
        let resellers = self.resellers.lock().unwrap();
        Ok(resellers.iter().find(|r| r.cpf == cpf).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryPurchaseRepository {
    purchases: Mutex<Vec<Purchase>>,
}

#[async_trait]
impl PurchaseRepository for InMemoryPurchaseRepository {
    async fn insert(&self, purchase: &NewPurchase) -> RepositoryResult<Purchase> {
        let mut purchases = self.purchases.lock().unwrap();
        let stored = Purchase {
            id: purchases.len() as i64 + 1,
            cpf: purchase.cpf.clone(),
            code: purchase.code.clone(),
            amount: purchase.amount.clone(),
            date: purchase.date.clone(),
            status: purchase.status,
        };
        purchases.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Vec<Purchase>> {
        let purchases = self.purchases.lock().unwrap();
        Ok(purchases.iter().filter(|p| p.cpf == cpf).cloned().collect())
    }
}

/// Every call fails as if the database were gone.
pub struct UnavailableRepository;

#[async_trait]
impl ResellerRepository for UnavailableRepository {
    async fn insert(&self, _reseller: &NewReseller) -> RepositoryResult<Reseller> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_cpf(&self, _cpf: &str) -> RepositoryResult<Option<Reseller>> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }
}

#[async_trait]
impl PurchaseRepository for UnavailableRepository {
    async fn insert(&self, _purchase: &NewPurchase) -> RepositoryResult<Purchase> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }

    async fn find_by_cpf(&self, _cpf: &str) -> RepositoryResult<Vec<Purchase>> {
        Err(RepositoryError::Database(sqlx::Error::PoolClosed))
    }
}
