//! SQLite implementation of PurchaseRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{NewPurchase, Purchase, PurchaseStatus};
use crate::ports::{PurchaseRepository, RepositoryError, RepositoryResult};

#[derive(Clone)]
pub struct SqlitePurchaseRepository {
    pool: SqlitePool,
}

impl SqlitePurchaseRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PurchaseRepository for SqlitePurchaseRepository {
    async fn insert(&self, purchase: &NewPurchase) -> RepositoryResult<Purchase> {
        let row = sqlx::query_as::<_, PurchaseRow>(
            r#"
            INSERT INTO purchases (cpf, code, amount, date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, cpf, code, amount, date, status
            "#,
        )
        .bind(&purchase.cpf)
        .bind(&purchase.code)
        .bind(&purchase.amount)
        .bind(&purchase.date)
        .bind(purchase.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.into_domain()
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Vec<Purchase>> {
        let rows = sqlx::query_as::<_, PurchaseRow>(
            "SELECT id, cpf, code, amount, date, status FROM purchases WHERE cpf = $1 ORDER BY id",
        )
        .bind(cpf)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PurchaseRow::into_domain).collect()
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    id: i64,
    cpf: String,
    code: String,
    amount: String,
    date: String,
    status: String,
}

impl PurchaseRow {
    fn into_domain(self) -> RepositoryResult<Purchase> {
        let status = self
            .status
            .parse::<PurchaseStatus>()
            .map_err(RepositoryError::Corrupt)?;

        Ok(Purchase {
            id: self.id,
            cpf: self.cpf,
            code: self.code,
            amount: self.amount,
            date: self.date,
            status,
        })
    }
}
