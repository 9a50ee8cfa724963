//! SQLite implementation of ResellerRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::domain::{NewReseller, Reseller};
use crate::ports::{RepositoryError, RepositoryResult, ResellerRepository};

pub const DUPLICATE_CPF_MESSAGE: &str = "Já existe um revendedor cadastrado com este CPF";

#[derive(Clone)]
pub struct SqliteResellerRepository {
    pool: SqlitePool,
}

impl SqliteResellerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResellerRepository for SqliteResellerRepository {
    async fn insert(&self, reseller: &NewReseller) -> RepositoryResult<Reseller> {
        let row = sqlx::query_as::<_, ResellerRow>(
            r#"
            INSERT INTO resellers (cpf, name, email, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING cpf, name, email, password_hash
            "#,
        )
        .bind(&reseller.cpf)
        .bind(&reseller.name)
        .bind(&reseller.email)
        .bind(&reseller.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(DUPLICATE_CPF_MESSAGE.to_string())
            }
            other => RepositoryError::Database(other),
        })?;

        Ok(row.into_domain())
    }

    async fn find_by_cpf(&self, cpf: &str) -> RepositoryResult<Option<Reseller>> {
        let row = sqlx::query_as::<_, ResellerRow>(
            "SELECT cpf, name, email, password_hash FROM resellers WHERE cpf = $1",
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResellerRow::into_domain))
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct ResellerRow {
    cpf: String,
    name: String,
    email: String,
    password_hash: String,
}

impl ResellerRow {
    fn into_domain(self) -> Reseller {
        Reseller {
            cpf: self.cpf,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
