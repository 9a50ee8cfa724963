//! Register reseller use case.

use std::sync::Arc;

use crate::domain::{NewReseller, Reseller};
use crate::error::AppError;
use crate::ports::ResellerRepository;
use crate::services::password::PasswordHasher;

/// Validated registration data; the password is still in clear text.
#[derive(Debug, Clone)]
pub struct ResellerRegistration {
    pub cpf: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterReseller {
    resellers: Arc<dyn ResellerRepository>,
    hasher: PasswordHasher,
}

impl RegisterReseller {
    pub fn new(resellers: Arc<dyn ResellerRepository>, hasher: PasswordHasher) -> Self {
        Self { resellers, hasher }
    }

    pub async fn execute(&self, registration: ResellerRegistration) -> Result<Reseller, AppError> {
        tracing::debug!(cpf = %registration.cpf, "Registering reseller");
        let password_hash = self.hasher.hash(&registration.password).await.map_err(|e| {
            tracing::error!("Error hashing password: {}", e);
            e
        })?;

        let reseller = self
            .resellers
            .insert(&NewReseller {
                cpf: registration.cpf,
                name: registration.name,
                email: registration.email,
                password_hash,
            })
            .await
            .map_err(|e| {
                tracing::error!("Error creating reseller: {}", e);
                e
            })?;

        tracing::info!(cpf = %reseller.cpf, "Reseller created");
        Ok(reseller)
    }
}
