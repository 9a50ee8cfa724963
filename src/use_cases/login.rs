//! Login use case: checks a CPF/password pair and issues a bearer token.

use std::sync::Arc;

use crate::error::AppError;
use crate::ports::ResellerRepository;
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "CPF ou senha inválidos";

#[derive(Debug, Clone)]
pub struct Credentials {
    pub cpf: String,
    pub password: String,
}

pub struct Login {
    resellers: Arc<dyn ResellerRepository>,
    hasher: PasswordHasher,
    tokens: TokenService,
}

impl Login {
    pub fn new(
        resellers: Arc<dyn ResellerRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Self {
        Self {
            resellers,
            hasher,
            tokens,
        }
    }

    /// Returns the signed token. Unknown CPF and wrong password are
    /// indistinguishable to the caller.
    pub async fn execute(&self, credentials: Credentials) -> Result<String, AppError> {
        tracing::debug!(cpf = %credentials.cpf, "Logging in");

        let Some(reseller) = self.resellers.find_by_cpf(&credentials.cpf).await? else {
            tracing::debug!(cpf = %credentials.cpf, "Login rejected: unknown CPF");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()));
        };

        if !self
            .hasher
            .verify(&credentials.password, &reseller.password_hash)
            .await?
        {
            tracing::debug!(cpf = %credentials.cpf, "Login rejected: password mismatch");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string()));
        }

        Ok(self.tokens.issue(&reseller)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryResellerRepository;
    use crate::domain::NewReseller;
    use chrono::Duration;

    async fn login_with_reseller() -> (Login, TokenService) {
        let resellers = Arc::new(InMemoryResellerRepository::default());
        resellers
            .insert(&NewReseller {
                cpf: "12345678901".to_string(),
                name: "Lucas Melo".to_string(),
                email: "lucas@example.com".to_string(),
                password_hash: bcrypt::hash("segredo", 4).unwrap(),
            })
            .await
            .unwrap();
        let tokens = TokenService::new("secret", Duration::hours(1));
        (
            Login::new(resellers, PasswordHasher::new(4), tokens.clone()),
            tokens,
        )
    }

    fn credentials(cpf: &str, password: &str) -> Credentials {
        Credentials {
            cpf: cpf.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn valid_credentials_yield_a_token_for_the_reseller() {
        let (login, tokens) = login_with_reseller().await;

        let token = login
            .execute(credentials("12345678901", "segredo"))
            .await
            .unwrap();

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user.cpf, "12345678901");
        assert_eq!(claims.user.email, "lucas@example.com");
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (login, _) = login_with_reseller().await;

        let err = login
            .execute(credentials("12345678901", "errada"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(message) if message == INVALID_CREDENTIALS_MESSAGE));
    }

    #[tokio::test]
    async fn unknown_cpf_is_unauthorized() {
        let (login, _) = login_with_reseller().await;

        let err = login
            .execute(credentials("99999999999", "segredo"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
