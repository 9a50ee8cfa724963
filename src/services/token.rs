//! Signed bearer tokens (HS256 JWT) identifying a reseller.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Reseller;

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expirado")]
    Expired,

    #[error("Token inválido")]
    Invalid,

    #[error("Error creating JWT: {0}")]
    Encoding(jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    pub cpf: String,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub user: TokenUser,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, reseller: &Reseller) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            user: TokenUser {
                cpf: reseller.cpf.clone(),
                email: reseller.email.clone(),
                name: reseller.name.clone(),
            },
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        tracing::debug!(cpf = %reseller.cpf, "Creating JWT");
        encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
