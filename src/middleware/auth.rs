use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::token::{Claims, TokenError};
use crate::AppState;

/// Extractor that verifies the `Authorization` bearer token and exposes
/// the reseller it was issued to.
#[derive(Debug, Clone)]
pub struct AuthenticatedReseller(pub Claims);

impl AuthenticatedReseller {
    fn bearer_token(header: &str) -> &str {
        header.strip_prefix("Bearer ").unwrap_or(header).trim()
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedReseller {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = Self::bearer_token(header);
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let claims = state.tokens.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })?;

        tracing::debug!(cpf = %claims.user.cpf, "Token verified");
        Ok(AuthenticatedReseller(claims))
    }
}

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    ExpiredToken,
    InvalidToken,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "Token de autorização não fornecido",
            AuthError::ExpiredToken => "Token expirado",
            AuthError::InvalidToken => "Token inválido",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::warn!("Bearer authentication failed: {:?}", self);

        let status = StatusCode::UNAUTHORIZED;
        let body = Json(json!({
            "success": false,
            "error": self.message(),
            "status": status.as_u16(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_bearer_prefix() {
        assert_eq!(AuthenticatedReseller::bearer_token("Bearer abc.def"), "abc.def");
        assert_eq!(AuthenticatedReseller::bearer_token("abc.def"), "abc.def");
        assert_eq!(AuthenticatedReseller::bearer_token("Bearer "), "");
    }

    #[test]
    fn rejections_are_unauthorized() {
        for error in [
            AuthError::MissingToken,
            AuthError::ExpiredToken,
            AuthError::InvalidToken,
        ] {
            assert_eq!(error.into_response().status(), StatusCode::UNAUTHORIZED);
        }
    }
}
