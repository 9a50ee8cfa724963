use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::credit::CreditApiError;
use crate::domain::CashbackError;
use crate::ports::RepositoryError;
use crate::services::password::PasswordError;
use crate::services::token::TokenError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{}", .0.message)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cashback(#[from] CashbackError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    CreditApi(#[from] CreditApiError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Unavailable(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            AppError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Cashback(err) => match err {
                CashbackError::MissingIdentifier
                | CashbackError::MissingValue
                | CashbackError::InvalidValue(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CashbackError::ResellerNotFound(_) | CashbackError::NoPurchasesFound(_) => {
                    StatusCode::NOT_FOUND
                }
                CashbackError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Token(TokenError::Encoding(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Token(_) => StatusCode::UNAUTHORIZED,
            AppError::CreditApi(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
