use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::json_body;
use crate::error::AppError;
use crate::validation::payloads::LoginPayload;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

/// `POST /api/login`
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginPayload>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let credentials = json_body(body)?.validate()?;
    let token = state.login.execute(credentials).await?;

    Ok(Json(LoginResponse {
        success: true,
        token: format!("Bearer {}", token),
    }))
}
