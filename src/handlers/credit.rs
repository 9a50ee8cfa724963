use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;

use super::purchases::CpfQuery;
use crate::domain::CashbackError;
use crate::error::AppError;
use crate::middleware::AuthenticatedReseller;
use crate::validation::payloads::INVALID_CPF;
use crate::validation::{is_valid_cpf, ValidationError};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CreditResponse {
    pub success: bool,
    pub credit: serde_json::Number,
}

/// `GET /api/cashback?cpf=`: accumulated cashback reported by the external
/// credit API.
pub async fn get_credit(
    State(state): State<AppState>,
    AuthenticatedReseller(_claims): AuthenticatedReseller,
    Query(query): Query<CpfQuery>,
) -> Result<Json<CreditResponse>, AppError> {
    let cpf = query
        .cpf
        .as_deref()
        .map(str::trim)
        .filter(|cpf| !cpf.is_empty())
        .ok_or(CashbackError::MissingIdentifier)?;
    if !is_valid_cpf(cpf) {
        return Err(ValidationError::new("cpf", INVALID_CPF).into());
    }

    let client = state.credit_client.as_ref().ok_or_else(|| {
        tracing::error!("Credit API requested but CASHBACK_API_URL is not set");
        AppError::Unavailable("Serviço de cashback acumulado não configurado".to_string())
    })?;

    let credit = client.get_credit(cpf).await?;
    Ok(Json(CreditResponse {
        success: true,
        credit,
    }))
}
