use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use super::json_body;
use crate::error::AppError;
use crate::validation::payloads::ResellerPayload;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ResellerCreated {
    pub success: bool,
    pub message: String,
    pub nome: String,
    pub cpf: String,
    pub email: String,
}

/// `POST /api/revendedor`
pub async fn create_reseller(
    State(state): State<AppState>,
    body: Result<Json<ResellerPayload>, JsonRejection>,
) -> Result<Json<ResellerCreated>, AppError> {
    let registration = json_body(body)?.validate()?;
    let reseller = state.register_reseller.execute(registration).await?;

    Ok(Json(ResellerCreated {
        success: true,
        message: "Revendedor cadastrado com sucesso".to_string(),
        nome: reseller.name,
        cpf: reseller.cpf,
        email: reseller.email,
    }))
}
