use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::json_body;
use crate::domain::{PurchaseStatus, PurchaseView};
use crate::error::AppError;
use crate::middleware::AuthenticatedReseller;
use crate::validation::payloads::PurchasePayload;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CpfQuery {
    pub cpf: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PurchaseCreated {
    pub success: bool,
    pub message: String,
    pub codigo: String,
    pub cpf: String,
    pub valor: String,
    pub data: String,
    pub status: PurchaseStatus,
}

#[derive(Debug, Serialize)]
pub struct PurchaseList {
    pub success: bool,
    pub message: String,
    pub compras: Vec<PurchaseView>,
}

/// `POST /api/compras`
pub async fn create_purchase(
    State(state): State<AppState>,
    AuthenticatedReseller(claims): AuthenticatedReseller,
    body: Result<Json<PurchasePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<PurchaseCreated>), AppError> {
    let request = json_body(body)?.validate()?;
    tracing::debug!(caller = %claims.user.cpf, cpf = %request.cpf, "Creating purchase");

    let purchase = state.record_purchase.execute(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(PurchaseCreated {
            success: true,
            message: "Compra cadastrada com sucesso".to_string(),
            codigo: purchase.code,
            cpf: purchase.cpf,
            valor: purchase.amount,
            data: purchase.date,
            status: purchase.status,
        }),
    ))
}

/// `GET /api/compras?cpf=`
pub async fn list_purchases(
    State(state): State<AppState>,
    AuthenticatedReseller(claims): AuthenticatedReseller,
    Query(query): Query<CpfQuery>,
) -> Result<Json<PurchaseList>, AppError> {
    tracing::debug!(caller = %claims.user.cpf, "Listing purchases with cashback");
    let compras = state.cashback_breakdown.execute(query.cpf.as_deref()).await?;

    Ok(Json(PurchaseList {
        success: true,
        message: "Compras recuperadas com sucesso".to_string(),
        compras,
    }))
}
