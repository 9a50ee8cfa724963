pub mod credit;
pub mod purchases;
pub mod resellers;
pub mod sessions;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::validation::ValidationError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub db: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_api: Option<String>,
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let connected = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    if !connected {
        tracing::warn!("Health check could not reach the database");
    }

    let health_response = HealthStatus {
        status: if connected { "healthy" } else { "unhealthy" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        db: if connected { "connected" } else { "disconnected" }.to_string(),
        credit_api: state.credit_client.as_ref().map(|client| client.circuit_state()),
    };

    let status_code = if connected {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(health_response))
}

/// Unwraps a JSON body, turning a malformed or mistyped body into a
/// validation failure instead of axum's plain-text rejection.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match body {
        Ok(Json(payload)) => Ok(payload),
        Err(rejection) => {
            tracing::error!("Error decoding request body: {}", rejection.body_text());
            Err(ValidationError::new("body", "Parâmetros inválidos").into())
        }
    }
}
