use failsafe::futures::CircuitBreaker as FuturesCircuitBreaker;
use failsafe::{backoff, failure_policy, Config, Error as FailsafeError, StateMachine};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CreditApiError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Credit API returned status {0}")]
    UnexpectedStatus(u16),
    #[error("Circuit breaker open: {0}")]
    CircuitBreakerOpen(String),
}

/// Response of the credit API: `{"statusCode": 200, "body": {"credit": 1234}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditResponse {
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
    pub body: CreditBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditBody {
    pub credit: serde_json::Number,
}

/// HTTP client for the accumulated cashback API
#[derive(Clone)]
pub struct CreditApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    circuit_breaker: StateMachine<failure_policy::ConsecutiveFailures<backoff::EqualJittered>, ()>,
}

impl CreditApiClient {
    pub fn new(base_url: String, token: Option<String>) -> Self {
        Self::with_circuit_breaker(base_url, token, 3, 60)
    }

    pub fn with_circuit_breaker(
        base_url: String,
        token: Option<String>,
        failure_threshold: u32,
        reset_timeout_secs: u64,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        let backoff = backoff::equal_jittered(
            Duration::from_secs(reset_timeout_secs),
            Duration::from_secs(reset_timeout_secs * 2),
        );
        let policy = failure_policy::consecutive_failures(failure_threshold, backoff);
        let circuit_breaker = Config::new().failure_policy(policy).build();

        CreditApiClient {
            client,
            base_url,
            token,
            circuit_breaker,
        }
    }

    pub fn circuit_state(&self) -> String {
        if self.circuit_breaker.is_call_permitted() {
            "closed".to_string()
        } else {
            "open".to_string()
        }
    }

    /// Accumulated credit for a CPF, as reported upstream.
    pub async fn get_credit(&self, cpf: &str) -> Result<serde_json::Number, CreditApiError> {
        tracing::debug!(cpf = %cpf, "Retrieving cashback credit");
        let mut request = self.client.get(&self.base_url).query(&[("cpf", cpf)]);
        if let Some(token) = &self.token {
            request = request.header("token", token);
        }

        let result = self
            .circuit_breaker
            .call(async move {
                let response = request.send().await?;
                if !response.status().is_success() {
                    return Err(CreditApiError::UnexpectedStatus(response.status().as_u16()));
                }
                let credit = response.json::<CreditResponse>().await?;
                Ok(credit)
            })
            .await;

        match result {
            Ok(response) => {
                tracing::debug!(credit = %response.body.credit, "Cashback credit retrieved");
                Ok(response.body.credit)
            }
            Err(FailsafeError::Rejected) => Err(CreditApiError::CircuitBreakerOpen(
                "credit API circuit breaker is open".to_string(),
            )),
            Err(FailsafeError::Inner(e)) => {
                tracing::error!("Error retrieving cashback credit: {}", e);
                Err(e)
            }
        }
    }
}
