pub mod adapters;
pub mod cli;
pub mod config;
pub mod credit;
pub mod db;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ports;
pub mod services;
pub mod use_cases;
pub mod validation;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;

use crate::adapters::{SqlitePurchaseRepository, SqliteResellerRepository};
use crate::config::Config;
use crate::credit::CreditApiClient;
use crate::domain::TierClassifier;
use crate::ports::{PurchaseRepository, ResellerRepository};
use crate::services::{PasswordHasher, TokenService};
use crate::use_cases::{CashbackBreakdown, Login, RecordPurchase, RegisterReseller};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub cashback_breakdown: Arc<CashbackBreakdown>,
    pub record_purchase: Arc<RecordPurchase>,
    pub register_reseller: Arc<RegisterReseller>,
    pub login: Arc<Login>,
    pub tokens: TokenService,
    pub credit_client: Option<CreditApiClient>,
}

impl AppState {
    /// Wires the SQLite repositories and services into the use cases.
    pub fn new(db: SqlitePool, config: &Config) -> Self {
        let resellers: Arc<dyn ResellerRepository> =
            Arc::new(SqliteResellerRepository::new(db.clone()));
        let purchases: Arc<dyn PurchaseRepository> =
            Arc::new(SqlitePurchaseRepository::new(db.clone()));
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let tokens = TokenService::new(
            &config.jwt_secret,
            chrono::Duration::hours(config.jwt_ttl_hours),
        );

        let credit_client = config.cashback_api_url.clone().map(|url| {
            tracing::info!("Credit API client initialized with URL: {}", url);
            CreditApiClient::new(url, config.cashback_api_token.clone())
        });

        AppState {
            db,
            cashback_breakdown: Arc::new(CashbackBreakdown::new(
                resellers.clone(),
                purchases.clone(),
                TierClassifier::default(),
            )),
            record_purchase: Arc::new(RecordPurchase::new(
                resellers.clone(),
                purchases,
                config.auto_approved_cpfs.clone(),
            )),
            register_reseller: Arc::new(RegisterReseller::new(resellers.clone(), hasher)),
            login: Arc::new(Login::new(resellers, hasher, tokens.clone())),
            tokens,
            credit_client,
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/revendedor", post(handlers::resellers::create_reseller))
        .route("/api/login", post(handlers::sessions::login))
        .route(
            "/api/compras",
            get(handlers::purchases::list_purchases).post(handlers::purchases::create_purchase),
        )
        .route("/api/cashback", get(handlers::credit::get_credit))
        .layer(axum_middleware::from_fn(
            middleware::request_logger::request_logger_middleware,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
