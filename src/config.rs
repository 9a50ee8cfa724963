use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

pub const DEFAULT_AUTO_APPROVED_CPFS: &str = "15350946056";

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub bcrypt_cost: u32,
    pub auto_approved_cpfs: Vec<String>,
    pub cashback_api_url: Option<String>,
    pub cashback_api_token: Option<String>,
    pub log_format: LogFormat,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let cashback_api_url = env::var("CASHBACK_API_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        if let Some(raw) = &cashback_api_url {
            url::Url::parse(raw).context("CASHBACK_API_URL is not a valid URL")?;
        }

        let bcrypt_cost = env::var("BCRYPT_COST")
            .unwrap_or_else(|_| bcrypt::DEFAULT_COST.to_string())
            .parse()
            .context("BCRYPT_COST must be an integer")?;
        if !(4..=31).contains(&bcrypt_cost) {
            anyhow::bail!("BCRYPT_COST must be between 4 and 31");
        }

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "9090".to_string())
                .parse()
                .context("SERVER_PORT must be a port number")?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data.db?mode=rwc".to_string()),
            database_max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be an integer")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_ttl_hours: env::var("JWT_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("JWT_TTL_HOURS must be an integer")?,
            bcrypt_cost,
            auto_approved_cpfs: parse_cpf_list(
                &env::var("AUTO_APPROVED_CPFS")
                    .unwrap_or_else(|_| DEFAULT_AUTO_APPROVED_CPFS.to_string()),
            ),
            cashback_api_url,
            cashback_api_token: env::var("CASHBACK_API_TOKEN").ok(),
            log_format: parse_log_format(&env::var("LOG_FORMAT").unwrap_or_default()),
        })
    }
}

fn parse_cpf_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_log_format(raw: &str) -> LogFormat {
    if raw.trim().eq_ignore_ascii_case("json") {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    }
}
