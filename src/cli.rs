use clap::{Parser, Subcommand};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "cashback-core")]
#[command(about = "Cashback Core - Reseller cashback REST backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Database management commands
    #[command(subcommand)]
    Db(DbCommands),

    /// Configuration validation
    Config,
}

#[derive(Subcommand)]
pub enum DbCommands {
    /// Run database migrations
    Migrate,
}

pub async fn handle_db_migrate(config: &Config) -> anyhow::Result<()> {
    let pool = crate::db::create_pool(config).await?;

    tracing::info!("Running database migrations...");
    crate::db::run_migrations(&pool).await?;

    tracing::info!("Database migrations completed");
    println!("✓ Database migrations completed");

    Ok(())
}

pub async fn handle_config_validate(config: &Config) -> anyhow::Result<()> {
    println!("Configuration:");
    for line in config_report(config) {
        println!("  {}", line);
    }

    let pool = crate::db::create_pool(config).await?;
    sqlx::query("SELECT 1").execute(&pool).await?;
    println!("✓ Database connection OK");

    Ok(())
}

/// Human readable summary of the loaded configuration. Secrets are masked.
pub fn config_report(config: &Config) -> Vec<String> {
    vec![
        format!("server_port: {}", config.server_port),
        format!("database_url: {}", config.database_url),
        format!("database_max_connections: {}", config.database_max_connections),
        "jwt_secret: ****".to_string(),
        format!("jwt_ttl_hours: {}", config.jwt_ttl_hours),
        format!("bcrypt_cost: {}", config.bcrypt_cost),
        format!("auto_approved_cpfs: {}", config.auto_approved_cpfs.join(",")),
        format!(
            "cashback_api_url: {}",
            config.cashback_api_url.as_deref().unwrap_or("(not set)")
        ),
        format!(
            "cashback_api_token: {}",
            if config.cashback_api_token.is_some() { "****" } else { "(not set)" }
        ),
        format!("log_format: {:?}", config.log_format),
    ]
}
