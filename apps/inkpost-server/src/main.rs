//! # Inkpost Server
//!
//! The entry point for the Actix-web HTTP server and the provisioning command.

use std::io::Write;

use actix_web::HttpServer;
use clap::{Parser, Subcommand};

mod app;
mod config;
mod handlers;
mod middleware;
mod pages;
mod state;
mod telemetry;


use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[derive(Debug, Parser)]
#[command(name = "inkpost-server", version, about = "A small multi-user blog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Drop and recreate the database schema
    InitDb {
        /// Recreate even if the database already holds users
        #[arg(long)]
        force: bool,
    },
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let cli = Cli::parse();
    let config = AppConfig::from_env();
    config.database.ensure_parent_dir()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::InitDb { force } => init_db(&config, force, &mut std::io::stdout()).await,
        Command::Serve => serve(config).await,
    }
}

async fn init_db(config: &AppConfig, force: bool, out: &mut impl Write) -> std::io::Result<()> {
    inkpost_infra::database::init_schema(&config.database, force)
        .await
        .map_err(std::io::Error::other)?;

    writeln!(out, "Initialized the database.")
}

async fn serve(config: AppConfig) -> std::io::Result<()> {
    tracing::info!(
        "Starting Inkpost server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config);

    HttpServer::new(move || app::build_app(state.clone()))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
