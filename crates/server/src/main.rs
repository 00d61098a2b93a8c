// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod http_error;
mod routes;
mod session;
mod upload;

#[cfg(test)]
mod tests;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use clap::Parser;
use ncr_api::AccessPolicy;
use ncr_notify::{EmailConfig, Notifier, parse_recipients};
use ncr_persistence::SqlitePersistence;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use routes::{
    handle_add_cost_codes, handle_close_report, handle_export, handle_file_report,
    handle_get_document, handle_get_evidence, handle_get_logo, handle_get_report, handle_import,
    handle_import_cost_codes, handle_list_cost_codes, handle_list_evidence, handle_list_reports,
    handle_login, handle_logout, handle_next_number, handle_reopen_report, handle_set_logo,
};

/// Largest request body accepted (photo uploads included).
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// NCR Server - HTTP server for the non-conformance report register
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "NCR_DATABASE")]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, env = "NCR_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "NCR_PORT", default_value_t = 3000)]
    port: u16,

    /// Password granting the Quality access level
    #[arg(long, env = "QUALITY_PASS", default_value = "qualidade123", hide_env_values = true)]
    quality_password: String,

    /// SMTP relay host; email is disabled when empty
    #[arg(long, env = "SMTP_HOST", default_value = "")]
    smtp_host: String,

    /// SMTP port (STARTTLS)
    #[arg(long, env = "SMTP_PORT", default_value_t = 587)]
    smtp_port: u16,

    /// SMTP login
    #[arg(long, env = "SMTP_USER", default_value = "")]
    smtp_user: String,

    /// SMTP password
    #[arg(long, env = "SMTP_PASS", default_value = "", hide_env_values = true)]
    smtp_pass: String,

    /// Sender address
    #[arg(long, env = "EMAIL_FROM", default_value = "")]
    email_from: String,

    /// Comma-separated recipient addresses
    #[arg(long, env = "EMAIL_TO", default_value = "")]
    email_to: String,

    /// Link placed in notification bodies
    #[arg(long, env = "APP_BASE_URL", default_value = "")]
    app_base_url: String,
}

impl Args {
    fn email_config(&self) -> EmailConfig {
        EmailConfig {
            smtp_host: self.smtp_host.clone(),
            smtp_port: self.smtp_port,
            smtp_user: self.smtp_user.clone(),
            smtp_pass: self.smtp_pass.clone(),
            from: self.email_from.clone(),
            to: parse_recipients(&self.email_to),
            app_base_url: self.app_base_url.clone(),
        }
    }
}

/// Application state shared across handlers.
///
/// The store sits behind a mutex, which also serializes writes against the
/// single connection.
#[derive(Clone)]
pub struct AppState {
    /// The report store.
    pub persistence: Arc<Mutex<SqlitePersistence>>,
    /// Delivers filing and closing notifications.
    pub notifier: Notifier,
    /// Verifies the quality password.
    pub policy: Arc<AccessPolicy>,
    /// Link placed in notification bodies.
    pub base_url: Arc<str>,
}

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/session", post(handle_login).delete(handle_logout))
        .route("/reports", get(handle_list_reports).post(handle_file_report))
        .route("/reports/next-number", get(handle_next_number))
        .route("/reports/{id}", get(handle_get_report))
        .route("/reports/{id}/close", post(handle_close_report))
        .route("/reports/{id}/reopen", post(handle_reopen_report))
        .route("/reports/{id}/evidence/{category}", get(handle_list_evidence))
        .route(
            "/reports/{id}/evidence/{category}/{evidence_id}",
            get(handle_get_evidence),
        )
        .route("/reports/{id}/document", get(handle_get_document))
        .route("/export", get(handle_export))
        .route("/import", post(handle_import))
        .route(
            "/cost-codes",
            get(handle_list_cost_codes).post(handle_add_cost_codes),
        )
        .route("/cost-codes/import", post(handle_import_cost_codes))
        .route("/logo", get(handle_get_logo).put(handle_set_logo))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing NCR Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: SqlitePersistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqlitePersistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqlitePersistence::new_in_memory()?
    };

    let policy: AccessPolicy = AccessPolicy::new(&args.quality_password)?;
    let notifier: Notifier = Notifier::from_config(&args.email_config());

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        notifier,
        policy: Arc::new(policy),
        base_url: Arc::from(args.app_base_url.trim()),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let ip: std::net::IpAddr = args.bind.parse()?;
    let addr: std::net::SocketAddr = std::net::SocketAddr::new(ip, args.port);
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
