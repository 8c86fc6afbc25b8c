//! CodeCraft - a local HTML/CSS/JS playground.
//!
//! This is the main entry point for the playground web server.
//! The application is organized into the following modules:
//!
//! - `editor`: Working source bundle and display preferences
//! - `compositor`: Preview document assembly
//! - `store`: Named snapshots in sled
//! - `workspace`: The editing session
//! - `templates`: HTML/CSS/JS for the page
//! - `handlers`: HTTP route handlers

use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use codecraft::{handlers, AppState, Config};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("codecraft=info")),
        )
        .init();

    let config = Config::from_env();
    let state = Arc::new(AppState::open(&config)?);

    let app = Router::new()
        // Page
        .route("/", get(handlers::index))
        .route("/api/state", get(handlers::state))
        // Editing
        .route("/api/field/{field}", put(handlers::update_field))
        .route("/api/active/{field}", post(handlers::set_active_field))
        .route("/api/reset", post(handlers::reset_all))
        .route("/api/reset/{field}", post(handlers::reset_field))
        // Preview
        .route("/api/run", post(handlers::run))
        .route("/api/display", post(handlers::set_display_mode))
        .route("/api/zoom/{direction}", post(handlers::zoom))
        .route("/api/preview-font", post(handlers::set_preview_font_size))
        // Snapshots
        .route(
            "/api/snapshots",
            get(handlers::list_snapshots).post(handlers::save_snapshot),
        )
        .route("/api/snapshots/{name}", axum::routing::delete(handlers::delete_snapshot))
        .route("/api/snapshots/{name}/load", post(handlers::load_snapshot))
        // Clipboard and export
        .route("/api/copy", post(handlers::copy))
        .route("/api/copy/ack", post(handlers::copy_ack))
        .route("/code.json", get(handlers::export))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.addr.as_str()).await?;

    info!(addr = %config.addr, db = %config.db_path, "CodeCraft running");
    println!("CodeCraft running at http://{}", config.addr);

    axum::serve(listener, app).await?;
    Ok(())
}
