//! HTTP surface for the admission service.
//!
//! # Responsibility
//! - Map `/`, `/submit` and `/admin` onto admission use-cases.
//! - Map `/ratings/submit` and `/submissions` onto the ratings file.
//! - Own process start-up: logging, storage bootstrap, listener lifecycle.
//!
//! # Invariants
//! - Handlers never touch SQLite or the file system on async workers.
//! - Every admission failure body is `{"error": <message>}`; rejected
//!   ratings get `{"message": <message>}` with status 400.

pub mod cli;
pub mod error;
pub mod form;
pub mod routes;

use admission_core::{init_logging, AdmissionConfig, RatingStore};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

pub use cli::Args;
pub use error::ServerError;

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AdmissionConfig>,
    pub ratings: Arc<RatingStore>,
}

/// Builds the service router with the given request body cap.
pub fn router(
    config: Arc<AdmissionConfig>,
    ratings: Arc<RatingStore>,
    max_body_bytes: usize,
) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/submit", post(routes::submit))
        .route("/admin", get(routes::admin))
        .route("/ratings/submit", post(routes::submit_rating))
        .route("/submissions", get(routes::list_ratings))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { config, ratings })
}

/// Runs the server described by `args` until Ctrl-C.
pub async fn run(args: Args) -> Result<(), ServerError> {
    let log_dir = args.resolved_log_dir().map_err(ServerError::Io)?;
    init_logging(args.log_level(), &log_dir)?;

    let config = Arc::new(args.admission_config()?);
    let ratings = Arc::new(args.rating_store());
    let bootstrap_config = Arc::clone(&config);
    let bootstrap_ratings = Arc::clone(&ratings);
    tokio::task::spawn_blocking(move || -> Result<(), ServerError> {
        bootstrap_config.bootstrap()?;
        bootstrap_ratings.initialize()?;
        Ok(())
    })
    .await
    .map_err(|err| ServerError::Runtime(err.to_string()))??;

    let listener = TcpListener::bind(args.bind)
        .await
        .map_err(ServerError::Io)?;
    info!(
        "event=server_start module=server status=ok bind={} subjects={}",
        args.bind,
        config.fee_table.len()
    );

    axum::serve(listener, router(config, ratings, args.max_upload_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Io)?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(
            "event=server_stop module=server status=error error_code=signal_failed error={}",
            err
        );
    }
}
