// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! HTTP API: axum router over the record store and the log file.

pub mod assets;
pub mod bills;
pub mod error;
pub mod logs;
pub mod state;

use std::time::Duration;

use anyhow::{Context, Result};
use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    routing::{get, put},
};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::signal;
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::store::RecordStore;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Open the store, bind, and serve until Ctrl+C or SIGTERM.
pub async fn run_server(config: &Config) -> Result<()> {
    info!("Opening database at {}", config.db_path.display());
    let store = RecordStore::open(&config.db_path)?;
    let state = AppState::new(store, config.log_path.clone());
    let app = create_router(state, config.timeout);

    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Bind {}", addr))?;
    info!("Server is running on http://{}", addr);
    info!("Log file: {}", config.log_path.display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

pub fn create_router(state: AppState, timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(HandleErrorLayer::new(middleware_error))
        .layer(TimeoutLayer::new(timeout))
        .layer(cors);

    let api = Router::new()
        .route("/bills", get(bills::list_bills).post(bills::create_bill))
        .route("/bills/range", get(bills::list_bills_by_range))
        .route(
            "/assets",
            get(assets::list_assets).post(assets::create_asset),
        )
        .route("/assets/{id}", put(assets::update_asset))
        .route("/logs", get(logs::query_logs).post(logs::append_log));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .fallback(not_found)
        .with_state(state)
        .layer(middleware)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::Internal {
            context: "Unhandled internal error",
            message: err.to_string(),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            warn!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn elapsed_request_is_json_408() {
        let resp = middleware_error(Box::new(Elapsed::new()))
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(body_json(resp).await, json!({ "error": "Request timed out" }));
    }

    #[tokio::test]
    async fn other_middleware_errors_are_json_500() {
        let err: BoxError = "overloaded".into();
        let resp = middleware_error(err).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(resp).await,
            json!({ "error": "Unhandled internal error" })
        );
    }
}
