use std::{any::Any, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use clap::Parser;
use shared::{error::CommandError, protocol::CommandResponse};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod cli;
mod config;
mod diagnostics;
mod extract;

use api::{monitor_route, schedule_route};
use app_state::{AppState, ResponseMode};
use cli::Cli;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings(&cli.config)?;
    cli.apply(&mut settings);

    let default_level = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let app = build_router(Arc::new(AppState::from_settings(&settings)));

    let listener = tokio::net::TcpListener::bind((settings.host.as_str(), settings.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", settings.host, settings.port))?;
    info!(
        host = %settings.host,
        port = settings.port,
        status_policy = ?settings.status_policy,
        json_actions = settings.json_actions,
        "schedule server listening; press Ctrl+C to stop"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(monitor_route(), get(monitor))
        .route(schedule_route(), post(schedule))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to install Ctrl+C handler; running until killed");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

async fn monitor(method: Method, uri: Uri, headers: HeaderMap) -> &'static str {
    diagnostics::log_request_metadata(&method, &uri, &headers);
    diagnostics::log_query_params(&uri);
    "up"
}

async fn schedule(State(state): State<Arc<AppState>>, request: Request) -> Response {
    diagnostics::log_request_metadata(request.method(), request.uri(), request.headers());
    let kind = state.mode.content_kind(request.headers());

    let outcome = extract::extract_payload(kind, request)
        .await
        .and_then(|payload| api::dispatch(&state.commands, &payload));

    match outcome {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(err) => error_response(&state.mode, &err),
    }
}

fn error_response(mode: &ResponseMode, err: &CommandError) -> Response {
    match err {
        CommandError::Internal { detail } => error!(%detail, "command processing failed"),
        other => info!(code = ?other.code(), message = %other, "command rejected"),
    }
    (mode.status_for(err), Json(CommandResponse::error(err))).into_response()
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    error!(%detail, "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CommandResponse::error(&CommandError::internal(detail))),
    )
        .into_response()
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
