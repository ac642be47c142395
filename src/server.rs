use std::net::SocketAddr;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::config;
use crate::context::SharedContext;
use crate::lookup;
use crate::protocol::{CookFound, Health, NotFound, ResolveReport, Suggestions};

#[derive(Debug, Deserialize)]
pub struct CookParams {
    pub food: Option<String>,
    pub mode: Option<String>,
    pub pan: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: Option<String>,
    /// Parsed in the handler so a bad value gets a JSON error body.
    pub limit: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub food: Option<String>,
}

pub fn router(ctx: SharedContext) -> Router {
    Router::new()
        .route("/foods", get(handle_foods))
        .route("/health", get(handle_health))
        .route("/cook", get(handle_cook))
        .route("/suggest", get(handle_suggest))
        .route("/resolve", get(handle_resolve))
        .with_state(ctx)
}

pub async fn serve(ctx: SharedContext, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("Serving {} foods on http://{}", ctx.dataset.len(), addr);

    axum::serve(listener, router(ctx))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {:?}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown requested");
}

async fn handle_foods(State(ctx): State<SharedContext>) -> Json<Vec<String>> {
    Json(ctx.dataset.names_sorted())
}

async fn handle_health(State(ctx): State<SharedContext>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: config::HOST_VERSION,
        foods: ctx.dataset.len(),
        dataset_sha256: ctx.dataset.fingerprint().to_string(),
        mode_policy: ctx.mode_policy.as_str(),
        started_at: ctx.started_at.to_rfc3339(),
    })
}

async fn handle_cook(State(ctx): State<SharedContext>, Query(params): Query<CookParams>) -> Response {
    let Some(food) = params.food.as_deref().filter(|f| !f.trim().is_empty()) else {
        return bad_request("food parameter is required");
    };
    if over_query_cap(food) {
        return bad_request("food parameter is too long");
    }

    match lookup::cook(&ctx, food, params.mode.as_deref(), params.pan.as_deref()) {
        Ok(result) => {
            log::info!(
                "cook {:?} -> {:?} via {} (mode {:?}, pan {:?})",
                food,
                result.food,
                result.matched_by.as_str(),
                result.mode,
                result.pan
            );
            Json(CookFound::from(result)).into_response()
        }
        Err(err) => {
            log::info!("cook {:?}: {}", food, err);
            Json(NotFound::from(err)).into_response()
        }
    }
}

async fn handle_suggest(State(ctx): State<SharedContext>, Query(params): Query<SuggestParams>) -> Response {
    let query = params.q.unwrap_or_default();
    if over_query_cap(&query) {
        return bad_request("q parameter is too long");
    }
    let limit = match params.limit.as_deref().map(str::trim).filter(|l| !l.is_empty()) {
        None => config::matching::DEFAULT_SUGGEST_LIMIT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n.min(config::matching::MAX_SUGGEST_LIMIT),
            Err(_) => return bad_request(format!("limit must be a non-negative integer, got {raw:?}")),
        },
    };
    let suggestions = ctx.matcher.suggest(&query, limit);
    Json(Suggestions { query, suggestions }).into_response()
}

async fn handle_resolve(State(ctx): State<SharedContext>, Query(params): Query<ResolveParams>) -> Response {
    let query = params.food.unwrap_or_default();
    if over_query_cap(&query) {
        return bad_request("food parameter is too long");
    }
    Json(ResolveReport::build(&ctx, &query, false)).into_response()
}

fn over_query_cap(value: &str) -> bool {
    value.chars().count() > config::matching::MAX_QUERY_CHARS
}

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(NotFound::message(message))).into_response()
}
