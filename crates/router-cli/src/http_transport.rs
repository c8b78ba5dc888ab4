//! Optional small HTTP front-end: `POST /route {query}` returning the
//! wire-shape JSON. Bearer-token auth, when `ROUTER_HTTP_TOKEN` is set, is
//! compared in constant time to avoid leaking the token length/prefix
//! through response timing.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router as AxumRouter};
use router_core::Router;
use serde::Deserialize;
use subtle::ConstantTimeEq;
use tower_http::cors::CorsLayer;

use crate::commands::route_to_result;
use crate::env::http_auth_token;

#[derive(Clone)]
struct AppState {
    router: Arc<Router>,
    auth_token: Option<Arc<str>>,
}

#[derive(Debug, Deserialize)]
struct RouteRequest {
    query: String,
}

async fn route_handler(
    State(state): State<AppState>,
    Json(request): Json<RouteRequest>,
) -> impl IntoResponse {
    let result = route_to_result(&state.router, &request.query).await;
    Json(result)
}

fn tokens_match(expected: &str, provided: &str) -> bool {
    expected.len() == provided.len() && bool::from(expected.as_bytes().ct_eq(provided.as_bytes()))
}

async fn auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: axum::extract::Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let Some(expected) = &state.auth_token else {
        return Ok(next.run(request).await);
    };

    let provided = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match provided {
        Some(token) if tokens_match(expected, token) => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Build the axum app: `POST /route`, optional bearer auth, permissive CORS
/// (tighten `cors_origins` for a real deployment).
pub fn build_app(router: Router) -> AxumRouter {
    let state = AppState {
        router: Arc::new(router),
        auth_token: http_auth_token().map(Arc::from),
    };

    AxumRouter::new()
        .route("/route", post(route_handler))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(bind: &str, router: Router) -> anyhow::Result<()> {
    let app = build_app(router);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(%bind, "router HTTP transport listening");
    axum::serve(listener, app).await?;
    Ok(())
}
