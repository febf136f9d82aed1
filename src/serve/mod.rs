// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Suggestion proxy server.
//!
//! `POST /suggestions` with `{keyword}` answers `{suggestions: [..]}` from a
//! [`SuggestionSource`]; errors answer `{error}`. CORS is open so browser front-ends can call it.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::suggest::{SuggestError, SuggestionResponse, SuggestionSource};

pub mod gemini;

pub use gemini::GeminiSource;

pub const SUGGESTIONS_PATH: &str = "/suggestions";

#[derive(Clone)]
struct ServeState {
    source: Arc<dyn SuggestionSource>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

pub fn router(source: Arc<dyn SuggestionSource>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(SUGGESTIONS_PATH, post(suggestions_handler).options(preflight_handler))
        .layer(cors)
        .with_state(ServeState { source })
}

/// Binds `addr` and serves until the process exits.
pub async fn run(addr: SocketAddr, source: Arc<dyn SuggestionSource>) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    log::info!("suggestion proxy listening on http://{local}{SUGGESTIONS_PATH}");
    if !source.is_configured() {
        log::warn!("no API key configured; every request will fail");
    }
    axum::serve(listener, router(source)).await
}

async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

async fn suggestions_handler(State(state): State<ServeState>, body: Bytes) -> Response {
    if !state.source.is_configured() {
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "API Key not configured");
    }

    let keyword = match parse_keyword(&body) {
        Ok(keyword) => keyword,
        Err(message) => return error_response(StatusCode::BAD_REQUEST, message),
    };
    log::info!("suggestions requested for {keyword:?}");

    match state.source.suggest(&keyword).await {
        Ok(suggestions) => (StatusCode::OK, Json(SuggestionResponse { suggestions })).into_response(),
        Err(SuggestError::MissingApiKey) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "API Key not configured")
        }
        Err(err) => {
            log::error!("suggestion upstream failed: {err}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    }
}

/// An empty body reads as `{}`.
fn parse_keyword(body: &[u8]) -> Result<String, &'static str> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice::<serde_json::Value>(body).map_err(|_| "Invalid request body")?
    };
    match value.get("keyword").and_then(serde_json::Value::as_str).map(str::trim) {
        Some(keyword) if !keyword.is_empty() => Ok(keyword.to_owned()),
        _ => Err("Keyword is required"),
    }
}

#[cfg(test)]
mod tests;
