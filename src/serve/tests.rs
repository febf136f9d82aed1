// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::routing::post;
use axum::{Json, Router};

use super::{parse_keyword, router, GeminiSource, SUGGESTIONS_PATH};
use crate::suggest::testing::FakeSource;
use crate::suggest::{HttpSuggestionClient, SuggestError, SuggestionSource};

async fn spawn(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    addr
}

fn url(addr: SocketAddr) -> String {
    format!("http://{addr}{SUGGESTIONS_PATH}")
}

#[test]
fn keyword_parsing() {
    assert_eq!(parse_keyword(r#"{"keyword":" 湖泊 "}"#.as_bytes()), Ok("湖泊".to_owned()));
    assert_eq!(parse_keyword(b""), Err("Keyword is required"));
    assert_eq!(parse_keyword(br#"{"keyword":"  "}"#), Err("Keyword is required"));
    assert_eq!(parse_keyword(br#"{"keyword":3}"#), Err("Keyword is required"));
    assert_eq!(parse_keyword(b"{oops"), Err("Invalid request body"));
}

#[tokio::test]
async fn client_round_trips_through_the_proxy() {
    let source = Arc::new(FakeSource::default());
    let addr = spawn(router(source.clone())).await;

    let client = HttpSuggestionClient::new(url(addr)).unwrap();
    let suggestions = client.suggest("森林").await.unwrap();

    assert_eq!(suggestions, ["森林 1", "森林 2"]);
    assert_eq!(source.calls(), ["森林"]);
}

#[tokio::test]
async fn bad_requests_are_rejected() {
    let addr = spawn(router(Arc::new(FakeSource::default()))).await;
    let http = reqwest::Client::new();

    let response = http.post(url(addr)).body("{oops").send().await.unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid request body");

    let response = http.post(url(addr)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let client = HttpSuggestionClient::new(url(addr)).unwrap();
    let err = client.suggest("   ").await.unwrap_err();
    assert!(matches!(err, SuggestError::Status { status: 400, .. }));
}

#[tokio::test]
async fn upstream_failure_is_a_500() {
    let source = FakeSource { failing: vec!["boom".to_owned()], ..FakeSource::default() };
    let addr = spawn(router(Arc::new(source))).await;

    let response = reqwest::Client::new()
        .post(url(addr))
        .json(&serde_json::json!({ "keyword": "boom" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn options_carry_cors_headers() {
    let addr = spawn(router(Arc::new(FakeSource::default()))).await;
    let http = reqwest::Client::new();

    let response = http
        .request(reqwest::Method::OPTIONS, url(addr))
        .header("Origin", "http://example.test")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers().get("access-control-allow-origin").and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let response = http.request(reqwest::Method::OPTIONS, url(addr)).send().await.unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn missing_api_key_is_a_500() {
    let source = GeminiSource::new(None, "m").unwrap();
    let addr = spawn(router(Arc::new(source))).await;

    let response = reqwest::Client::new()
        .post(url(addr))
        .json(&serde_json::json!({ "keyword": "lake" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "API Key not configured");
}

async fn fake_generate(
    Path(call): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Json<serde_json::Value> {
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();
    let answer = serde_json::json!({
        "suggestions": [format!("{call} ok"), format!("prompt {}", !prompt.is_empty())]
    });
    Json(serde_json::json!({
        "candidates": [{ "content": { "parts": [{ "text": answer.to_string() }] } }]
    }))
}

#[tokio::test]
async fn gemini_source_reads_candidate_json() {
    let upstream = spawn(Router::new().route("/v1/{call}", post(fake_generate))).await;
    let source = GeminiSource::new(Some("key".to_owned()), "m")
        .unwrap()
        .with_endpoint(format!("http://{upstream}/v1"));

    let suggestions = source.suggest("湖泊").await.unwrap();
    assert_eq!(suggestions, ["m:generateContent ok", "prompt true"]);
    assert!(source.is_configured());
}
