// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;
use serde_json::json;

use crate::suggest::{parse_suggestions, SuggestError, SuggestionSource, REQUEST_TIMEOUT};

pub const GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_DANGEROUS_CONTENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_HARASSMENT",
];

/// Upstream source backed by the Gemini `generateContent` REST call.
#[derive(Debug, Clone)]
pub struct GeminiSource {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl GeminiSource {
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, SuggestError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: model.into(),
            endpoint: GEMINI_ENDPOINT.to_owned(),
        })
    }

    /// Points the source at another base URL (`<endpoint>/<model>:generateContent`).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint.trim_end_matches('/'), self.model)
    }
}

pub(crate) fn suggestion_prompt(keyword: &str) -> String {
    format!(
        "你是一個 AI 繪圖提示詞專家。請根據使用者提供的關鍵字，生成 4 個獨特、詳細、充滿視覺創意的 AI 繪圖提示詞。\n\
         你必須只回傳一個 JSON 物件，格式為: {{\"suggestions\": [\"提示詞1\", \"提示詞2\", \"提示詞3\", \"提示詞4\"]}}\n\n\
         使用者關鍵字: \"{keyword}\"\n"
    )
}

fn request_body(keyword: &str) -> serde_json::Value {
    let safety = HARM_CATEGORIES
        .iter()
        .map(|category| json!({ "category": category, "threshold": "BLOCK_MEDIUM_AND_ABOVE" }))
        .collect::<Vec<_>>();
    json!({
        "contents": [{ "role": "user", "parts": [{ "text": suggestion_prompt(keyword) }] }],
        "generationConfig": { "responseMimeType": "application/json" },
        "safetySettings": safety,
    })
}

/// Pulls the model's text out of a `generateContent` response.
fn candidate_text(response: &serde_json::Value) -> Option<&str> {
    response["candidates"][0]["content"]["parts"][0]["text"].as_str()
}

#[async_trait]
impl SuggestionSource for GeminiSource {
    async fn suggest(&self, keyword: &str) -> Result<Vec<String>, SuggestError> {
        let Some(api_key) = &self.api_key else {
            return Err(SuggestError::MissingApiKey);
        };

        let response = self
            .http
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .json(&request_body(keyword))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SuggestError::Upstream(format!("{status}: {body}")));
        }

        let json: serde_json::Value = response.json().await?;
        let text = candidate_text(&json)
            .ok_or_else(|| SuggestError::Malformed("response has no candidate text".to_owned()))?;
        parse_suggestions(text)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{candidate_text, request_body, GeminiSource};
    use crate::suggest::SuggestionSource;

    #[test]
    fn request_asks_for_json_output() {
        let body = request_body("湖泊");
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["safetySettings"].as_array().map(Vec::len), Some(4));
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("使用者關鍵字: \"湖泊\""));
    }

    #[test]
    fn extracts_candidate_text() {
        let response = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"suggestions\":[\"a\"]}" }] } }]
        });
        assert_eq!(candidate_text(&response), Some("{\"suggestions\":[\"a\"]}"));
        assert_eq!(candidate_text(&serde_json::json!({})), None);
    }

    #[test]
    fn blank_key_is_unconfigured() {
        let source = GeminiSource::new(Some("  ".to_owned()), "m").unwrap();
        assert!(!source.is_configured());
        assert_eq!(source.url(), "https://generativelanguage.googleapis.com/v1beta/models/m:generateContent");
    }
}
