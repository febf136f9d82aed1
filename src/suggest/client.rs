// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use async_trait::async_trait;

use super::{
    parse_suggestions, SuggestError, SuggestionRequest, SuggestionSource, REQUEST_TIMEOUT,
};

/// Client for a `POST {keyword}` suggestion endpoint such as the one `promptdict --serve` runs.
#[derive(Debug, Clone)]
pub struct HttpSuggestionClient {
    http: reqwest::Client,
    url: String,
}

impl HttpSuggestionClient {
    pub fn new(url: impl Into<String>) -> Result<Self, SuggestError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, url: url.into() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SuggestionSource for HttpSuggestionClient {
    async fn suggest(&self, keyword: &str) -> Result<Vec<String>, SuggestError> {
        log::debug!("requesting suggestions for {keyword:?} from {}", self.url);

        let response = self
            .http
            .post(&self.url)
            .json(&SuggestionRequest { keyword: keyword.to_owned() })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SuggestError::Status { status: status.as_u16(), body });
        }
        parse_suggestions(&body)
    }
}
