// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Promptdict-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Promptdict and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Prompt suggestions.
//!
//! The wire contract is `{keyword}` → `{suggestions: [..]}`. [`SuggestionSource`] is the seam:
//! the TUI talks to a remote endpoint through [`HttpSuggestionClient`], the proxy server talks
//! to the upstream model through its own source. [`SuggestionDebouncer`] collapses keystrokes
//! and discards stale responses.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod client;
pub mod debounce;

pub use client::HttpSuggestionClient;
pub use debounce::{SuggestionDebouncer, SuggestionState};

/// Quiet interval before a keyword is sent.
pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(300);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionRequest {
    pub keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestions: Vec<String>,
}

#[derive(Debug)]
pub enum SuggestError {
    Http(reqwest::Error),
    Status { status: u16, body: String },
    Malformed(String),
    Upstream(String),
    MissingApiKey,
}

impl fmt::Display for SuggestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(err) => write!(f, "suggestion request failed: {err}"),
            Self::Status { status, body } => {
                write!(f, "suggestion service returned {status}: {body}")
            }
            Self::Malformed(msg) => write!(f, "malformed suggestion response: {msg}"),
            Self::Upstream(msg) => write!(f, "upstream error: {msg}"),
            Self::MissingApiKey => f.write_str("API Key not configured"),
        }
    }
}

impl std::error::Error for SuggestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SuggestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

#[async_trait]
pub trait SuggestionSource: Send + Sync {
    async fn suggest(&self, keyword: &str) -> Result<Vec<String>, SuggestError>;

    /// Whether the source has the credentials it needs.
    fn is_configured(&self) -> bool {
        true
    }
}

/// Parses a `{suggestions: [..]}` body, dropping blank entries.
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, SuggestError> {
    let response: SuggestionResponse =
        serde_json::from_str(body).map_err(|err| SuggestError::Malformed(err.to_string()))?;
    Ok(response
        .suggestions
        .into_iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect())
}
