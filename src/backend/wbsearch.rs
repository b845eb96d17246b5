//! `wbsearchentities` HTTP client
//!
//! Issues entity searches against a Wikibase API endpoint. Each call races
//! the HTTP request against its cancellation token; dropping the request
//! future on cancel aborts the connection where the transport allows it.

use std::time::Duration;

use reqwest::Client;
use tokio_util::sync::CancellationToken;

use super::{LookupBackend, SearchResponse};
use crate::config::Config;
use crate::error::SuggestError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Wikibase entity search client
#[derive(Debug, Clone)]
pub struct WbSearchClient {
    http: Client,
    api_url: String,
    entity_type: String,
    request_limit: u32,
}

impl WbSearchClient {
    /// Create a client for the given API endpoint with default transport settings
    pub fn new(
        api_url: impl Into<String>,
        entity_type: impl Into<String>,
        request_limit: u32,
    ) -> Result<Self, SuggestError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.into(),
            entity_type: entity_type.into(),
            request_limit,
        })
    }

    /// Create a client from the `[backend]` and `[lookup]` config sections
    pub fn from_config(config: &Config) -> Result<Self, SuggestError> {
        let backend = &config.backend;

        let user_agent = backend
            .user_agent
            .as_deref()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(USER_AGENT);

        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = backend.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            http: builder.build()?,
            api_url: backend.api_url().to_string(),
            entity_type: backend.entity_type.clone(),
            request_limit: config.lookup.request_limit,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn query_params(&self, term: &str, language: &str) -> Vec<(&'static str, String)> {
        vec![
            ("action", "wbsearchentities".to_string()),
            ("search", term.to_string()),
            ("format", "json".to_string()),
            ("language", language.to_string()),
            ("uselang", language.to_string()),
            ("type", self.entity_type.clone()),
            ("limit", self.request_limit.to_string()),
        ]
    }

    async fn fetch(&self, term: &str, language: &str) -> Result<SearchResponse, SuggestError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&self.query_params(term, language))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Transport(format!(
                "{} returned HTTP {}",
                self.api_url, status
            )));
        }

        let body = response.text().await?;
        parse_search_body(&body)
    }
}

impl LookupBackend for WbSearchClient {
    async fn lookup(
        &self,
        term: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse, SuggestError> {
        if cancel.is_cancelled() {
            return Err(SuggestError::Cancelled);
        }

        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                log::debug!("Aborted search request for {:?}", term);
                Err(SuggestError::Cancelled)
            }
            result = self.fetch(term, language) => result,
        }
    }
}

/// Decode a response body, surfacing MediaWiki `error` objects as API errors
pub fn parse_search_body(body: &str) -> Result<SearchResponse, SuggestError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| SuggestError::Parse(e.to_string()))?;

    if let Some(error) = value.get("error") {
        let field = |name: &str| {
            error
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string()
        };
        return Err(SuggestError::Api {
            code: field("code"),
            info: field("info"),
        });
    }

    serde_json::from_value(value).map_err(|e| SuggestError::Parse(e.to_string()))
}

#[cfg(test)]
#[path = "wbsearch_tests.rs"]
mod wbsearch_tests;
