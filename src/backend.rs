//! Entity search backend abstraction
//!
//! Defines the LookupBackend trait the coordinator issues requests through,
//! and the `wbsearchentities` response shape it consumes.

use std::future::Future;

use serde::Deserialize;
use tokio_util::sync::CancellationToken;

use crate::error::SuggestError;

mod wbsearch;

pub use wbsearch::WbSearchClient;

/// A remote entity search that can be cancelled per call
///
/// Implementations should stop work and return `SuggestError::Cancelled` once
/// `cancel` fires. The coordinator also drops the returned future when the
/// token fires, so a backend that never checks the token is still safe.
pub trait LookupBackend: Send + Sync {
    fn lookup(
        &self,
        term: &str,
        language: &str,
        cancel: &CancellationToken,
    ) -> impl Future<Output = Result<SearchResponse, SuggestError>> + Send;
}

/// Body of a `wbsearchentities` response
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub search: Vec<SearchResult>,
}

/// One ranked entity match
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    /// The term that matched (label, alias, ...)
    #[serde(rename = "match")]
    pub matched: MatchInfo,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MatchInfo {
    pub text: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl SearchResponse {
    /// Matched display texts, in backend rank order
    pub fn match_texts(&self) -> impl Iterator<Item = &str> {
        self.search.iter().map(|result| result.matched.text.as_str())
    }
}

impl SearchResult {
    /// A result with only its matched text set
    pub fn from_text(text: impl Into<String>) -> Self {
        SearchResult {
            id: None,
            label: None,
            matched: MatchInfo {
                text: text.into(),
                kind: None,
                language: None,
            },
        }
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod backend_tests;
