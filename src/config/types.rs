// Configuration type definitions

use serde::{Deserialize, Serialize};

/// Wikidata API, used when no search endpoint is configured
pub const DEFAULT_API_URL: &str = "https://www.wikidata.org/w/api.php";

pub const DEFAULT_RESULTS_LIMIT: usize = 7;

/// Backend matches requested per term. Larger than the display limit so that
/// duplicates can be discarded while still filling the list.
pub const DEFAULT_REQUEST_LIMIT: u32 = 50;

/// Which part of a matched candidate is offered as the suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CompletionScope {
    /// Only the word currently being typed
    #[default]
    Word,
    /// The typed phrase with its last word completed
    Phrase,
}

/// Lookup pipeline configuration section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LookupConfig {
    #[serde(default = "default_results_limit")]
    pub results_limit: usize,
    #[serde(default = "default_request_limit")]
    pub request_limit: u32,
    #[serde(default)]
    pub completion: CompletionScope,
}

fn default_results_limit() -> usize {
    DEFAULT_RESULTS_LIMIT
}

fn default_request_limit() -> u32 {
    DEFAULT_REQUEST_LIMIT
}

impl Default for LookupConfig {
    fn default() -> Self {
        LookupConfig {
            results_limit: DEFAULT_RESULTS_LIMIT,
            request_limit: DEFAULT_REQUEST_LIMIT,
            completion: CompletionScope::Word,
        }
    }
}

/// Search backend configuration section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Dedicated external entity search endpoint; takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_search_base_uri: Option<String>,
    /// The Wikibase repository API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_api_url: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_entity_type")]
    pub entity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    /// Transport timeout in seconds; no timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_language() -> String {
    "en".to_string()
}

fn default_entity_type() -> String {
    "item".to_string()
}

impl Default for BackendConfig {
    fn default() -> Self {
        BackendConfig {
            external_search_base_uri: None,
            repo_api_url: None,
            language: default_language(),
            entity_type: default_entity_type(),
            user_agent: None,
            timeout_secs: None,
        }
    }
}

impl BackendConfig {
    /// Resolve the search endpoint: external search URI, then the repo API,
    /// then Wikidata. Blank entries are skipped.
    pub fn api_url(&self) -> &str {
        [&self.external_search_base_uri, &self.repo_api_url]
            .into_iter()
            .filter_map(|uri| uri.as_deref())
            .find(|uri| !uri.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }
}

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub backend: BackendConfig,
}
