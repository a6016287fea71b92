//! Raw search events and their ingestion inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded search event. Immutable once written, except for
/// `clicked_result_id`, which a later click event may fill in.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    /// Unique, monotonic identifier assigned by the store.
    pub id: i64,
    /// Scope identifier for multi-store isolation.
    pub tenant_id: i64,
    /// Authenticated actor, `None` for anonymous traffic.
    pub actor_id: Option<i64>,
    /// Normalized search text. The empty string is a valid value.
    pub query: String,
    /// Number of results the search returned. Zero means "no results found".
    pub result_count: i64,
    /// Result the actor clicked after this search, attached by a later
    /// click event on a best-effort basis.
    pub clicked_result_id: Option<i64>,
    /// Request source address, if captured.
    pub source_ip: Option<String>,
    /// Raw user-agent string, if captured.
    pub user_agent: Option<String>,
    /// HTTP referrer, if captured.
    pub referrer: Option<String>,
    /// Creation timestamp, set once and never mutated.
    pub created_at: DateTime<Utc>,
}

fn default_tenant_id() -> i64 {
    1
}

/// Ingestion payload delivered by the search-serving collaborator.
///
/// Every field is defaulted so that a partially-formed payload still
/// deserializes: the ingestion path must never reject a search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEventInput {
    #[serde(default = "default_tenant_id")]
    pub tenant_id: i64,
    #[serde(default)]
    pub actor_id: Option<i64>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub result_count: i64,
    #[serde(default)]
    pub source_ip: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
}

impl Default for SearchEventInput {
    fn default() -> Self {
        Self {
            tenant_id: default_tenant_id(),
            actor_id: None,
            query: String::new(),
            result_count: 0,
            source_ip: None,
            user_agent: None,
            referrer: None,
        }
    }
}

/// Click-through payload. The link to the originating search is heuristic:
/// the actor's most recent un-clicked event within a short session window.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickInput {
    #[serde(default = "default_tenant_id")]
    pub tenant_id: i64,
    #[serde(default)]
    pub actor_id: Option<i64>,
    #[serde(default)]
    pub source_ip: Option<String>,
    #[serde(default)]
    pub clicked_result_id: i64,
}

/// Normalizes a raw search expression for storage and rollup keying.
#[must_use]
pub fn normalize_term(raw: &str) -> String {
    raw.trim().to_owned()
}
