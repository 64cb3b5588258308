// Search Schema - Request-scoped query and document types
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::SearchMode;

/// A search request as received: raw text plus a recognized mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    mode: SearchMode,
}

impl Query {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    pub fn keyword(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Keyword)
    }

    pub fn semantic(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Semantic)
    }

    pub fn hybrid(text: impl Into<String>) -> Self {
        Self::new(text, SearchMode::Hybrid)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }
}

/// One `_source` object returned by the store. Field names are whatever the
/// index holds; `summary`, `description` and `embedding_vector` are the
/// well-known ones.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn summary(&self) -> Option<&str> {
        self.0.get("summary").and_then(Value::as_str)
    }

    pub fn description(&self) -> Option<&str> {
        self.0.get("description").and_then(Value::as_str)
    }

    pub fn embedding_vector(&self) -> Option<Vec<f32>> {
        self.0
            .get("embedding_vector")?
            .as_array()?
            .iter()
            .map(|v| v.as_f64().map(|f| f as f32))
            .collect()
    }
}

pub type SearchResult = Vec<Document>;
