//! Elasticsearch search backend
//!
//! Sends query descriptors to `POST {url}/{index}/_search` and returns the
//! `_source` of every hit in relevance order. Failures are classified, never
//! retried: transport errors and 5xx answers mean the store is unavailable,
//! 4xx answers mean it rejected the query.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info};

use super::descriptor::VECTOR_FIELD;
use super::{Document, QueryDescriptor, SearchBackend};
use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;

pub struct ElasticsearchClient {
    client: reqwest::Client,
    base_url: String,
    index: String,
    credentials: Option<(String, Option<String>)>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: Document,
}

#[derive(Debug, Deserialize)]
struct IndexMapping {
    mappings: Mappings,
}

#[derive(Debug, Deserialize)]
struct Mappings {
    #[serde(default)]
    properties: HashMap<String, FieldMapping>,
}

#[derive(Debug, Deserialize)]
struct FieldMapping {
    dims: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ErrorEnvelope {
    error: Value,
}

impl ElasticsearchClient {
    pub fn new(
        base_url: &str,
        index: &str,
        user: Option<&str>,
        password: Option<&str>,
        timeout: Duration,
    ) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
            credentials: user.map(|u| (u.to_string(), password.map(String::from))),
        })
    }

    fn index_url(&self, suffix: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.index, suffix)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some((user, password)) => request.basic_auth(user, password.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> GatewayResult<reqwest::Response> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| GatewayError::BackendUnavailable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let reason = Self::error_reason(&body).unwrap_or_else(|| status.to_string());
        if status.is_client_error() {
            Err(GatewayError::BackendQuery(reason))
        } else {
            Err(GatewayError::BackendUnavailable(reason))
        }
    }

    async fn run(&self, body: &impl Serialize) -> GatewayResult<Vec<Document>> {
        let request = self.client.post(self.index_url("_search")).json(body);
        let response: SearchResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| {
                GatewayError::BackendQuery(format!("Failed to parse search response: {}", e))
            })?;

        Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
    }

    /// Pull a readable reason out of an Elasticsearch error payload
    fn error_reason(body: &str) -> Option<String> {
        let envelope: ErrorEnvelope = serde_json::from_str(body).ok()?;
        match envelope.error {
            Value::String(s) => Some(s),
            Value::Object(map) => map
                .get("reason")
                .or_else(|| map.get("type"))
                .and_then(Value::as_str)
                .map(String::from),
            _ => None,
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticsearchClient {
    fn index(&self) -> &str {
        &self.index
    }

    async fn execute(&self, descriptor: &QueryDescriptor) -> GatewayResult<Vec<Document>> {
        debug!(index = %self.index, kind = descriptor.kind(), "executing search");
        let documents = self.run(&descriptor.to_body()).await?;
        debug!(index = %self.index, hits = documents.len(), "search completed");
        Ok(documents)
    }

    async fn fetch_all(&self, limit: usize) -> GatewayResult<Vec<Document>> {
        self.run(&QueryDescriptor::MatchAll.to_body().with_size(limit)).await
    }

    async fn vector_dimension(&self) -> GatewayResult<Option<usize>> {
        let request = self.client.get(self.index_url("_mapping"));
        let mappings: HashMap<String, IndexMapping> = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::BackendQuery(format!("Failed to parse mapping: {}", e)))?;

        // Keyed by concrete index name, which differs from ours behind an alias.
        let dims = mappings
            .values()
            .find_map(|m| m.mappings.properties.get(VECTOR_FIELD).and_then(|f| f.dims));

        info!(index = %self.index, dims = ?dims, "Read vector field mapping");
        Ok(dims)
    }
}
