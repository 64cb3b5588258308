// Gateway Service Configuration
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::search::KnnSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub app_name: String,
    pub service_port: u16,
    pub host: String,
    pub cors_origins: Vec<String>,

    // Elasticsearch
    pub elasticsearch_url: String,
    pub elasticsearch_user: Option<String>,
    #[serde(skip_serializing)]
    pub elasticsearch_password: Option<String>,
    pub elasticsearch_index: String,

    // Embedding model
    pub embeddings_service_url: String,
    pub embedding_model_name: String,
    pub embedding_dimension: usize,

    // Search
    pub knn_k: usize,
    pub knn_num_candidates: usize,
    pub default_list_size: usize,

    // Timeouts
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            app_name: "P-Engine".to_string(),
            service_port: 8000,
            host: "0.0.0.0".to_string(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            elasticsearch_url: "http://localhost:9200".to_string(),
            elasticsearch_user: Some("elastic".to_string()),
            elasticsearch_password: None,
            elasticsearch_index: "audit_logs".to_string(),
            embeddings_service_url: "http://localhost:3001".to_string(),
            embedding_model_name: "all-MiniLM-L6-v2".to_string(),
            embedding_dimension: 384,
            knn_k: 10,
            knn_num_candidates: 100,
            default_list_size: 100,
            request_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            app_name: std::env::var("APP_NAME").unwrap_or(defaults.app_name),
            service_port: std::env::var("SERVICE_PORT")
                .unwrap_or_else(|_| defaults.service_port.to_string())
                .parse()?,
            host: std::env::var("HOST").unwrap_or(defaults.host),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|v| parse_list(&v))
                .unwrap_or(defaults.cors_origins),

            elasticsearch_url: std::env::var("ELASTICSEARCH_URL")
                .unwrap_or(defaults.elasticsearch_url),
            elasticsearch_user: std::env::var("ELASTICSEARCH_USER")
                .ok()
                .or(defaults.elasticsearch_user),
            elasticsearch_password: std::env::var("ELASTICSEARCH_PASSWORD").ok(),
            elasticsearch_index: std::env::var("ELASTICSEARCH_INDEX")
                .unwrap_or(defaults.elasticsearch_index),

            embeddings_service_url: std::env::var("EMBEDDINGS_SERVICE_URL")
                .unwrap_or(defaults.embeddings_service_url),
            embedding_model_name: std::env::var("EMBEDDING_MODEL_NAME")
                .unwrap_or(defaults.embedding_model_name),
            embedding_dimension: std::env::var("EMBEDDING_DIMENSION")
                .unwrap_or_else(|_| defaults.embedding_dimension.to_string())
                .parse()?,

            knn_k: std::env::var("KNN_K")
                .unwrap_or_else(|_| defaults.knn_k.to_string())
                .parse()?,
            knn_num_candidates: std::env::var("KNN_NUM_CANDIDATES")
                .unwrap_or_else(|_| defaults.knn_num_candidates.to_string())
                .parse()?,
            default_list_size: std::env::var("DEFAULT_LIST_SIZE")
                .unwrap_or_else(|_| defaults.default_list_size.to_string())
                .parse()?,

            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| defaults.request_timeout_secs.to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.embedding_dimension == 0 {
            bail!("EMBEDDING_DIMENSION must be greater than zero");
        }
        if self.knn_k == 0 {
            bail!("KNN_K must be greater than zero");
        }
        if self.elasticsearch_index.trim().is_empty() {
            bail!("ELASTICSEARCH_INDEX cannot be empty");
        }
        if self.knn_num_candidates < self.knn_k {
            // Left to the backend to accept or reject.
            tracing::warn!(
                k = self.knn_k,
                num_candidates = self.knn_num_candidates,
                "KNN_NUM_CANDIDATES is smaller than KNN_K"
            );
        }
        Ok(())
    }

    pub fn knn(&self) -> KnnSettings {
        KnnSettings {
            k: self.knn_k,
            num_candidates: self.knn_num_candidates,
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
