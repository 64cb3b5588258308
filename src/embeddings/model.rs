// Embedding Model - Client for the external text-to-vector service
use crate::errors::{GatewayError, GatewayResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw model contract: encodes already-cleaned texts, one vector per text.
#[async_trait]
pub trait EmbeddingModel: Send + Sync {
    /// Model identifier (e.g. all-MiniLM-L6-v2)
    fn id(&self) -> &str;

    /// Encode a single text
    async fn encode(&self, text: &str) -> GatewayResult<Vec<f32>>;

    /// Encode several texts in one round trip, preserving order
    async fn encode_batch(&self, texts: &[String]) -> GatewayResult<Vec<Vec<f32>>>;
}

pub struct HttpEmbeddingModel {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

impl HttpEmbeddingModel {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
        })
    }

    async fn post<Req: Serialize + ?Sized, Resp: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &Req,
    ) -> GatewayResult<Resp> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Embedding(format!("Embeddings request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(GatewayError::Embedding(format!(
                "Embeddings service returned {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| GatewayError::Embedding(format!("Failed to parse response: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    text: &'a str,
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct BatchEmbedRequest<'a> {
    texts: &'a [String],
    model: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct BatchEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[async_trait]
impl EmbeddingModel for HttpEmbeddingModel {
    fn id(&self) -> &str {
        &self.model
    }

    async fn encode(&self, text: &str) -> GatewayResult<Vec<f32>> {
        let result: EmbedResponse = self
            .post(
                "/embed",
                &EmbedRequest {
                    text,
                    model: &self.model,
                },
            )
            .await?;
        Ok(result.embedding)
    }

    async fn encode_batch(&self, texts: &[String]) -> GatewayResult<Vec<Vec<f32>>> {
        let result: BatchEmbedResponse = self
            .post(
                "/batch/embed",
                &BatchEmbedRequest {
                    texts,
                    model: &self.model,
                },
            )
            .await?;
        Ok(result.embeddings)
    }
}
