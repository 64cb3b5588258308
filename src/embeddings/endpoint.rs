// Vector Endpoint - Single-text and batch vector computation for the HTTP layer
use super::{EmbeddingProvider, EmbeddingVector};
use crate::errors::GatewayResult;
use std::sync::Arc;

pub struct VectorEndpoint {
    provider: Arc<EmbeddingProvider>,
}

impl VectorEndpoint {
    pub fn new(provider: Arc<EmbeddingProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &EmbeddingProvider {
        &self.provider
    }

    pub async fn compute_vector(&self, text: &str) -> GatewayResult<EmbeddingVector> {
        self.provider.embed(text.trim()).await
    }

    pub async fn compute_vectors(
        &self,
        texts: &[String],
    ) -> GatewayResult<Vec<Option<EmbeddingVector>>> {
        self.provider.embed_batch(texts).await
    }
}
