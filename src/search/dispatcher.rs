// Search Dispatcher - Routes a query through embedding, descriptor building and execution
use super::builder::{self, KnnSettings};
use super::{Document, Query, QueryDescriptor, SearchBackend, SearchMode};
use crate::embeddings::EmbeddingProvider;
use crate::errors::{GatewayError, GatewayResult};
use std::sync::Arc;
use tracing::{debug, info};

/// Stateless per request; the provider and backend are shared process-wide.
pub struct SearchDispatcher {
    embeddings: Arc<EmbeddingProvider>,
    backend: Arc<dyn SearchBackend>,
    knn: KnnSettings,
}

impl SearchDispatcher {
    pub fn new(
        embeddings: Arc<EmbeddingProvider>,
        backend: Arc<dyn SearchBackend>,
        knn: KnnSettings,
    ) -> Self {
        Self {
            embeddings,
            backend,
            knn,
        }
    }

    /// Search with a mode taken straight off the wire. Unknown modes fail
    /// before anything is embedded or sent to the backend.
    pub async fn search_wire(
        &self,
        text: &str,
        raw_mode: Option<&str>,
    ) -> GatewayResult<Vec<Document>> {
        let mode = SearchMode::from_wire(raw_mode)?;
        self.search(&Query::new(text, mode)).await
    }

    pub async fn search(&self, query: &Query) -> GatewayResult<Vec<Document>> {
        let descriptor = self.describe(query).await?;

        info!(
            mode = %query.mode(),
            kind = descriptor.kind(),
            index = self.backend.index(),
            "Dispatching search"
        );

        let documents = self.backend.execute(&descriptor).await?;
        debug!(mode = %query.mode(), results = documents.len(), "Search returned");
        Ok(documents)
    }

    /// Administrative listing, outside the mode dispatch path
    pub async fn list(&self, limit: usize) -> GatewayResult<Vec<Document>> {
        self.backend.fetch_all(limit).await
    }

    /// Validate the query and build its descriptor, embedding when the mode needs it.
    async fn describe(&self, query: &Query) -> GatewayResult<QueryDescriptor> {
        let text = query.trimmed();
        let mode = query.mode();

        if mode.needs_vector() && text.is_empty() {
            return Err(GatewayError::EmptyQuery { mode });
        }

        let descriptor = match mode {
            SearchMode::Keyword => builder::build_keyword(text),
            SearchMode::Semantic => {
                let vector = self.embeddings.embed(text).await?;
                builder::build_semantic(vector, self.knn.k, self.knn.num_candidates)
            }
            SearchMode::Hybrid => {
                let vector = self.embeddings.embed(text).await?;
                builder::build_hybrid(text, vector, self.knn.k, self.knn.num_candidates)
            }
        };
        Ok(descriptor)
    }
}
