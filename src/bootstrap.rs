// Bootstrap - Builds the shared provider/backend pair and checks they agree
use crate::{
    config::GatewayConfig,
    embeddings::{EmbeddingProvider, HttpEmbeddingModel, VectorEndpoint},
    errors::{GatewayError, GatewayResult},
    search::{ElasticsearchClient, SearchBackend, SearchDispatcher},
};
use std::sync::Arc;
use tracing::{info, warn};

/// Process-wide services, created once and shared by every request.
#[derive(Clone)]
pub struct Services {
    pub provider: Arc<EmbeddingProvider>,
    pub backend: Arc<dyn SearchBackend>,
    pub dispatcher: Arc<SearchDispatcher>,
    pub vectors: Arc<VectorEndpoint>,
}

impl Services {
    pub fn new(
        provider: Arc<EmbeddingProvider>,
        backend: Arc<dyn SearchBackend>,
        config: &GatewayConfig,
    ) -> Self {
        Self {
            dispatcher: Arc::new(SearchDispatcher::new(
                provider.clone(),
                backend.clone(),
                config.knn(),
            )),
            vectors: Arc::new(VectorEndpoint::new(provider.clone())),
            provider,
            backend,
        }
    }

    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let model = HttpEmbeddingModel::new(
            &config.embeddings_service_url,
            &config.embedding_model_name,
            config.request_timeout(),
        )?;
        let provider = Arc::new(EmbeddingProvider::new(
            Arc::new(model),
            config.embedding_dimension,
        ));

        let backend = Arc::new(ElasticsearchClient::new(
            &config.elasticsearch_url,
            &config.elasticsearch_index,
            config.elasticsearch_user.as_deref(),
            config.elasticsearch_password.as_deref(),
            config.request_timeout(),
        )?);

        info!(
            index = %config.elasticsearch_index,
            model = %config.embedding_model_name,
            dimension = config.embedding_dimension,
            "Initialized search backend and embedding provider"
        );

        Ok(Self::new(provider, backend, config))
    }

    /// Startup consistency checks. Dimension disagreements are fatal; an
    /// unreachable model or store only warns, since either may come up later.
    pub async fn verify(&self) -> GatewayResult<()> {
        match self.provider.verify().await {
            Err(e @ GatewayError::DimensionMismatch { .. }) => return Err(e),
            Err(e) => warn!(
                model = self.provider.model(),
                error = %e,
                "Could not verify embedding model at startup"
            ),
            Ok(()) => {}
        }
        verify_dimensions(&self.provider, self.backend.as_ref()).await
    }
}

/// Compare the configured dimension with the backend's vector field.
pub async fn verify_dimensions(
    provider: &EmbeddingProvider,
    backend: &dyn SearchBackend,
) -> GatewayResult<()> {
    match backend.vector_dimension().await {
        Ok(Some(dims)) if dims != provider.dimension() => Err(GatewayError::Config(format!(
            "embedding dimension {} does not match index '{}' vector field dimension {}",
            provider.dimension(),
            backend.index(),
            dims
        ))),
        Ok(Some(dims)) => {
            info!(index = backend.index(), dims, "Vector field dimension matches model");
            Ok(())
        }
        Ok(None) => {
            warn!(index = backend.index(), "Index declares no vector field dimension");
            Ok(())
        }
        Err(e) => {
            warn!(index = backend.index(), error = %e, "Could not read index mapping at startup");
            Ok(())
        }
    }
}
