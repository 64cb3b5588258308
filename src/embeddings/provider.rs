// Embedding Provider - Input validation and dimension enforcement around a model
use super::{EmbeddingModel, EmbeddingVector};
use crate::errors::{GatewayError, GatewayResult};
use std::sync::Arc;
use tracing::{debug, info};

const PROBE_TEXT: &str = "dimension probe";

pub struct EmbeddingProvider {
    model: Arc<dyn EmbeddingModel>,
    dimension: usize,
}

impl EmbeddingProvider {
    pub fn new(model: Arc<dyn EmbeddingModel>, dimension: usize) -> Self {
        Self { model, dimension }
    }

    /// Embedding dimension D, fixed for the life of the process
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn model(&self) -> &str {
        self.model.id()
    }

    /// Embed one text. The text is trimmed before it reaches the model.
    pub async fn embed(&self, text: &str) -> GatewayResult<EmbeddingVector> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::InvalidInput("Text cannot be empty".to_string()));
        }

        debug!(model = self.model.id(), chars = text.len(), "embedding text");
        let values = self.model.encode(text).await?;
        EmbeddingVector::with_dimension(values, self.dimension)
    }

    /// Embed many texts in one model call.
    ///
    /// The result is aligned with `texts`: slot `i` is `None` when `texts[i]`
    /// was empty after trimming and therefore never sent to the model.
    pub async fn embed_batch(
        &self,
        texts: &[String],
    ) -> GatewayResult<Vec<Option<EmbeddingVector>>> {
        if texts.is_empty() {
            return Err(GatewayError::InvalidInput(
                "Texts list cannot be empty".to_string(),
            ));
        }

        let (positions, retained): (Vec<usize>, Vec<String>) = texts
            .iter()
            .enumerate()
            .filter_map(|(i, t)| {
                let t = t.trim();
                (!t.is_empty()).then(|| (i, t.to_string()))
            })
            .unzip();

        if retained.is_empty() {
            return Err(GatewayError::InvalidInput(
                "All texts are empty after stripping whitespace".to_string(),
            ));
        }

        debug!(
            model = self.model.id(),
            total = texts.len(),
            retained = retained.len(),
            "embedding batch"
        );

        let encoded = self.model.encode_batch(&retained).await?;
        if encoded.len() != retained.len() {
            return Err(GatewayError::Embedding(format!(
                "Expected {} embeddings, model returned {}",
                retained.len(),
                encoded.len()
            )));
        }

        let mut slots: Vec<Option<EmbeddingVector>> = vec![None; texts.len()];
        for (position, values) in positions.into_iter().zip(encoded) {
            slots[position] = Some(EmbeddingVector::with_dimension(values, self.dimension)?);
        }
        Ok(slots)
    }

    /// Startup check that the model really produces D-length vectors.
    pub async fn verify(&self) -> GatewayResult<()> {
        let vector = self.embed(PROBE_TEXT).await?;
        info!(
            model = self.model.id(),
            dimension = vector.len(),
            "Embedding model verified"
        );
        Ok(())
    }
}
