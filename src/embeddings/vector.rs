use serde::Serialize;

use crate::errors::{GatewayError, GatewayResult};

/// Fixed-length embedding. Only built through a dimension check, so a value
/// in hand always has exactly the configured number of elements. It is
/// serialized for responses but never deserialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EmbeddingVector(Vec<f32>);

impl EmbeddingVector {
    pub fn with_dimension(values: Vec<f32>, dimension: usize) -> GatewayResult<Self> {
        if values.len() != dimension {
            return Err(GatewayError::DimensionMismatch {
                expected: dimension,
                actual: values.len(),
            });
        }
        Ok(Self(values))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}
