// Embedding Pipeline
pub mod endpoint;
pub mod model;
pub mod provider;
pub mod vector;

pub use endpoint::VectorEndpoint;
pub use model::{EmbeddingModel, HttpEmbeddingModel};
pub use provider::EmbeddingProvider;
pub use vector::EmbeddingVector;
