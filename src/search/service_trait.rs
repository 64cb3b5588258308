// Search Backend Trait - Narrow interface to the document store
use super::{Document, QueryDescriptor};
use crate::errors::GatewayResult;
use async_trait::async_trait;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Index (collection) every query runs against
    fn index(&self) -> &str;

    /// Run a descriptor and return documents in the store's relevance order
    async fn execute(&self, descriptor: &QueryDescriptor) -> GatewayResult<Vec<Document>>;

    /// Up to `limit` documents in store-default order
    async fn fetch_all(&self, limit: usize) -> GatewayResult<Vec<Document>>;

    /// Optional: dimension declared for the vector field, if the store exposes it
    async fn vector_dimension(&self) -> GatewayResult<Option<usize>> {
        Ok(None)
    }
}
