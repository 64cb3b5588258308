// Query Gateway - Keyword, semantic and hybrid search over a document store
// Dispatches free-text queries and computes embedding vectors for arbitrary text

pub mod api;
pub mod bootstrap;
pub mod bulk;
pub mod config;
pub mod embeddings;
pub mod errors;
pub mod search;
pub mod telemetry;

pub use bootstrap::Services;
pub use config::GatewayConfig;
pub use errors::{GatewayError, GatewayResult};
pub use search::{SearchDispatcher, SearchMode};
