//! REST API for the query gateway
//!
//! Keyword, semantic and hybrid search plus embedding vector endpoints.

pub mod search;

pub use search::{configure, AppState, BatchVectorResponse, VectorResponse};
