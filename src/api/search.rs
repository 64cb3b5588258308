//! HTTP endpoints for search and vector computation

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::info;

use crate::{
    bootstrap::Services,
    embeddings::EmbeddingVector,
    errors::{GatewayError, GatewayResult},
    search::Document,
};

/// Application state shared by all workers
pub struct AppState {
    pub app_name: String,
    pub default_list_size: usize,
    pub services: Services,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub search_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VectorParams {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VectorResponse {
    pub text: String,
    pub vector: EmbeddingVector,
}

#[derive(Debug, Deserialize)]
pub struct BatchVectorRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct BatchVectorResponse {
    pub model: String,
    pub dimension: usize,
    pub vectors: Vec<Option<EmbeddingVector>>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub size: Option<usize>,
}

async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Welcome to {}", state.app_name),
        "status": "healthy",
    }))
}

async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> GatewayResult<web::Json<Vec<Document>>> {
    let start = Instant::now();
    let params = params.into_inner();

    let results = state
        .services
        .dispatcher
        .search_wire(&params.query, params.search_type.as_deref())
        .await?;

    info!(
        query = %params.query,
        search_type = params.search_type.as_deref().unwrap_or("keyword"),
        results = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Search completed"
    );
    Ok(web::Json(results))
}

async fn get_vector(
    state: web::Data<AppState>,
    params: web::Query<VectorParams>,
) -> GatewayResult<web::Json<VectorResponse>> {
    let text = params
        .into_inner()
        .text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            GatewayError::InvalidInput("Query parameter 'text' is required".to_string())
        })?;

    let vector = state.services.vectors.compute_vector(&text).await?;
    Ok(web::Json(VectorResponse { text, vector }))
}

async fn get_vectors(
    state: web::Data<AppState>,
    body: web::Json<BatchVectorRequest>,
) -> GatewayResult<web::Json<BatchVectorResponse>> {
    let endpoint = &state.services.vectors;
    let vectors = endpoint.compute_vectors(&body.texts).await?;

    Ok(web::Json(BatchVectorResponse {
        model: endpoint.provider().model().to_string(),
        dimension: endpoint.provider().dimension(),
        vectors,
    }))
}

async fn list_logs(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> GatewayResult<web::Json<Vec<Document>>> {
    let size = params.size.unwrap_or(state.default_list_size);
    let documents = state.services.dispatcher.list(size).await?;
    Ok(web::Json(documents))
}

/// Register all gateway routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health))
        .route("/health", web::get().to(health))
        .route("/search", web::get().to(search))
        .route("/get_vector/", web::get().to(get_vector))
        .route("/get_vector", web::get().to(get_vector))
        .route("/get_vectors", web::post().to(get_vectors))
        .route("/logs", web::get().to(list_logs));
}
