// Gateway Error Types
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::search::SearchMode;

pub type GatewayResult<T> = Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Query cannot be empty for {mode} search")]
    EmptyQuery { mode: SearchMode },

    #[error("Invalid search_type: {0}. Must be 'keyword', 'semantic', or 'hybrid'")]
    UnsupportedMode(String),

    #[error("Search backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Search backend rejected query: {0}")]
    BackendQuery(String),

    #[error("Embedding service error: {0}")]
    Embedding(String),

    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GatewayError {
    /// True for failures caused by the caller's input (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::InvalidInput(_)
                | GatewayError::EmptyQuery { .. }
                | GatewayError::UnsupportedMode(_)
        )
    }

    pub fn to_error_body(&self) -> ErrorBody {
        match self {
            GatewayError::InvalidInput(_)
            | GatewayError::EmptyQuery { .. }
            | GatewayError::UnsupportedMode(_) => ErrorBody {
                error: self.to_string(),
                detail: None,
            },
            GatewayError::BackendUnavailable(_) | GatewayError::BackendQuery(_) => ErrorBody {
                error: "Search failed".to_string(),
                detail: Some(self.to_string()),
            },
            GatewayError::Embedding(_) | GatewayError::DimensionMismatch { .. } => ErrorBody {
                error: "Embedding generation failed".to_string(),
                detail: Some(self.to_string()),
            },
            GatewayError::Config(_) => ErrorBody {
                error: "Internal server error".to_string(),
                detail: Some(self.to_string()),
            },
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidInput(_)
            | GatewayError::EmptyQuery { .. }
            | GatewayError::UnsupportedMode(_) => StatusCode::BAD_REQUEST,
            GatewayError::BackendUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::BackendQuery(_) | GatewayError::Embedding(_) => StatusCode::BAD_GATEWAY,
            GatewayError::DimensionMismatch { .. } | GatewayError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        if !self.is_client_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(self.to_error_body())
    }
}
