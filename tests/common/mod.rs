// Shared test doubles for the embedding model and search backend
#![allow(dead_code)]

use async_trait::async_trait;
use query_gateway::{
    embeddings::{EmbeddingModel, EmbeddingProvider},
    errors::{GatewayError, GatewayResult},
    search::{Document, QueryDescriptor, SearchBackend},
    GatewayConfig, Services,
};
use serde_json::json;
use std::sync::{Arc, Mutex};

pub const DIMENSION: usize = 8;

/// Ordered record of calls across both doubles
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct MockModel {
    pub dimension: usize,
    pub log: CallLog,
}

impl MockModel {
    pub fn vector_for(text: &str, dimension: usize) -> Vec<f32> {
        let seed = text.bytes().map(u32::from).sum::<u32>();
        (0..dimension)
            .map(|i| ((seed + i as u32 * 17) % 101) as f32 / 101.0)
            .collect()
    }
}

#[async_trait]
impl EmbeddingModel for MockModel {
    fn id(&self) -> &str {
        "mock-minilm"
    }

    async fn encode(&self, text: &str) -> GatewayResult<Vec<f32>> {
        self.log.push(format!("embed:{}", text));
        Ok(Self::vector_for(text, self.dimension))
    }

    async fn encode_batch(&self, texts: &[String]) -> GatewayResult<Vec<Vec<f32>>> {
        self.log.push(format!("embed_batch:{}", texts.len()));
        Ok(texts
            .iter()
            .map(|t| Self::vector_for(t, self.dimension))
            .collect())
    }
}

pub enum Failure {
    Unavailable,
    Rejected,
}

pub struct MockBackend {
    pub log: CallLog,
    pub documents: Vec<Document>,
    pub descriptors: Mutex<Vec<QueryDescriptor>>,
    pub failure: Option<Failure>,
    pub dims: Option<usize>,
}

impl MockBackend {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            documents: sample_documents(),
            descriptors: Mutex::new(Vec::new()),
            failure: None,
            dims: Some(DIMENSION),
        }
    }

    pub fn failing(log: CallLog, failure: Failure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::new(log)
        }
    }

    pub fn last_descriptor(&self) -> Option<QueryDescriptor> {
        self.descriptors.lock().unwrap().last().cloned()
    }

    fn outcome(&self) -> GatewayResult<Vec<Document>> {
        match self.failure {
            Some(Failure::Unavailable) => Err(GatewayError::BackendUnavailable(
                "connection refused".to_string(),
            )),
            Some(Failure::Rejected) => Err(GatewayError::BackendQuery(
                "parsing_exception".to_string(),
            )),
            None => Ok(self.documents.clone()),
        }
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    fn index(&self) -> &str {
        "audit_logs"
    }

    async fn execute(&self, descriptor: &QueryDescriptor) -> GatewayResult<Vec<Document>> {
        self.log.push(format!("execute:{}", descriptor.kind()));
        self.descriptors.lock().unwrap().push(descriptor.clone());
        self.outcome()
    }

    async fn fetch_all(&self, limit: usize) -> GatewayResult<Vec<Document>> {
        self.log.push(format!("fetch_all:{}", limit));
        self.outcome()
            .map(|docs| docs.into_iter().take(limit).collect())
    }

    async fn vector_dimension(&self) -> GatewayResult<Option<usize>> {
        Ok(self.dims)
    }
}

pub fn sample_documents() -> Vec<Document> {
    [
        json!({
            "summary": "User login",
            "description": "User john@example.com logged in successfully"
        }),
        json!({"summary": "Login failure", "description": "Invalid password for admin"}),
        json!({"summary": "Disk usage", "description": "Volume /var at 91%"}),
    ]
    .into_iter()
    .map(|v| serde_json::from_value(v).unwrap())
    .collect()
}

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        embedding_dimension: DIMENSION,
        ..GatewayConfig::default()
    }
}

pub struct Harness {
    pub log: CallLog,
    pub backend: Arc<MockBackend>,
    pub provider: Arc<EmbeddingProvider>,
    pub services: Services,
}

pub fn harness_with(backend: impl FnOnce(CallLog) -> MockBackend) -> Harness {
    let log = CallLog::default();
    let model = Arc::new(MockModel {
        dimension: DIMENSION,
        log: log.clone(),
    });
    let provider = Arc::new(EmbeddingProvider::new(model, DIMENSION));
    let backend = Arc::new(backend(log.clone()));
    let services = Services::new(provider.clone(), backend.clone(), &test_config());

    Harness {
        log,
        backend,
        provider,
        services,
    }
}

pub fn harness() -> Harness {
    harness_with(MockBackend::new)
}
