//! Elasticsearch bulk-file annotation.
//!
//! A bulk file alternates action lines and document lines. Documents that
//! carry a non-empty `embedding_text` get an `embedding_vector` computed from
//! it; everything else passes through untouched.

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::embeddings::EmbeddingProvider;

pub const TEXT_FIELD: &str = "embedding_text";
pub const VECTOR_FIELD: &str = crate::search::descriptor::VECTOR_FIELD;

#[derive(Debug, Clone, PartialEq)]
pub struct BulkEntry {
    pub action: String,
    pub document: Map<String, Value>,
}

impl BulkEntry {
    pub fn embedding_text(&self) -> Option<&str> {
        self.document.get(TEXT_FIELD).and_then(Value::as_str)
    }
}

pub fn parse(contents: &str) -> Result<Vec<BulkEntry>> {
    let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.len() % 2 != 0 {
        bail!(
            "bulk file has {} non-empty lines; expected action/document pairs",
            lines.len()
        );
    }

    lines
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| {
            let document = serde_json::from_str(pair[1])
                .with_context(|| format!("document {} is not a JSON object", i + 1))?;
            Ok(BulkEntry {
                action: pair[0].to_string(),
                document,
            })
        })
        .collect()
}

pub fn render(entries: &[BulkEntry]) -> Result<String> {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.action);
        out.push('\n');
        out.push_str(&serde_json::to_string(&entry.document)?);
        out.push('\n');
    }
    Ok(out)
}

/// Embed every entry's text, `batch_size` texts per model call. Returns the
/// number of documents that received a vector.
pub async fn annotate(
    entries: &mut [BulkEntry],
    provider: &EmbeddingProvider,
    batch_size: usize,
) -> Result<usize> {
    let batch_size = batch_size.max(1);
    let mut annotated = 0;

    for (batch_no, chunk) in entries.chunks_mut(batch_size).enumerate() {
        let texts: Vec<String> = chunk
            .iter()
            .map(|e| e.embedding_text().unwrap_or_default().to_string())
            .collect();

        if texts.iter().all(|t| t.trim().is_empty()) {
            debug!(batch = batch_no, "no embedding text in batch");
            continue;
        }

        let vectors = provider
            .embed_batch(&texts)
            .await
            .with_context(|| format!("embedding batch {} failed", batch_no))?;

        for (entry, vector) in chunk.iter_mut().zip(vectors) {
            if let Some(vector) = vector {
                entry
                    .document
                    .insert(VECTOR_FIELD.to_string(), serde_json::to_value(&vector)?);
                annotated += 1;
            }
        }
    }

    info!(documents = entries.len(), annotated, "Bulk annotation finished");
    Ok(annotated)
}
