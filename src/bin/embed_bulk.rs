//! Fills `embedding_vector` in an Elasticsearch bulk file from each
//! document's `embedding_text`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use query_gateway::{
    bulk,
    embeddings::{EmbeddingProvider, HttpEmbeddingModel},
    telemetry, GatewayConfig,
};

#[derive(Parser)]
#[command(name = "embed-bulk")]
#[command(about = "Add embedding vectors to an Elasticsearch bulk file", long_about = None)]
struct Cli {
    /// Bulk file to read
    #[arg(short, long, default_value = "bulk_data.json")]
    input: PathBuf,

    /// Where to write the result (defaults to overwriting the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Texts sent to the embeddings service per request
    #[arg(long, default_value_t = 32)]
    batch_size: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();
    let config = GatewayConfig::from_env()?;

    let model = HttpEmbeddingModel::new(
        &config.embeddings_service_url,
        &config.embedding_model_name,
        config.request_timeout(),
    )?;
    let provider = EmbeddingProvider::new(Arc::new(model), config.embedding_dimension);

    let contents = tokio::fs::read_to_string(&cli.input)
        .await
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let mut entries = bulk::parse(&contents)?;

    let annotated = bulk::annotate(&mut entries, &provider, cli.batch_size).await?;

    let output = cli.output.unwrap_or(cli.input);
    tokio::fs::write(&output, bulk::render(&entries)?)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(
        annotated,
        documents = entries.len(),
        output = %output.display(),
        "Embeddings generated and added to bulk file"
    );
    Ok(())
}
