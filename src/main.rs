//! Service entry point.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use docquery::infrastructure::config::ConfigLoader;
use docquery::infrastructure::embeddings::OllamaEmbeddingProvider;
use docquery::infrastructure::generation::OpenAiGenerationClient;
use docquery::server::{router, AppState};
use docquery::{Config, Pipeline};

/// Question answering over a single policy document.
#[derive(Debug, Parser)]
#[command(name = "docquery", version, about)]
struct Cli {
    /// Path to a YAML config file. Defaults to docquery.yaml in the working
    /// directory when omitted.
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };

    init_tracing(&config);

    let embedder = Arc::new(
        OllamaEmbeddingProvider::new(&config.embedding)
            .context("failed to construct embedding provider")?,
    );
    let generator = Arc::new(
        OpenAiGenerationClient::new(&config.generation)
            .context("failed to construct generation client")?,
    );

    // An initialization failure keeps the server running in not-ready mode
    // instead of exiting, so the UI gets a well-formed answer either way.
    let pipeline = match Pipeline::initialize(&config, embedder, generator).await {
        Ok(pipeline) => Some(Arc::new(pipeline)),
        Err(err) => {
            error!(error = %err, "pipeline initialization failed, serving not-ready responses");
            None
        }
    };

    let app = router(AppState { pipeline });
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(%addr, "listening");
    axum::serve(listener, app).await.context("server exited")?;

    Ok(())
}
