use chrono::Utc;
use clap::Parser;
use policy_rag_api::{build_router, AppState};
use policy_rag_core::{AtlasVectorStore, RetrievalOptions, RetrievalStage};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "policy-rag-api", version)]
struct Cli {
    /// Address to bind the HTTP server on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// MongoDB Atlas Data API base URL (e.g. https://data.mongodb-api.com/app/<id>/endpoint/data/v1)
    #[arg(long, env = "ATLAS_DATA_API_URL")]
    atlas_url: String,

    /// Atlas Data API key
    #[arg(long, env = "ATLAS_DATA_API_KEY", hide_env_values = true)]
    atlas_api_key: String,

    /// Atlas data source (cluster) name
    #[arg(long, default_value = "Cluster0")]
    data_source: String,

    /// Database holding the reference policy documents
    #[arg(long, default_value = "insurance_advisor")]
    database: String,

    /// Collection holding the reference policy documents
    #[arg(long, default_value = "documents")]
    collection: String,

    /// Atlas vector search index name
    #[arg(long, default_value = "vector_index")]
    search_index: String,

    /// Document field holding the stored embeddings
    #[arg(long, default_value = "embedding")]
    vector_field: String,

    /// Candidate breadth of the approximate nearest-neighbor search
    #[arg(long, default_value_t = policy_rag_core::DEFAULT_NUM_CANDIDATES)]
    num_candidates: usize,

    /// Number of ranked matches returned per query
    #[arg(long, default_value_t = policy_rag_core::DEFAULT_LIMIT)]
    limit: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_version = env!("CARGO_PKG_VERSION");

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = AtlasVectorStore::new(
        &cli.atlas_url,
        cli.atlas_api_key,
        cli.data_source,
        cli.database,
        cli.collection,
        cli.search_index,
        cli.vector_field,
    )
    .map_err(|error| anyhow::anyhow!(error.to_string()))?;

    let options = RetrievalOptions {
        num_candidates: cli.num_candidates,
        limit: cli.limit,
    };
    let state = AppState {
        retrieval: RetrievalStage::new(Arc::new(store), options),
    };

    info!(
        version = app_version,
        started_at = %Utc::now().to_rfc3339(),
        bind = %cli.bind,
        "policy-rag-api boot"
    );

    let listener = tokio::net::TcpListener::bind(&cli.bind).await?;
    axum::serve(listener, build_router(state)).await?;

    Ok(())
}
