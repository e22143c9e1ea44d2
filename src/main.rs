//! Colbert server binary.

use anyhow::Context;
use colbert::{
    agent::ColbertAgent,
    history::{HistoryStore, LibsqlHistory},
    llm::{ChatModel, InvocationChain, Provider},
    retrieval::HttpRetriever,
    AppState, Config,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "colbert=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let retriever = Arc::new(
        HttpRetriever::new(config.retrieval.base_url.clone())
            .context("failed to build retrieval client")?,
    );

    let history: Arc<dyn HistoryStore> = match &config.history.database_path {
        Some(path) => {
            tracing::info!(path, "using file-backed history store");
            Arc::new(LibsqlHistory::new_local(path).await?)
        }
        None => {
            tracing::info!("using in-memory history store");
            Arc::new(LibsqlHistory::new_memory().await?)
        }
    };

    let mut tiers: Vec<Box<dyn ChatModel>> = Vec::new();
    for model in &config.llm.tiers {
        let provider = Provider::Mistral {
            api_key: config.llm.mistral_api_key.clone(),
            api_base: config.llm.mistral_api_base.clone(),
            model: model.clone(),
        };
        tiers.push(provider.create_client()?);
    }
    if let Some(model) = &config.llm.ollama_fallback_model {
        let provider = Provider::Ollama {
            base_url: config.llm.ollama_url.clone(),
            model: model.clone(),
        };
        tiers.push(provider.create_client()?);
    }
    tracing::info!(
        tiers = ?config.llm.tiers,
        ollama_fallback = config.llm.ollama_fallback_model.as_deref().unwrap_or("none"),
        "model tier chain configured"
    );

    let chain = InvocationChain::new(tiers, Duration::from_secs(config.llm.tier_backoff_secs));
    let agent = Arc::new(ColbertAgent::new(
        retriever,
        history,
        chain,
        config.retrieval.top_k,
        Duration::from_secs(config.llm.request_timeout_secs),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState {
        config: Arc::new(config),
        agent,
    };

    let app = colbert::api::routes::create_router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(%addr, "Colbert server listening");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
