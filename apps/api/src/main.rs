mod config;
mod db;
mod errors;
mod ingest;
mod llm_client;
mod matching;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::llm_client::LlmClient;
use crate::matching::evaluator::MatchService;
use crate::matching::supplier::{LlmTransferableSupplier, NoopSupplier, TransferableSupplier};
use crate::models::job::JobRequirement;
use crate::models::profile::ProfessionalProfile;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::cache::{InferenceCache, MemoryInferenceCache, RedisInferenceCache};
use crate::store::memory::MemoryStore;
use crate::store::postgres::PgStore;
use crate::store::{JobStore, ProfileStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Career Match API v{}", env!("CARGO_PKG_VERSION"));

    // Profile and job stores
    let (profiles, jobs): (Arc<ProfileStore>, Arc<JobStore>) = match &config.database_url {
        Some(url) => {
            let store = PgStore::new(create_pool(url).await?);
            (Arc::new(store.clone()), Arc::new(store))
        }
        None => {
            info!("DATABASE_URL not set, using in-memory stores");
            (
                Arc::new(MemoryStore::<ProfessionalProfile>::default()),
                Arc::new(MemoryStore::<JobRequirement>::default()),
            )
        }
    };

    // Transferable-inference cache
    let cache: Arc<dyn InferenceCache> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.clone())?;
            info!("Redis inference cache initialized");
            Arc::new(RedisInferenceCache::new(client, config.inference_cache_ttl))
        }
        None => Arc::new(MemoryInferenceCache::new(config.inference_cache_ttl)),
    };

    // LLM client and transferable supplier
    let llm = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), config.supplier_timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(client)
        }
        None => {
            info!("ANTHROPIC_API_KEY not set, transferable inference and Q&A disabled");
            None
        }
    };
    let supplier: Arc<dyn TransferableSupplier> = match &llm {
        Some(client) => Arc::new(LlmTransferableSupplier(client.clone())),
        None => Arc::new(NoopSupplier),
    };

    let matcher = MatchService::new(
        profiles.clone(),
        jobs.clone(),
        supplier,
        cache,
        config.supplier_timeout,
    );

    let state = AppState {
        profiles,
        jobs,
        matcher,
        llm,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
