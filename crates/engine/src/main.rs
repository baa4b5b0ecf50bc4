//! Lore Keeper Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lorekeeper_engine::api::{self, CorsPolicy};
use lorekeeper_engine::app::{App, Repositories};
use lorekeeper_engine::infrastructure::{
    anthropic::AnthropicClient,
    config::AppConfig,
    supabase::{SupabaseAuth, SupabaseClient, SupabaseRepositories},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root as well as the working directory.
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lorekeeper_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Lore Keeper Engine");

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    if config.anthropic_api_key.is_empty() {
        tracing::warn!("ANTHROPIC_API_KEY is not set; AI assistant requests will fail");
    }

    // Hosted store and identity provider share one client
    tracing::info!(url = %config.supabase_url, "Using hosted store");
    let supabase = SupabaseClient::new(&config.supabase_url, &config.supabase_service_key);
    let repos = Repositories::from(SupabaseRepositories::new(supabase.clone()));
    let identity = Arc::new(SupabaseAuth::new(supabase));

    let llm = Arc::new(AnthropicClient::new(
        &config.anthropic_base_url,
        &config.anthropic_api_key,
        &config.anthropic_model,
        config.anthropic_max_tokens,
    ));
    tracing::info!(model = %config.anthropic_model, "LLM client configured");

    // Create application
    let app = Arc::new(App::new(repos, llm, identity));

    let cors = CorsPolicy::new(
        config.cors_allowed_origins.clone(),
        config.cors_allowed_origin_suffixes.clone(),
    );
    let router = api::http::routes(app)
        .layer(TraceLayer::new_for_http())
        .layer(cors.into_layer());

    // Start server
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .with_context(|| format!("invalid listen address {}", config.bind_address()))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for dir in [std::path::PathBuf::from("."), repo_root] {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if path.exists() {
                let _ = dotenvy::from_path(path);
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
