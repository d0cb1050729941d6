use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recommender::{
    api::{create_router, AppState},
    config::Config,
    services::{providers::TmdbProvider, Recommender},
    store::RecommendationContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Refuse to serve until both artifacts load
    let context = RecommendationContext::load(&config.catalog_path, &config.similarity_path)
        .context("Failed to load recommendation data")?;

    let provider = TmdbProvider::from_config(&config)?;

    let recommender = Recommender::new(
        Arc::new(context),
        Arc::new(provider),
        config.recommendation_count,
    );

    let app = create_router(AppState::new(recommender));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!(address = %address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
