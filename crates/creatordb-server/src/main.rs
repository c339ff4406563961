mod api;
mod scheduler;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use creatordb_enrich::{
    DiscoveryOptions, EnrichmentRunner, InstagramEnrichment, YoutubeEnrichment,
};

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = creatordb_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = creatordb_db::PoolConfig::from_app_config(&config);
    let pool = creatordb_db::connect_pool(&config.database_url, pool_config).await?;
    creatordb_db::run_migrations(&pool).await?;

    let catalog = if config.niches_path.exists() {
        creatordb_core::load_niches(&config.niches_path)?
    } else {
        tracing::info!(path = %config.niches_path.display(), "no niche file, using built-in catalog");
        creatordb_core::NicheCatalog::built_in()
    };

    let youtube_client = creatordb_youtube::YoutubeClient::new(
        &config.youtube_api_key,
        config.platform_request_timeout_secs,
    )?;
    let instagram_client = creatordb_instagram::InstagramClient::new(
        &config.instagram_access_token,
        config.platform_request_timeout_secs,
    )?;

    let youtube = YoutubeEnrichment::new(
        youtube_client,
        pool.clone(),
        catalog,
        config.thresholds,
        DiscoveryOptions {
            region: config.youtube_region.clone(),
            results_per_keyword: config.search_results_per_keyword,
            sample_size: config.recent_sample_size,
        },
    );
    let instagram = InstagramEnrichment::new(instagram_client, pool.clone());
    let runner = Arc::new(EnrichmentRunner::new(youtube, instagram));

    let _scheduler = scheduler::build_scheduler(Arc::clone(&runner)).await?;

    let app = build_app(AppState { pool, runner });

    tracing::info!(addr = %config.bind_addr, "listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
