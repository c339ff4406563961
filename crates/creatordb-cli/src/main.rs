use clap::{Parser, Subcommand, ValueEnum};

use creatordb_enrich::{
    DiscoveryOptions, EnrichmentRunner, InstagramEnrichment, RunSummary, UnitOutcome,
    YoutubeEnrichment,
};

#[derive(Debug, Parser)]
#[command(name = "creatordb-cli")]
#[command(about = "creatordb command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run an enrichment pipeline once and print its summary.
    Enrich {
        #[arg(value_enum, default_value_t = Pipeline::All)]
        pipeline: Pipeline,
    },
    /// Print every influencer with its social profiles as JSON.
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pipeline {
    Youtube,
    Instagram,
    All,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = creatordb_core::load_app_config()?;
    let pool_config = creatordb_db::PoolConfig::from_app_config(&config);
    let pool = creatordb_db::connect_pool(&config.database_url, pool_config).await?;
    creatordb_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Enrich { pipeline } => {
            let runner = build_runner(&config, pool)?;
            match pipeline {
                Pipeline::Youtube => print_summary(&runner.run_youtube().await?),
                Pipeline::Instagram => print_summary(&runner.run_instagram().await?),
                Pipeline::All => {
                    let (youtube, instagram) = runner.run_all().await?;
                    print_summary(&youtube);
                    print_summary(&instagram);
                }
            }
        }
        Commands::List => {
            let entries = creatordb_db::list_influencers_with_profiles(&pool).await?;
            let items: Vec<serde_json::Value> = entries
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "id": entry.influencer.public_id,
                        "display_name": entry.influencer.display_name,
                        "main_niche": entry.influencer.main_niche,
                        "profiles": entry.profiles.iter().map(|p| serde_json::json!({
                            "platform": p.platform,
                            "channel_id": p.channel_id,
                            "name": p.name,
                            "subscriber_count": p.subscriber_count,
                            "engagement_rate": p.engagement_rate,
                        })).collect::<Vec<_>>(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    Ok(())
}

fn build_runner(
    config: &creatordb_core::AppConfig,
    pool: sqlx::PgPool,
) -> anyhow::Result<EnrichmentRunner> {
    let catalog = if config.niches_path.exists() {
        creatordb_core::load_niches(&config.niches_path)?
    } else {
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
    let instagram = InstagramEnrichment::new(instagram_client, pool);
    Ok(EnrichmentRunner::new(youtube, instagram))
}

fn print_summary(summary: &RunSummary) {
    println!(
        "{}: {} saved, {} skipped, {} failed",
        summary.pipeline, summary.saved, summary.skipped, summary.failed
    );
    for unit in &summary.units {
        match &unit.outcome {
            UnitOutcome::Saved => println!("  saved   {}", unit.unit),
            UnitOutcome::Skipped { reason } => println!("  skipped {} ({reason})", unit.unit),
            UnitOutcome::Failed { error } => println!("  failed  {} ({error})", unit.unit),
        }
    }
}
