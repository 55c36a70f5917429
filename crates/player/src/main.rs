//! PC Character Manager - terminal front-end composition root.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pcm_player::application::services::CharacterService;
use pcm_player::config::{self, AppConfig, API_BASE_URL_VAR};
use pcm_player::infrastructure::{ApiAdapter, TokioSleepProvider};
use pcm_player::ports::outbound::{RawApiPort, SleepProvider};
use pcm_player::ui::routes::{self, character_detail, character_list};
use pcm_player::ui::{Cli, Commands, ListArgs, Router};

#[tokio::main]
async fn main() -> Result<()> {
    config::load_dotenv();

    // Logs go to stderr so they do not interleave with prompts on stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pcm_player=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let api_url = cli.api_url.clone();
    let config = AppConfig::from_lookup(|key| match (&api_url, key) {
        (Some(url), API_BASE_URL_VAR) => Some(url.clone()),
        _ => std::env::var(key).ok(),
    })?;

    tracing::info!(
        app = %config.app.name,
        version = %config.app.version,
        api = %config.api.base_url,
        "Starting PC Character Manager"
    );

    // HTTP
    let raw_api: Arc<dyn RawApiPort> = Arc::new(ApiAdapter::from_config(&config.api));
    let service = CharacterService::new(raw_api);

    // Timers
    let sleeper: Arc<dyn SleepProvider> = Arc::new(TokioSleepProvider);

    match cli.command.unwrap_or_else(|| Commands::List(ListArgs::default())) {
        Commands::Health => routes::check_health(&service).await?,
        Commands::Delete { id, yes } => {
            character_detail::delete(&service, id.parse()?, yes).await?;
        }
        Commands::List(args) if args.once => {
            character_list::print_once(&service, sleeper, args.initial_query()).await;
        }
        command => {
            if let Some(route) = command.route()? {
                Router::new(service, sleeper).run(route).await;
            }
        }
    }

    Ok(())
}
