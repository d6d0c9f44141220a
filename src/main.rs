use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use poise::serenity_prelude as serenity;
use tracing::error;

pub struct Data {
    pub config: data::config::BotConfig,
    pub users: Vec<data::users::UserMapping>,
    pub scores: Arc<RwLock<data::scores::ScoreBoard>>,
    pub scores_path: PathBuf,
    pub geoguessr: clients::geoguessr::GeoClient,
    pub run_started: Arc<std::sync::atomic::AtomicBool>,
}

pub type Error = Box<dyn std::error::Error + Send + Sync>;

mod handlers;
pub mod clients;
pub mod data;
pub mod engine;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_challenge_bot=info".into()),
        )
        .init();

    let token = std::env::var("BOT_TOKEN").expect("missing BOT_TOKEN");
    let ncfa = std::env::var("GEOGUESSR_NCFA").unwrap_or_default();
    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            event_handler: |ctx, event, framework, data| {
                Box::pin(async move {
                    handlers::event_handler::handle_event(ctx, event, framework, data).await
                })
            },
            ..Default::default()
        })
        .setup(move |_ctx, _ready, _framework| {
            Box::pin(async move {
                let config_path = PathBuf::from(
                    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.json".to_string()),
                );
                let users_path = PathBuf::from(
                    std::env::var("USERS_PATH").unwrap_or_else(|_| "users.json".to_string()),
                );
                let scores_path = PathBuf::from(
                    std::env::var("SCORES_PATH").unwrap_or_else(|_| "scores.json".to_string()),
                );

                let config = data::config::BotConfig::load(&config_path).await?;
                let users = data::users::load_user_mappings(&users_path).await?;

                // A corrupt scores file aborts here, before any merge can run.
                let scores = data::scores::ScoreBoard::load(&scores_path).await?;

                Ok(Data {
                    config,
                    users,
                    scores: Arc::new(RwLock::new(scores)),
                    scores_path,
                    geoguessr: clients::geoguessr::GeoClient::new(ncfa),
                    run_started: Arc::new(std::sync::atomic::AtomicBool::new(false)),
                })
            })
        })
        .build();

    let client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await;
    match client {
        Ok(mut client) => {
            if let Err(e) = client.start().await {
                error!("client error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            error!("failed to build client: {}", e);
            std::process::exit(1);
        }
    }
}
