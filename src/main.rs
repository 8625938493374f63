//! # Conversational Games Bot Main Entry Point
//!
//! Initializes logging, loads configuration and prompt lists, starts the poll
//! sweeper and health server, and runs the Telegram bot.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use conversational_games_bot::bot::handlers::BotHandler;
use conversational_games_bot::bot::BotState;
use conversational_games_bot::config::Config;
use conversational_games_bot::content::PromptDeck;
use conversational_games_bot::polls::{Markup, PollFormat, PollManager, PollStore};
use conversational_games_bot::services::health::HealthService;
use conversational_games_bot::services::questions::{EitherIoSource, PressTheButtonSource};
use conversational_games_bot::services::sweeper::PollSweeper;
use conversational_games_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "conversational_games_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Conversational Games Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Data dir: {}, HTTP Port: {}, Poll TTL: {}h, Poll capacity: {}",
        config.data_dir.display(),
        config.http_port,
        config.poll_ttl.as_secs() / 3600,
        config.poll_capacity
    );

    info!("Loading prompt lists...");
    let deck = Arc::new(PromptDeck::load(&config.data_dir)?);

    let store = Arc::new(PollStore::new(config.poll_capacity, config.poll_ttl));
    let polls = PollManager::new(store, PollFormat::default(), Markup::MarkdownV2);

    let state = BotState {
        polls: polls.clone(),
        deck: deck.clone(),
        would_you_rather: Arc::new(EitherIoSource::new(config.http_timeout)?),
        press_the_button: Arc::new(PressTheButtonSource::new(config.http_timeout)?),
        edit_timeout: config.http_timeout,
    };

    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let handler = BotHandler::new(state);

    let mut sweeper = match PollSweeper::new(polls.clone()).await {
        Ok(sweeper) => sweeper,
        Err(e) => {
            tracing::error!("Failed to create poll sweeper: {}", e);
            return Err(anyhow::anyhow!("Failed to create poll sweeper: {}", e));
        }
    };

    if let Err(e) = sweeper.start().await {
        tracing::error!("Failed to start poll sweeper: {}", e);
    }

    let health_service = HealthService::new(polls, deck);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and health server concurrently
    let bot_task = tokio::spawn(async move {
        log_system_event("Bot is ready", Some("started polling"));
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    // Wait for either task to complete (which would indicate shutdown)
    tokio::select! {
        result1 = bot_task => {
            if let Err(e) = result1 {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result2 = health_task => {
            if let Err(e) = result2 {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    if let Err(e) = sweeper.stop().await {
        tracing::warn!("Error stopping poll sweeper: {}", e);
    }

    log_system_event("Application stopped", None);
    Ok(())
}
