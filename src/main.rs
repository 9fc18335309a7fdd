use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cityguide::bot::{self, AppState};
use cityguide::catalog::Catalog;
use cityguide::{localization, navigation};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,cityguide=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting city-guide Telegram bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let bot_token = env::var("TELEGRAM_BOT_TOKEN")
        .context("TELEGRAM_BOT_TOKEN must be set (add it to .env or the environment)")?;

    // Startup configuration is fatal before the event loop begins.
    localization::init_localization().context("Failed to load locale resources")?;

    let catalog = Catalog::embedded().context("Failed to load the city catalog")?;
    info!(cities = catalog.len(), "Catalog loaded");

    let router = navigation::build_router();
    info!(rules = router.rule_count(), "Router built");

    let state = Arc::new(AppState { catalog, router });
    let bot = Bot::new(bot_token);

    // Register the command menu once. The menu is cosmetic, so a failure is
    // logged rather than fatal.
    let commands: Vec<BotCommand> = navigation::command_menu()
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect();
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!(error = %e, "Failed to register the command menu");
    }

    info!("Bot initialized, starting dispatcher");

    // Updates from the same chat are processed sequentially by the default
    // distribution; distinct chats run concurrently over the shared state.
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(bot::message_handler))
        .branch(Update::filter_callback_query().endpoint(bot::callback_handler));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update kind");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
