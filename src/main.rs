use anyhow::Result;
use std::env;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;

use sights::assets::AssetStore;
use sights::bot::{self, BotDeps};
use sights::catalog::CatalogStore;
use sights::config::BotConfig;
use sights::dialogue::SightDialogueState;
use sights::session::Sessions;
use sights::translator::GoogleTranslator;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    info!("Starting Sights Telegram Bot");

    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Get bot token from environment
    let bot_token = env::var("TELEGRAM_BOT_TOKEN").expect("TELEGRAM_BOT_TOKEN must be set");

    let config = BotConfig::from_env();
    info!(
        sights_file = %config.sights_file.display(),
        images_dir = %config.images_dir.display(),
        allowlisted = config.allowlist.len(),
        "Configuration loaded"
    );

    let assets = AssetStore::new(&config.images_dir);
    assets.ensure_dir()?;

    let deps = std::sync::Arc::new(BotDeps {
        store: CatalogStore::new(&config.sights_file),
        assets,
        translator: Box::new(GoogleTranslator::new()),
        sessions: Sessions::new(),
        config,
    });

    // Initialize the bot
    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<SightDialogueState>, SightDialogueState>()
                .endpoint(bot::message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<SightDialogueState>, SightDialogueState>()
                .endpoint(bot::callback_handler),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<SightDialogueState>::new(),
            deps
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
