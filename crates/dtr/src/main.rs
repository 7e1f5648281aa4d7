use std::sync::Arc;

use teloxide::Bot;

use dtr_core::{config::Config, mapping::MappingTable, relay::RelayController};
use dtr_telegram::TelegramSink;

#[tokio::main]
async fn main() -> Result<(), dtr_core::Error> {
    dtr_core::logging::init("dtr");

    let cfg = Config::load()?;

    let bot = Bot::new(cfg.telegram_token.clone());
    let sink = Arc::new(TelegramSink::new(bot, cfg.telegram_chat_id));
    tracing::info!("telegram sink initialized");

    let relay = Arc::new(RelayController::new(
        cfg.discord_channel_id,
        sink,
        MappingTable::new(),
    ));

    dtr_discord::run_gateway(&cfg.discord_token, relay, cfg.discord_channel_id)
        .await
        .map_err(|e| dtr_core::Error::Source(format!("discord gateway failed: {e}")))?;

    Ok(())
}
