//! Discord adapter (serenity).
//!
//! Subscribes to the gateway for one guild channel and feeds
//! create/update/delete events into the `dtr-core` relay controller.

use std::sync::Arc;

use serenity::all::{
    ChannelId, Client, Context, EventHandler, GatewayIntents, GuildId, Message, MessageId,
    MessageUpdateEvent, Ready,
};
use serenity::async_trait;

use chrono::{DateTime, Local};
use tracing::{error, info, warn};

use dtr_core::{
    domain::{Attachment, SourceChannelId, SourceMessage, SourceMessageId},
    relay::RelayController,
};

/// Gateway event handler that forwards channel traffic to the relay.
pub struct RelayHandler {
    relay: Arc<RelayController>,
    source_channel: SourceChannelId,
}

impl RelayHandler {
    pub fn new(relay: Arc<RelayController>, source_channel: SourceChannelId) -> Self {
        Self {
            relay,
            source_channel,
        }
    }

    /// Materialize the full message for a partial update payload.
    async fn fetch_updated(
        &self,
        ctx: &Context,
        new: Option<Message>,
        event: &MessageUpdateEvent,
    ) -> Option<Message> {
        if let Some(msg) = new {
            return Some(msg);
        }
        match ctx.http.get_message(event.channel_id, event.id).await {
            Ok(msg) => Some(msg),
            Err(e) => {
                warn!(source_id = event.id.get(), error = %e, "failed to fetch edited message");
                None
            }
        }
    }
}

#[async_trait]
impl EventHandler for RelayHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, "discord gateway connected");
        info!(channel = self.source_channel.0, "listening on source channel");
    }

    async fn message(&self, _ctx: Context, msg: Message) {
        let msg = source_message_from(&msg);
        if let Err(e) = self.relay.on_create(&msg).await {
            error!(source_id = msg.id.0, error = %e, "failed to relay new message");
        }
    }

    async fn message_update(
        &self,
        ctx: Context,
        _old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        let Some(full) = self.fetch_updated(&ctx, new, &event).await else {
            return;
        };

        let msg = source_message_from(&full);
        if let Err(e) = self.relay.on_update(&msg).await {
            error!(source_id = msg.id.0, error = %e, "failed to relay edit");
        }
    }

    async fn message_delete(
        &self,
        _ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        _guild_id: Option<GuildId>,
    ) {
        let id = SourceMessageId(deleted_message_id.get());
        let channel = SourceChannelId(channel_id.get());
        if let Err(e) = self.relay.on_delete(id, channel).await {
            error!(source_id = id.0, error = %e, "failed to relay delete");
        }
    }
}

/// Reduce a gateway message to the fields the relay core needs.
fn source_message_from(msg: &Message) -> SourceMessage {
    let author_name = msg
        .member
        .as_ref()
        .and_then(|m| m.nick.clone())
        .or_else(|| msg.author.global_name.clone())
        .unwrap_or_else(|| msg.author.name.clone());

    let created_at = DateTime::from_timestamp(msg.timestamp.unix_timestamp(), 0)
        .map(|dt| dt.with_timezone(&Local))
        .unwrap_or_else(Local::now);

    let attachments = msg
        .attachments
        .iter()
        .map(|att| Attachment {
            content_type: att.content_type.clone(),
            url: att.url.clone(),
        })
        .collect();

    SourceMessage {
        id: SourceMessageId(msg.id.get()),
        channel_id: SourceChannelId(msg.channel_id.get()),
        author_name,
        from_bot: msg.author.bot,
        created_at,
        body: msg.content.clone(),
        attachments,
    }
}

/// Connect to the gateway and block until the client stops.
pub async fn run_gateway(token: &str, relay: Arc<RelayController>, source_channel: SourceChannelId) -> anyhow::Result<()> {
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(token, intents)
        .event_handler(RelayHandler::new(relay, source_channel))
        .await?;

    client.start().await?;
    Ok(())
}
