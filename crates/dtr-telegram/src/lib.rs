//! Telegram adapter (teloxide).
//!
//! Implements the `dtr-core` DestinationSink over the Telegram Bot API.
//! Failed calls are not retried; the relay core drops the event.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InputFile, InputMedia, InputMediaPhoto, ParseMode},
};

use dtr_core::{
    domain::{DestChatId, DestMessageId},
    errors::Error,
    messaging::{DestinationSink, MediaItem},
    Result,
};

#[derive(Clone)]
pub struct TelegramSink {
    bot: Bot,
    chat_id: DestChatId,
}

impl TelegramSink {
    pub fn new(bot: Bot, chat_id: DestChatId) -> Self {
        Self { bot, chat_id }
    }

    fn tg_chat(&self) -> teloxide::types::ChatId {
        teloxide::types::ChatId(self.chat_id.0)
    }

    fn tg_msg_id(id: DestMessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::Sink(format!("telegram error: {e}"))
    }

    fn input_file(url: &str) -> Result<InputFile> {
        let parsed = url::Url::parse(url)
            .map_err(|e| Error::Sink(format!("bad attachment url {url}: {e}")))?;
        Ok(InputFile::url(parsed))
    }
}

#[async_trait]
impl DestinationSink for TelegramSink {
    async fn send_text(&self, text: &str) -> Result<DestMessageId> {
        let msg = self
            .bot
            .send_message(self.tg_chat(), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(Self::map_err)?;
        Ok(DestMessageId(msg.id.0))
    }

    async fn send_photo(&self, photo: &MediaItem) -> Result<DestMessageId> {
        let msg = self
            .bot
            .send_photo(self.tg_chat(), Self::input_file(&photo.url)?)
            .caption(photo.caption.clone())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(Self::map_err)?;
        Ok(DestMessageId(msg.id.0))
    }

    async fn send_media_group(&self, items: &[MediaItem]) -> Result<Vec<DestMessageId>> {
        let mut media = Vec::with_capacity(items.len());
        for item in items {
            let mut photo = InputMediaPhoto::new(Self::input_file(&item.url)?);
            if !item.caption.is_empty() {
                photo = photo
                    .caption(item.caption.clone())
                    .parse_mode(ParseMode::Markdown);
            }
            media.push(InputMedia::Photo(photo));
        }

        let sent = self
            .bot
            .send_media_group(self.tg_chat(), media)
            .await
            .map_err(Self::map_err)?;
        Ok(sent.iter().map(|m| DestMessageId(m.id.0)).collect())
    }

    async fn edit_caption(&self, id: DestMessageId, caption: &str) -> Result<()> {
        self.bot
            .edit_message_caption(self.tg_chat(), Self::tg_msg_id(id))
            .caption(caption.to_string())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn edit_text(&self, id: DestMessageId, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(self.tg_chat(), Self::tg_msg_id(id), text.to_string())
            .parse_mode(ParseMode::Markdown)
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn delete_message(&self, id: DestMessageId) -> Result<()> {
        self.bot
            .delete_message(self.tg_chat(), Self::tg_msg_id(id))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}
