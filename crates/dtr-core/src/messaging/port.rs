use async_trait::async_trait;

use crate::{domain::DestMessageId, Result};

/// One photo of an outgoing single-photo or album send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    /// Empty string means "no caption" (only the first album item carries one).
    pub caption: String,
}

/// Destination sink port.
///
/// Telegram is the first implementation; the shape is narrow enough that
/// another chat platform with send/edit/delete semantics can fit behind it.
/// The destination chat is fixed at construction time, so calls only carry
/// message-level data.
#[async_trait]
pub trait DestinationSink: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<DestMessageId>;

    async fn send_photo(&self, photo: &MediaItem) -> Result<DestMessageId>;

    /// Send a grouped album. Returns one id per item, in item order.
    async fn send_media_group(&self, items: &[MediaItem]) -> Result<Vec<DestMessageId>>;

    async fn edit_caption(&self, id: DestMessageId, caption: &str) -> Result<()>;

    async fn edit_text(&self, id: DestMessageId, text: &str) -> Result<()>;

    async fn delete_message(&self, id: DestMessageId) -> Result<()>;
}
