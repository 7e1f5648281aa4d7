use chrono::{DateTime, Local};

/// Discord message id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceMessageId(pub u64);

/// Discord channel id (snowflake).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceChannelId(pub u64);

/// Telegram chat id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DestChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DestMessageId(pub i32);

/// A single attachment on a source message.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub content_type: Option<String>,
    pub url: String,
}

impl Attachment {
    /// Only `image/*` attachments are relayed; everything else is dropped.
    pub fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }
}

/// A message as received from the source platform, already reduced to the
/// fields the relay needs. Adapter-specific payloads stay in the adapter.
#[derive(Clone, Debug)]
pub struct SourceMessage {
    pub id: SourceMessageId,
    pub channel_id: SourceChannelId,
    /// Display name as shown in the source channel (member nick when set,
    /// otherwise the account name).
    pub author_name: String,
    /// True for bots/webhooks; such messages are never relayed.
    pub from_bot: bool,
    pub created_at: DateTime<Local>,
    pub body: String,
    pub attachments: Vec<Attachment>,
}

impl SourceMessage {
    pub fn image_attachments(&self) -> Vec<&Attachment> {
        self.attachments.iter().filter(|a| a.is_image()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn att(content_type: Option<&str>) -> Attachment {
        Attachment {
            content_type: content_type.map(str::to_string),
            url: "https://cdn.example/file".to_string(),
        }
    }

    #[test]
    fn image_detection_uses_content_type_prefix() {
        assert!(att(Some("image/png")).is_image());
        assert!(att(Some("image/jpeg")).is_image());
        assert!(!att(Some("video/mp4")).is_image());
        assert!(!att(Some("application/pdf")).is_image());
        assert!(!att(None).is_image());
    }
}
