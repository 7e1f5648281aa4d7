//! Relay controller: create/update/delete reconciliation against the sink.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::{
    domain::{DestMessageId, SourceChannelId, SourceMessage, SourceMessageId},
    formatting::format_source_message,
    mapping::MappingTable,
    messaging::{DestinationSink, MediaItem},
    Result,
};

/// Result of handling a create event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateOutcome {
    /// Bot author or foreign channel; no sink call was made.
    Filtered,
    /// Message relayed; destination ids recorded in the mapping table.
    Relayed { destinations: Vec<DestMessageId> },
}

/// Which edit call ended up applying an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPath {
    Caption,
    Text,
}

/// Result of handling an update event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateOutcome {
    Filtered,
    /// No mapping entry (never relayed, or relayed before the last restart).
    Unmapped,
    Edited { id: DestMessageId, path: EditPath },
}

/// Result of handling a delete event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Filtered,
    Unmapped,
    /// The mapping entry was removed. `deleted < total` means a sink delete
    /// failed mid-loop and the remaining destination messages were left in
    /// place (best-effort semantics; orphans are accepted).
    Removed { deleted: usize, total: usize },
}

/// Orchestrates the three event handlers against the destination sink and
/// the mapping table. One controller per source-channel/destination-chat
/// pair; the table is owned here and lives for the process lifetime.
pub struct RelayController {
    source_channel: SourceChannelId,
    sink: Arc<dyn DestinationSink>,
    // Locked only around table reads/writes, never across sink calls, so a
    // rapid edit-then-delete may still interleave across network awaits.
    mappings: Mutex<MappingTable>,
}

impl RelayController {
    pub fn new(
        source_channel: SourceChannelId,
        sink: Arc<dyn DestinationSink>,
        mappings: MappingTable,
    ) -> Self {
        Self {
            source_channel,
            sink,
            mappings: Mutex::new(mappings),
        }
    }

    fn should_relay(&self, msg: &SourceMessage) -> bool {
        !msg.from_bot && msg.channel_id == self.source_channel
    }

    /// Destination ids currently mapped for a source message, in send order.
    pub async fn mapping_for(&self, source: SourceMessageId) -> Option<Vec<DestMessageId>> {
        self.mappings.lock().await.get(source).map(<[_]>::to_vec)
    }

    /// Relay a newly created source message.
    ///
    /// On sink failure the event is dropped: the error propagates to the
    /// caller for logging and no mapping entry is created.
    pub async fn on_create(&self, msg: &SourceMessage) -> Result<CreateOutcome> {
        if !self.should_relay(msg) {
            return Ok(CreateOutcome::Filtered);
        }

        info!(source_id = msg.id.0, author = %msg.author_name, "new message received");

        let text = format_source_message(msg);
        let images = msg.image_attachments();

        let destinations = match images.as_slice() {
            [] => vec![self.sink.send_text(&text).await?],
            [single] => {
                let item = MediaItem {
                    url: single.url.clone(),
                    caption: text,
                };
                vec![self.sink.send_photo(&item).await?]
            }
            many => {
                // Album caption goes on the first item only.
                let items: Vec<MediaItem> = many
                    .iter()
                    .enumerate()
                    .map(|(i, att)| MediaItem {
                        url: att.url.clone(),
                        caption: if i == 0 { text.clone() } else { String::new() },
                    })
                    .collect();
                self.sink.send_media_group(&items).await?
            }
        };

        self.mappings.lock().await.insert(msg.id, destinations.clone());
        info!(source_id = msg.id.0, count = destinations.len(), "message relayed");

        Ok(CreateOutcome::Relayed { destinations })
    }

    /// Mirror an edit of a source message.
    ///
    /// Only the first destination id is edited: for albums the caption lives
    /// on the first item, and the remaining items carry no text of ours.
    /// The caption edit is attempted first; if the destination message is
    /// not a media item that fails, and a plain text edit on the same id is
    /// tried instead. If both fail the error propagates and the mapping
    /// entry is left unchanged.
    pub async fn on_update(&self, msg: &SourceMessage) -> Result<UpdateOutcome> {
        if !self.should_relay(msg) {
            return Ok(UpdateOutcome::Filtered);
        }

        let first = {
            let table = self.mappings.lock().await;
            table.get(msg.id).and_then(|ids| ids.first().copied())
        };
        let Some(first) = first else {
            info!(source_id = msg.id.0, "no mapping for edited message");
            return Ok(UpdateOutcome::Unmapped);
        };

        info!(source_id = msg.id.0, "message edited");
        let text = format_source_message(msg);

        let path = match self.sink.edit_caption(first, &text).await {
            Ok(()) => EditPath::Caption,
            Err(_) => {
                self.sink.edit_text(first, &text).await?;
                EditPath::Text
            }
        };

        info!(dest_id = first.0, "destination message edited");
        Ok(UpdateOutcome::Edited { id: first, path })
    }

    /// Mirror a deletion of a source message.
    ///
    /// Deletes every mapped destination id in order, aborting the loop on
    /// the first failure. The mapping entry is removed unconditionally, so
    /// a failed delete leaves orphaned destination messages rather than a
    /// stale entry; a repeated delete for the same id is a no-op.
    pub async fn on_delete(
        &self,
        id: SourceMessageId,
        channel: SourceChannelId,
    ) -> Result<DeleteOutcome> {
        if channel != self.source_channel {
            return Ok(DeleteOutcome::Filtered);
        }

        let Some(destinations) = self.mappings.lock().await.remove(id) else {
            info!(source_id = id.0, "no mapping for deleted message");
            return Ok(DeleteOutcome::Unmapped);
        };

        info!(source_id = id.0, "message deleted");

        let total = destinations.len();
        let mut deleted = 0usize;
        for dest in destinations {
            if let Err(e) = self.sink.delete_message(dest).await {
                warn!(dest_id = dest.0, error = %e, "failed to delete destination message");
                break;
            }
            deleted += 1;
        }

        if deleted == total {
            info!(source_id = id.0, count = total, "destination messages deleted");
        }

        Ok(DeleteOutcome::Removed { deleted, total })
    }
}
