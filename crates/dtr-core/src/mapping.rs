//! Source → destination message id mapping.

use std::collections::HashMap;

use crate::domain::{DestMessageId, SourceMessageId};

/// Process-lifetime table from a source message id to the destination
/// message id(s) it produced, in send order.
///
/// An entry exists iff a create event was successfully relayed and not yet
/// deleted. There is no eviction and no durability: edits and deletes for
/// messages relayed before the last restart find no entry and are dropped.
#[derive(Debug, Default)]
pub struct MappingTable {
    inner: HashMap<SourceMessageId, Vec<DestMessageId>>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the destination ids for a relayed message. A later insert
    /// with the same key overwrites the previous entry.
    pub fn insert(&mut self, source: SourceMessageId, destinations: Vec<DestMessageId>) {
        self.inner.insert(source, destinations);
    }

    pub fn get(&self, source: SourceMessageId) -> Option<&[DestMessageId]> {
        self.inner.get(&source).map(Vec::as_slice)
    }

    pub fn remove(&mut self, source: SourceMessageId) -> Option<Vec<DestMessageId>> {
        self.inner.remove(&source)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_preserves_order() {
        let mut table = MappingTable::new();
        table.insert(
            SourceMessageId(1),
            vec![DestMessageId(10), DestMessageId(11), DestMessageId(12)],
        );
        assert_eq!(
            table.get(SourceMessageId(1)),
            Some(&[DestMessageId(10), DestMessageId(11), DestMessageId(12)][..])
        );
    }

    #[test]
    fn reinsert_overwrites() {
        let mut table = MappingTable::new();
        table.insert(SourceMessageId(1), vec![DestMessageId(10)]);
        table.insert(SourceMessageId(1), vec![DestMessageId(20)]);
        assert_eq!(table.get(SourceMessageId(1)), Some(&[DestMessageId(20)][..]));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_clears_entry() {
        let mut table = MappingTable::new();
        table.insert(SourceMessageId(1), vec![DestMessageId(10)]);
        assert_eq!(table.remove(SourceMessageId(1)), Some(vec![DestMessageId(10)]));
        assert_eq!(table.remove(SourceMessageId(1)), None);
        assert!(table.is_empty());
    }
}
