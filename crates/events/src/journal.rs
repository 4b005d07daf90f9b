//! In-memory, append-only event journal.

use uuid::Uuid;

use storekeep_core::CatalogId;

use crate::envelope::EventEnvelope;
use crate::event::Event;

/// Append-only record of the events applied to one catalog.
///
/// - No IO, lives only as long as its owner
/// - Sequence numbers are assigned here, gap-free, starting at 1
#[derive(Debug, Clone)]
pub struct Journal<E> {
    catalog_id: CatalogId,
    entries: Vec<EventEnvelope<E>>,
}

impl<E: Event> Journal<E> {
    pub fn new(catalog_id: CatalogId) -> Self {
        Self {
            catalog_id,
            entries: Vec::new(),
        }
    }

    /// Wrap `event` in an envelope and append it. Returns the assigned sequence number.
    pub fn append(&mut self, event: E) -> u64 {
        let sequence_number = self.last_sequence() + 1;
        self.entries.push(EventEnvelope::new(
            Uuid::now_v7(),
            self.catalog_id,
            sequence_number,
            event,
        ));
        sequence_number
    }

    /// Sequence number of the most recent entry (0 when empty).
    pub fn last_sequence(&self) -> u64 {
        self.entries
            .last()
            .map(EventEnvelope::sequence_number)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventEnvelope<E>> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Noted {
        note: String,
        occurred_at: DateTime<Utc>,
    }

    impl Event for Noted {
        fn event_type(&self) -> &'static str {
            "test.noted"
        }

        fn version(&self) -> u32 {
            1
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.occurred_at
        }
    }

    fn noted(note: &str) -> Noted {
        Noted {
            note: note.to_string(),
            occurred_at: Utc::now(),
        }
    }

    #[test]
    fn empty_journal_has_sequence_zero() {
        let journal: Journal<Noted> = Journal::new(CatalogId::new());
        assert!(journal.is_empty());
        assert_eq!(journal.last_sequence(), 0);
    }

    #[test]
    fn append_assigns_gap_free_sequence_numbers() {
        let catalog_id = CatalogId::new();
        let mut journal = Journal::new(catalog_id);

        assert_eq!(journal.append(noted("a")), 1);
        assert_eq!(journal.append(noted("b")), 2);
        assert_eq!(journal.append(noted("c")), 3);
        assert_eq!(journal.len(), 3);

        let seqs: Vec<u64> = journal.iter().map(|e| e.sequence_number()).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
        assert!(journal.iter().all(|e| e.catalog_id() == catalog_id));

        let notes: Vec<&str> = journal.iter().map(|e| e.payload().note.as_str()).collect();
        assert_eq!(notes, vec!["a", "b", "c"]);
    }

    #[test]
    fn envelopes_get_distinct_event_ids() {
        let mut journal = Journal::new(CatalogId::new());
        journal.append(noted("a"));
        journal.append(noted("b"));

        let ids: Vec<Uuid> = journal.iter().map(|e| e.event_id()).collect();
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn envelope_serializes_payload_inline() {
        let mut journal = Journal::new(CatalogId::new());
        journal.append(noted("hello"));

        let envelope = journal.iter().next().unwrap();
        let json = serde_json::to_value(envelope).unwrap();
        assert_eq!(json["sequence_number"], 1);
        assert_eq!(json["payload"]["note"], "hello");
        assert_eq!(envelope.clone().into_payload().note, "hello");
    }
}
