use serde::{Deserialize, Serialize};
use uuid::Uuid;

use storekeep_core::CatalogId;

/// Envelope for an applied event, carrying stream metadata.
///
/// `sequence_number` starts at 1 and increases by one per event in a catalog's
/// journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    catalog_id: CatalogId,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, catalog_id: CatalogId, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            catalog_id,
            sequence_number,
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn catalog_id(&self) -> CatalogId {
        self.catalog_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
