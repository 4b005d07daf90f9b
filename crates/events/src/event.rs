use chrono::{DateTime, Utc};

/// A domain event.
///
/// Events are immutable facts about something that already happened to an
/// aggregate, and are only ever appended.
pub trait Event: Clone + core::fmt::Debug {
    /// Stable event name/type identifier (e.g. "catalog.product.added").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
