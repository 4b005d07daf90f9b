//! Entity trait: identity that survives state changes.

/// Entity marker + minimal interface.
///
/// Catalog entities are keyed by their human-facing name, so `Id` is usually
/// `String`.
pub trait Entity {
    /// Identifier type.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
