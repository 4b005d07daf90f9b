//! `storekeep-core` — domain building blocks shared by the catalog and its callers.
//!
//! This crate contains **pure domain** primitives (no IO, no terminal, no logging setup).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CatalogId, SessionId};
