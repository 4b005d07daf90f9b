//! Interactive session controller for the store catalog.
//!
//! Reads menu commands from a text stream, forwards them to a
//! [`storekeep_catalog::Catalog`], and writes the results back as text or JSON.

pub mod command;
pub mod config;
pub mod error;
pub mod render;
pub mod session;

pub use command::{Command, CommandKind};
pub use config::{Config, OutputFormat};
pub use error::SessionError;
pub use session::{Flow, Session};
