//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is recoverable: it is returned to the caller before any state
/// is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A live product already uses this name.
    #[error("a product named `{0}` already exists")]
    DuplicateName(String),

    /// No live product has this name.
    #[error("product `{0}` not found")]
    ProductNotFound(String),

    /// No bundle with this name was ever created.
    #[error("bundle `{0}` not found")]
    BundleNotFound(String),

    /// A value failed validation (e.g. empty name, negative price).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName(name.into())
    }

    pub fn product_not_found(name: impl Into<String>) -> Self {
        Self::ProductNotFound(name.into())
    }

    pub fn bundle_not_found(name: impl Into<String>) -> Self {
        Self::BundleNotFound(name.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for both the product and the bundle flavour of "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ProductNotFound(_) | Self::BundleNotFound(_))
    }

    /// Stable machine-readable kind, used for structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DuplicateName(_) => "duplicate_name",
            Self::ProductNotFound(_) => "product_not_found",
            Self::BundleNotFound(_) => "bundle_not_found",
            Self::Validation(_) => "validation",
        }
    }
}
