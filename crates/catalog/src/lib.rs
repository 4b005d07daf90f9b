//! Catalog domain module.
//!
//! Products keyed by name, bundles of products, and the membership relation
//! between them, implemented as deterministic in-memory domain logic (no IO).

pub mod bundle;
pub mod catalog;
pub mod product;

pub use bundle::{Bundle, PairAssignment};
pub use catalog::{
    AddProduct, AssignToBundle, BundleCreated, Catalog, CatalogCommand, CatalogEvent,
    DeleteProduct, PriceUpdated, ProductAdded, ProductBundled, ProductDeleted, UpdatePrice,
};
pub use product::{ParsePriceError, Price, Product};
