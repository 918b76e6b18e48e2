//! Data-driven content definitions and loaders.
//!
//! This crate reads the static inventory content from RON/TOML data files:
//! - Item catalogs (definitions and their fragments, via RON)
//! - Inventory configuration (bus capacity, pickup policy, via TOML)
//!
//! Content is consumed by the runtime item registry and never appears in
//! replicated inventory state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, ItemCatalog, ItemLoader, LoadResult};
