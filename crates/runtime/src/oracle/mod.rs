//! Runtime wrappers around static content.
//!
//! The registry exposes the `inventory-core` [`ItemOracle`](inventory_core::ItemOracle)
//! trait over definitions loaded once at startup. The data is immutable at
//! runtime; dynamic state lives in inventory components.
mod items;

pub use items::ItemRegistry;
