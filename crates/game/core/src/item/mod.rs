//! Item model: static definitions composed from fragments, and the runtime
//! instances created from them.
//!
//! Definitions are loaded once and shared read-only through `Arc`. Instances
//! are owned by inventory entries and carry mutable per-instance stat tags.

mod definition;
mod fragment;
mod instance;
mod oracle;
mod stat_tags;

pub use definition::ItemDefinition;
pub use fragment::{
    EquippableFragment, Fragment, FragmentHook, FragmentKind, FragmentVariant, IconFragment,
    PickupDisplayFragment, SetStatsFragment,
};
pub use instance::ItemInstance;
pub use oracle::ItemOracle;
pub use stat_tags::StatTags;
