#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use inventory_content::ContentFactory;
use inventory_core::{ActorId, InventoryConfig, ItemKey, ItemOracle, NetRole, StackChange};
use inventory_runtime::{Event, ItemRegistry, Session, Subscription};

pub const PLAYER: ActorId = ActorId(1);

pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

/// Registry built from the bundled catalog.
pub fn registry() -> Arc<dyn ItemOracle> {
    let definitions = ContentFactory::new(data_dir())
        .load_items()
        .expect("bundled catalog should load");
    Arc::new(ItemRegistry::from_definitions(definitions).expect("bundled keys are unique"))
}

pub fn session(role: NetRole, items: Arc<dyn ItemOracle>) -> Session {
    session_with(role, items, InventoryConfig::default())
}

pub fn session_with(role: NetRole, items: Arc<dyn ItemOracle>, config: InventoryConfig) -> Session {
    Session::builder()
        .role(role)
        .items(items)
        .config(config)
        .build()
        .expect("session should build")
}

pub fn key(name: &str) -> ItemKey {
    ItemKey::new(name)
}

/// Stack changes buffered on `sub`, in delivery order.
pub fn changes(sub: &mut Subscription) -> Vec<StackChange> {
    sub.drain()
        .into_iter()
        .filter_map(|event| match event {
            Event::StackChanged(change) => Some(change),
            _ => None,
        })
        .collect()
}

pub fn counts(changes: &[StackChange]) -> Vec<(u32, u32)> {
    changes.iter().map(StackChange::counts).collect()
}
