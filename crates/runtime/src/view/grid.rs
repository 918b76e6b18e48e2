use std::sync::Arc;

use inventory_core::{
    ActorId, IconFragment, InstanceId, InventoryList, ItemInstance, ItemKey, ItemOracle,
    StackChange,
};
use thiserror::Error;
use tracing::warn;

use crate::events::{Event, EventBus, Subscription, Topic};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("tile for {0} is already registered")]
    DuplicateTile(InstanceId),

    #[error("no tile registered for {0}")]
    MissingTile(InstanceId),
}

/// Render data for one inventory entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tile {
    pub entry: InstanceId,
    pub definition: ItemKey,
    pub display_name: String,
    pub icon: Option<String>,
    pub count: u32,
}

/// Tiles keyed by item identity, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TileViewModel {
    tiles: Vec<Tile>,
}

impl TileViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tile. A second registration of the same entry is rejected.
    pub fn register(&mut self, tile: Tile) -> Result<(), ViewError> {
        if self.tile(tile.entry).is_some() {
            return Err(ViewError::DuplicateTile(tile.entry));
        }
        self.tiles.push(tile);
        Ok(())
    }

    pub fn set_count(&mut self, entry: InstanceId, count: u32) -> Result<(), ViewError> {
        let tile = self
            .tiles
            .iter_mut()
            .find(|tile| tile.entry == entry)
            .ok_or(ViewError::MissingTile(entry))?;
        tile.count = count;
        Ok(())
    }

    pub fn unregister(&mut self, entry: InstanceId) -> Result<Tile, ViewError> {
        let index = self
            .tiles
            .iter()
            .position(|tile| tile.entry == entry)
            .ok_or(ViewError::MissingTile(entry))?;
        Ok(self.tiles.remove(index))
    }

    pub fn tile(&self, entry: InstanceId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.entry == entry)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Grid of tiles mirroring one actor's inventory.
///
/// Renders any item from its definition's fragments and the reserved
/// quantity tag; it never needs the concrete item type.
pub struct InventoryGridView {
    owner: ActorId,
    items: Arc<dyn ItemOracle>,
    model: TileViewModel,
    subscription: Subscription,
}

impl InventoryGridView {
    /// Subscribes to stack changes and seeds tiles from the current `list`.
    pub fn open(bus: &EventBus, items: Arc<dyn ItemOracle>, list: &InventoryList) -> Self {
        let subscription = bus.subscribe(Topic::STACK_CHANGED);
        let mut view = Self {
            owner: list.owner(),
            items,
            model: TileViewModel::new(),
            subscription,
        };
        for instance in list.instances() {
            let tile = tile_for_instance(instance);
            view.register(tile);
        }
        view
    }

    pub fn owner(&self) -> ActorId {
        self.owner
    }

    pub fn model(&self) -> &TileViewModel {
        &self.model
    }

    pub fn is_open(&self) -> bool {
        !self.subscription.is_cancelled()
    }

    /// Applies every buffered event, returning how many touched this grid.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.subscription.try_next() {
            if let Event::StackChanged(change) = event
                && change.owner == self.owner
            {
                self.apply(&change);
                applied += 1;
            }
        }
        applied
    }

    /// Cancels the subscription. Safe to call more than once.
    pub fn close(&mut self) {
        self.subscription.cancel();
    }

    fn apply(&mut self, change: &StackChange) {
        let result = if change.is_removal() {
            self.model.unregister(change.entry).map(|_| ())
        } else if change.is_creation() {
            let tile = self.tile_for_change(change);
            self.model.register(tile)
        } else {
            self.model.set_count(change.entry, change.new_count)
        };

        if let Err(error) = result {
            warn!(target: "runtime::view", owner = %self.owner, %error, "grid out of sync");
        }
    }

    fn register(&mut self, tile: Tile) {
        if let Err(error) = self.model.register(tile) {
            warn!(target: "runtime::view", owner = %self.owner, %error, "grid out of sync");
        }
    }

    fn tile_for_change(&self, change: &StackChange) -> Tile {
        let definition = self.items.definition(&change.definition);
        Tile {
            entry: change.entry,
            definition: change.definition.clone(),
            display_name: definition
                .as_ref()
                .map_or_else(|| change.definition.to_string(), |def| def.display_name.clone()),
            icon: definition
                .as_ref()
                .and_then(|def| def.fragment::<IconFragment>())
                .map(|icon| icon.brush.clone()),
            count: change.new_count,
        }
    }
}

impl Drop for InventoryGridView {
    fn drop(&mut self) {
        self.close();
    }
}

fn tile_for_instance(instance: &ItemInstance) -> Tile {
    Tile {
        entry: instance.id(),
        definition: instance.key().clone(),
        display_name: instance.definition().display_name.clone(),
        icon: instance
            .fragment::<IconFragment>()
            .map(|icon| icon.brush.clone()),
        count: instance.quantity(),
    }
}
