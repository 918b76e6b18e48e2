use crate::pickup::PickupPolicy;

/// Inventory configuration and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct InventoryConfig {
    /// Buffered events per notification topic before slow subscribers lag.
    pub bus_capacity: usize,

    /// How pickup resolution treats targets with several collectable
    /// sub-components.
    pub pickup_policy: PickupPolicy,
}

impl InventoryConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_BUS_CAPACITY: usize = 64;

    pub fn new() -> Self {
        Self {
            bus_capacity: Self::DEFAULT_BUS_CAPACITY,
            pickup_policy: PickupPolicy::default(),
        }
    }

    pub fn with_bus_capacity(mut self, bus_capacity: usize) -> Self {
        self.bus_capacity = bus_capacity;
        self
    }

    pub fn with_pickup_policy(mut self, pickup_policy: PickupPolicy) -> Self {
        self.pickup_policy = pickup_policy;
        self
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
