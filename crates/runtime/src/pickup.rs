//! Pickup system: turns an interaction into items in the collector's inventory.

use inventory_core::{InstanceId, Interaction, PickupPolicy, resolve_collectable_with};
use tracing::{debug, info};

use crate::api::{Result, RuntimeError};
use crate::events::{Event, EventBus, PickupCollected, Topic};
use crate::inventory::InventoryComponent;

/// Result of a pickup attempt that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickupOutcome {
    /// Entries that received the bundle, in template order.
    Collected(Vec<InstanceId>),
    /// The target offers nothing to collect.
    NotCollectable,
}

impl PickupOutcome {
    pub fn is_collected(&self) -> bool {
        matches!(self, Self::Collected(_))
    }
}

#[derive(Clone, Debug)]
pub struct PickupSystem {
    policy: PickupPolicy,
    bus: EventBus,
}

impl PickupSystem {
    pub fn new(policy: PickupPolicy, bus: EventBus) -> Self {
        Self { policy, bus }
    }

    pub fn policy(&self) -> PickupPolicy {
        self.policy
    }

    /// Resolves `interaction.target` and adds its bundle to `inventory`.
    ///
    /// The collector only selects the receiving inventory; resolution never
    /// looks at it. Every template is validated before anything is added.
    pub fn collect(
        &self,
        interaction: Interaction<'_>,
        inventory: &mut InventoryComponent,
    ) -> Result<PickupOutcome> {
        if interaction.collector != inventory.owner() {
            return Err(RuntimeError::CollectorMismatch {
                collector: interaction.collector,
                owner: inventory.owner(),
            });
        }
        inventory.ensure_authority()?;

        let target = interaction.target.target_id();
        let Some(collectable) = resolve_collectable_with(interaction.target, self.policy)? else {
            debug!(target: "runtime::pickup", %target, "target is not collectable");
            return Ok(PickupOutcome::NotCollectable);
        };

        let bundle = collectable.pickup_bundle();
        if bundle.templates.is_empty() {
            debug!(target: "runtime::pickup", %target, "collectable granted an empty bundle");
            return Ok(PickupOutcome::NotCollectable);
        }

        let entries = inventory.add_bundle(&bundle)?;
        info!(
            target: "runtime::pickup",
            collector = %interaction.collector,
            %target,
            templates = bundle.templates.len(),
            "pickup collected"
        );

        self.bus.publish(
            &Topic::PICKUP_COLLECTED,
            Event::PickupCollected(PickupCollected {
                collector: interaction.collector,
                target,
                bundle,
                entries: entries.clone(),
            }),
        );
        Ok(PickupOutcome::Collected(entries))
    }
}
