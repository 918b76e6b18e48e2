//! Pickup resolution: finding what can be collected from a world target.
//!
//! Resolution works on the explicit interaction target carried by the
//! triggering [`Interaction`], never on the collector. The collector only
//! selects which inventory receives the items.

mod world;

pub use world::{CollectableComponent, DecorComponent, WorldActor};

use tracing::warn;

use crate::error::{DomainError, ErrorSeverity};
use crate::types::{ActorId, ItemKey};

/// Definition and quantity granted by a pickup.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupTemplate {
    pub definition: ItemKey,
    pub count: u32,
}

impl PickupTemplate {
    pub fn new(definition: impl Into<ItemKey>, count: u32) -> Self {
        Self {
            definition: definition.into(),
            count,
        }
    }
}

/// Everything a collectable hands over when picked up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupBundle {
    pub templates: Vec<PickupTemplate>,
}

impl PickupBundle {
    pub fn single(definition: impl Into<ItemKey>, count: u32) -> Self {
        Self {
            templates: vec![PickupTemplate::new(definition, count)],
        }
    }

    pub fn with(mut self, definition: impl Into<ItemKey>, count: u32) -> Self {
        self.templates.push(PickupTemplate::new(definition, count));
        self
    }
}

/// Capability of granting items when collected.
pub trait Collectable {
    fn pickup_bundle(&self) -> PickupBundle;
}

impl Collectable for PickupBundle {
    fn pickup_bundle(&self) -> PickupBundle {
        self.clone()
    }
}

/// A sub-component attached to a world actor.
pub trait AttachedComponent {
    fn name(&self) -> &str;

    fn as_collectable(&self) -> Option<&dyn Collectable> {
        None
    }
}

/// Anything an interaction can be aimed at.
pub trait InteractionTarget {
    fn target_id(&self) -> ActorId;

    /// The target's own collectable capability, if it has one.
    fn as_collectable(&self) -> Option<&dyn Collectable> {
        None
    }

    fn components(&self) -> Box<dyn Iterator<Item = &dyn AttachedComponent> + '_>;
}

/// Payload delivered by the interaction system: who collects, and what.
#[derive(Clone, Copy)]
pub struct Interaction<'a> {
    pub collector: ActorId,
    pub target: &'a dyn InteractionTarget,
}

impl<'a> Interaction<'a> {
    pub fn new(collector: ActorId, target: &'a dyn InteractionTarget) -> Self {
        Self { collector, target }
    }
}

/// Handling of targets exposing several collectable sub-components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PickupPolicy {
    /// Log a configuration anomaly and use the first one.
    #[default]
    Degrade,
    /// Reject the pickup.
    Strict,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PickupError {
    #[error("{target} exposes {count} collectable components; at most one is supported")]
    ConfigurationAnomaly { target: ActorId, count: usize },
}

impl DomainError for PickupError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ConfigurationAnomaly { .. } => "pickup.configuration_anomaly",
        }
    }
}

/// Resolves the collectable capability of `target`, degrading on anomalies.
///
/// `None` means "not collectable" and is not an error.
pub fn resolve_collectable(target: &dyn InteractionTarget) -> Option<&dyn Collectable> {
    match resolve_collectable_with(target, PickupPolicy::Degrade) {
        Ok(found) => found,
        Err(_) => None,
    }
}

/// Resolves the collectable capability of `target`.
///
/// The target's own capability wins over sub-components. Among
/// sub-components exactly one is expected; with several, `policy` decides
/// between using the first (with a warning) and failing.
pub fn resolve_collectable_with(
    target: &dyn InteractionTarget,
    policy: PickupPolicy,
) -> Result<Option<&dyn Collectable>, PickupError> {
    if let Some(direct) = target.as_collectable() {
        return Ok(Some(direct));
    }

    let mut found = target.components().filter_map(|component| {
        component
            .as_collectable()
            .map(|collectable| (component.name(), collectable))
    });
    let Some((chosen, collectable)) = found.next() else {
        return Ok(None);
    };

    let extra = found.count();
    if extra > 0 {
        let count = extra + 1;
        match policy {
            PickupPolicy::Strict => {
                return Err(PickupError::ConfigurationAnomaly {
                    target: target.target_id(),
                    count,
                });
            }
            PickupPolicy::Degrade => warn!(
                target: "inventory::pickup",
                actor = %target.target_id(),
                collectables = count,
                chosen,
                "multiple collectable components on target, using the first"
            ),
        }
    }

    Ok(Some(collectable))
}
