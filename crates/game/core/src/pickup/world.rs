use crate::types::ActorId;

use super::{AttachedComponent, Collectable, InteractionTarget, PickupBundle};

/// Minimal world actor usable as an interaction target.
///
/// It may carry a collectable capability of its own and any number of
/// attached components.
pub struct WorldActor {
    id: ActorId,
    name: String,
    direct: Option<PickupBundle>,
    components: Vec<Box<dyn AttachedComponent + Send + Sync>>,
}

impl WorldActor {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            direct: None,
            components: Vec::new(),
        }
    }

    pub fn with_collectable(mut self, bundle: PickupBundle) -> Self {
        self.direct = Some(bundle);
        self
    }

    pub fn with_component(
        mut self,
        component: impl AttachedComponent + Send + Sync + 'static,
    ) -> Self {
        self.components.push(Box::new(component));
        self
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for WorldActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorldActor")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("direct", &self.direct)
            .field(
                "components",
                &self.components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl InteractionTarget for WorldActor {
    fn target_id(&self) -> ActorId {
        self.id
    }

    fn as_collectable(&self) -> Option<&dyn Collectable> {
        self.direct.as_ref().map(|bundle| bundle as &dyn Collectable)
    }

    fn components(&self) -> Box<dyn Iterator<Item = &dyn AttachedComponent> + '_> {
        Box::new(
            self.components
                .iter()
                .map(|component| component.as_ref() as &dyn AttachedComponent),
        )
    }
}

/// Sub-component granting a fixed bundle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectableComponent {
    name: String,
    bundle: PickupBundle,
}

impl CollectableComponent {
    pub fn new(name: impl Into<String>, bundle: PickupBundle) -> Self {
        Self {
            name: name.into(),
            bundle,
        }
    }
}

impl AttachedComponent for CollectableComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn as_collectable(&self) -> Option<&dyn Collectable> {
        Some(&self.bundle)
    }
}

/// Sub-component with no pickup capability (meshes, colliders, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecorComponent {
    name: String,
}

impl DecorComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AttachedComponent for DecorComponent {
    fn name(&self) -> &str {
        &self.name
    }
}
