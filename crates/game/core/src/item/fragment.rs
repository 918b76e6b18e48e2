//! Capability fragments attached to item definitions.
//!
//! A definition is a list of fragments rather than a type hierarchy: each
//! variant of [`Fragment`] is one independent capability, looked up by
//! [`FragmentKind`] (or by payload type through [`FragmentVariant`]). Adding a
//! capability means adding a variant here; instances and inventory lists never
//! change for it.

use std::collections::BTreeMap;

use strum::{EnumDiscriminants, IntoStaticStr};

use super::instance::ItemInstance;

/// Hook invoked once per fragment when an instance is constructed.
///
/// Hooks run in declaration order and may seed per-instance state (stat tags).
pub trait FragmentHook {
    fn on_instance_created(&self, _instance: &mut ItemInstance) {}
}

/// A capability unit owned by an [`ItemDefinition`](super::ItemDefinition).
#[derive(Clone, Debug, PartialEq, Eq, EnumDiscriminants)]
#[strum_discriminants(name(FragmentKind), derive(Hash, IntoStaticStr))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fragment {
    /// Icon provider for grids and tooltips.
    Icon(IconFragment),

    /// Seeds initial stat tags on every new instance.
    SetStats(SetStatsFragment),

    /// Marks the item as equippable into a named slot.
    Equippable(EquippableFragment),

    /// Presentation used while the item lies in the world as a pickup.
    PickupDisplay(PickupDisplayFragment),
}

impl Fragment {
    pub fn kind(&self) -> FragmentKind {
        FragmentKind::from(self)
    }

    fn hook(&self) -> &dyn FragmentHook {
        match self {
            Fragment::Icon(inner) => inner,
            Fragment::SetStats(inner) => inner,
            Fragment::Equippable(inner) => inner,
            Fragment::PickupDisplay(inner) => inner,
        }
    }
}

impl FragmentHook for Fragment {
    fn on_instance_created(&self, instance: &mut ItemInstance) {
        self.hook().on_instance_created(instance);
    }
}

impl FragmentKind {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Typed access to a fragment payload.
pub trait FragmentVariant: Sized {
    const KIND: FragmentKind;

    fn from_fragment(fragment: &Fragment) -> Option<&Self>;
}

macro_rules! fragment_variant {
    ($payload:ty, $variant:ident) => {
        impl FragmentVariant for $payload {
            const KIND: FragmentKind = FragmentKind::$variant;

            fn from_fragment(fragment: &Fragment) -> Option<&Self> {
                match fragment {
                    Fragment::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$payload> for Fragment {
            fn from(payload: $payload) -> Self {
                Fragment::$variant(payload)
            }
        }
    };
}

fragment_variant!(IconFragment, Icon);
fragment_variant!(SetStatsFragment, SetStats);
fragment_variant!(EquippableFragment, Equippable);
fragment_variant!(PickupDisplayFragment, PickupDisplay);

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IconFragment {
    pub brush: String,
}

impl FragmentHook for IconFragment {}

/// Initial counters copied into each new instance's stat tags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetStatsFragment {
    pub initial: BTreeMap<String, i64>,
}

impl SetStatsFragment {
    pub fn with_stat(mut self, tag: impl Into<String>, value: i64) -> Self {
        self.initial.insert(tag.into(), value);
        self
    }
}

impl FragmentHook for SetStatsFragment {
    fn on_instance_created(&self, instance: &mut ItemInstance) {
        for (tag, value) in &self.initial {
            instance.stat_tags_mut().add_stack(tag.as_str(), *value);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquippableFragment {
    pub slot: String,
}

impl FragmentHook for EquippableFragment {}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickupDisplayFragment {
    pub display_name: String,
    pub mesh: String,
}

impl FragmentHook for PickupDisplayFragment {}
