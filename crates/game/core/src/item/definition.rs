use crate::types::ItemKey;

use super::fragment::{Fragment, FragmentKind, FragmentVariant};

/// Static, data-only description of an item type.
///
/// # Design: Composition over inheritance
///
/// - Common fields (key, display name, stacking) live on the definition
/// - Every capability is a [`Fragment`] in `fragments`, in declaration order
/// - At most one fragment per kind is expected; lookups return the first match
///
/// Definitions are immutable once loaded and shared between all instances
/// through `Arc`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDefinition {
    pub key: ItemKey,
    pub display_name: String,

    /// Whether additional units merge into an existing entry.
    #[cfg_attr(feature = "serde", serde(default = "default_stackable"))]
    pub stackable: bool,

    #[cfg_attr(feature = "serde", serde(default))]
    pub fragments: Vec<Fragment>,
}

#[cfg(feature = "serde")]
fn default_stackable() -> bool {
    true
}

impl ItemDefinition {
    pub fn new(key: impl Into<ItemKey>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
            stackable: true,
            fragments: Vec::new(),
        }
    }

    pub fn with_stackable(mut self, stackable: bool) -> Self {
        self.stackable = stackable;
        self
    }

    pub fn with_fragment(mut self, fragment: impl Into<Fragment>) -> Self {
        self.fragments.push(fragment.into());
        self
    }

    /// Returns the first fragment of `kind`, in declaration order.
    pub fn find_fragment(&self, kind: FragmentKind) -> Option<&Fragment> {
        self.fragments.iter().find(|fragment| fragment.kind() == kind)
    }

    /// Returns the payload of the first fragment of type `T`.
    pub fn fragment<T: FragmentVariant>(&self) -> Option<&T> {
        self.fragments.iter().find_map(T::from_fragment)
    }

    pub fn has_fragment(&self, kind: FragmentKind) -> bool {
        self.find_fragment(kind).is_some()
    }

    pub fn fragment_kinds(&self) -> impl Iterator<Item = FragmentKind> + '_ {
        self.fragments.iter().map(Fragment::kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{IconFragment, SetStatsFragment};

    fn torch() -> ItemDefinition {
        ItemDefinition::new("Torch", "Torch")
            .with_fragment(IconFragment {
                brush: "icons/torch.png".into(),
            })
            .with_fragment(SetStatsFragment::default().with_stat("fuel", 30))
            .with_fragment(IconFragment {
                brush: "icons/torch_lit.png".into(),
            })
    }

    #[test]
    fn find_fragment_returns_first_declared() {
        let def = torch();
        let icon = def.fragment::<IconFragment>().unwrap();
        assert_eq!(icon.brush, "icons/torch.png");

        let by_kind = def.find_fragment(FragmentKind::Icon).unwrap();
        assert_eq!(by_kind, &def.fragments[0]);
    }

    #[test]
    fn missing_capability_is_absent() {
        let def = ItemDefinition::new("Rock", "Rock");
        assert!(def.find_fragment(FragmentKind::Equippable).is_none());
        assert!(!def.has_fragment(FragmentKind::Icon));
        assert!(def.stackable);
    }

    #[test]
    fn lists_kinds_in_declaration_order() {
        let kinds: Vec<_> = torch().fragment_kinds().collect();
        assert_eq!(
            kinds,
            vec![FragmentKind::Icon, FragmentKind::SetStats, FragmentKind::Icon]
        );
    }
}
