use std::collections::BTreeMap;

/// Named integer counters attached to an item instance.
///
/// Tags hold positive values only; a counter that drops to zero (or below)
/// is removed. Iteration order is the key order, so snapshots are stable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct StatTags {
    counters: BTreeMap<String, i64>,
}

impl StatTags {
    /// Reserved tag mirroring the owning entry's stack count.
    pub const QUANTITY: &'static str = "item.quantity";

    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `tag`, zero when absent.
    pub fn get(&self, tag: &str) -> i64 {
        self.counters.get(tag).copied().unwrap_or(0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.counters.contains_key(tag)
    }

    /// Overwrites `tag`. Non-positive values remove the tag.
    pub fn set(&mut self, tag: impl Into<String>, value: i64) {
        let tag = tag.into();
        if value > 0 {
            self.counters.insert(tag, value);
        } else {
            self.counters.remove(&tag);
        }
    }

    /// Adds `amount` to `tag` and returns the new value.
    pub fn add_stack(&mut self, tag: impl Into<String>, amount: i64) -> i64 {
        let tag = tag.into();
        let value = self.get(&tag).saturating_add(amount);
        self.set(tag, value);
        value.max(0)
    }

    /// Removes up to `amount` from `tag` and returns what is left.
    pub fn remove_stack(&mut self, tag: &str, amount: i64) -> i64 {
        self.add_stack(tag, amount.saturating_neg())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.counters.iter().map(|(tag, value)| (tag.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for StatTags {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (tag, value) in iter {
            tags.set(tag, value);
        }
        tags
    }
}
