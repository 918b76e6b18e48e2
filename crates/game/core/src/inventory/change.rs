use crate::types::{ActorId, InstanceId, ItemKey};

/// Net effect of one mutation on one entry.
///
/// This is both the change record kept for replication and the payload
/// broadcast to observers. `previous_count == 0` marks a created entry and
/// `new_count == 0` a removed one.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackChange {
    pub owner: ActorId,
    pub entry: InstanceId,
    pub definition: ItemKey,
    pub previous_count: u32,
    pub new_count: u32,
}

impl StackChange {
    pub fn delta(&self) -> i64 {
        i64::from(self.new_count) - i64::from(self.previous_count)
    }

    pub fn is_creation(&self) -> bool {
        self.previous_count == 0
    }

    pub fn is_removal(&self) -> bool {
        self.new_count == 0
    }

    /// `(previous_count, new_count)`, convenient for assertions and logs.
    pub fn counts(&self) -> (u32, u32) {
        (self.previous_count, self.new_count)
    }

    /// Folds consecutive steps on the same entry into one net change.
    ///
    /// Entries keep their first-touch order; each keeps its first
    /// `previous_count` and its last `new_count`.
    pub fn coalesce(changes: impl IntoIterator<Item = StackChange>) -> Vec<StackChange> {
        let mut merged: Vec<StackChange> = Vec::new();
        for change in changes {
            match merged.iter_mut().find(|seen| seen.entry == change.entry) {
                Some(seen) => seen.new_count = change.new_count,
                None => merged.push(change),
            }
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(entry: u64, previous_count: u32, new_count: u32) -> StackChange {
        StackChange {
            owner: ActorId(1),
            entry: InstanceId(entry),
            definition: ItemKey::new("Rock"),
            previous_count,
            new_count,
        }
    }

    #[test]
    fn coalesce_keeps_net_effect_in_first_touch_order() {
        let merged = StackChange::coalesce([step(2, 0, 2), step(5, 0, 1), step(2, 2, 3)]);

        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].entry, merged[0].counts()), (InstanceId(2), (0, 3)));
        assert_eq!((merged[1].entry, merged[1].counts()), (InstanceId(5), (0, 1)));
    }
}
