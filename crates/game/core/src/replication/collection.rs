use std::collections::HashMap;
use std::hash::Hash;

/// Generic collection delta capturing additions, removals, and updates.
#[derive(Debug)]
pub(super) struct CollectionDelta<'a, Id, T, Patch> {
    pub added: Vec<&'a T>,
    pub removed: Vec<(Id, &'a T)>,
    pub updated: Vec<Patch>,
}

/// Compares two keyed collections.
///
/// `added` and `updated` follow the order of `after`; `removed` follows the
/// order of `before`, so callers can emit changes deterministically.
pub(super) fn diff_collection<'a, Id, T, Patch, FId, FPatch>(
    before: &'a [T],
    after: &'a [T],
    id_fn: FId,
    mut patch_fn: FPatch,
) -> CollectionDelta<'a, Id, T, Patch>
where
    Id: Eq + Hash + Copy,
    FId: Fn(&T) -> Id,
    FPatch: FnMut(&'a T, &'a T) -> Option<Patch>,
{
    let mut before_map: HashMap<Id, &'a T> =
        before.iter().map(|item| (id_fn(item), item)).collect();
    let mut delta = CollectionDelta {
        added: Vec::new(),
        removed: Vec::new(),
        updated: Vec::new(),
    };

    for entry in after {
        match before_map.remove(&id_fn(entry)) {
            Some(prev) => {
                if let Some(patch) = patch_fn(prev, entry) {
                    delta.updated.push(patch);
                }
            }
            None => delta.added.push(entry),
        }
    }

    delta.removed.extend(before.iter().filter_map(|item| {
        let id = id_fn(item);
        before_map.contains_key(&id).then_some((id, item))
    }));
    delta
}
