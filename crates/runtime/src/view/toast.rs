use std::collections::VecDeque;
use std::sync::Arc;

use inventory_core::{ActorId, ItemKey, ItemOracle, StackChange};

use crate::events::{Event, EventBus, Subscription, Topic};

/// One short notification line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub definition: ItemKey,
    pub delta: i64,
    pub text: String,
}

/// Bounded feed of gain/loss toasts for one actor.
///
/// Built on stack changes rather than pickups, so a replica shows the same
/// toasts as the authority.
pub struct ToastFeed {
    owner: ActorId,
    items: Arc<dyn ItemOracle>,
    subscription: Subscription,
    toasts: VecDeque<Toast>,
    capacity: usize,
}

impl ToastFeed {
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn open(bus: &EventBus, items: Arc<dyn ItemOracle>, owner: ActorId) -> Self {
        Self::with_capacity(bus, items, owner, Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(
        bus: &EventBus,
        items: Arc<dyn ItemOracle>,
        owner: ActorId,
        capacity: usize,
    ) -> Self {
        Self {
            owner,
            items,
            subscription: bus.subscribe(Topic::STACK_CHANGED),
            toasts: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    /// Converts buffered events into toasts, returning how many were added.
    pub fn pump(&mut self) -> usize {
        let mut added = 0;
        while let Some(event) = self.subscription.try_next() {
            let Event::StackChanged(change) = event else {
                continue;
            };
            if change.owner != self.owner {
                continue;
            }
            if let Some(toast) = self.toast_for(&change) {
                if self.toasts.len() == self.capacity {
                    self.toasts.pop_front();
                }
                self.toasts.push_back(toast);
                added += 1;
            }
        }
        added
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    /// Removes and returns every pending toast, oldest first.
    pub fn take(&mut self) -> Vec<Toast> {
        self.toasts.drain(..).collect()
    }

    pub fn close(&mut self) {
        self.subscription.cancel();
    }

    fn toast_for(&self, change: &StackChange) -> Option<Toast> {
        let delta = change.delta();
        if delta == 0 {
            return None;
        }
        let name = self
            .items
            .definition(&change.definition)
            .map_or_else(|| change.definition.to_string(), |def| def.display_name.clone());
        let text = if delta > 0 {
            format!("+{} {}", delta, name)
        } else {
            format!("-{} {}", -delta, name)
        };
        Some(Toast {
            definition: change.definition.clone(),
            delta,
            text,
        })
    }
}

impl Drop for ToastFeed {
    fn drop(&mut self) {
        self.close();
    }
}
