mod common;

use common::{PLAYER, changes, counts, key, registry, session};
use inventory_core::{InventoryError, NetRole};
use inventory_runtime::{RuntimeError, Topic};

#[test]
fn rock_added_twice_merges_and_notifies_twice() {
    let mut host = session(NetRole::Authority, registry());
    let mut sub = host.bus().subscribe(Topic::STACK_CHANGED);
    let inventory = host.spawn_inventory(PLAYER).unwrap();

    let first = inventory.add_entry(&key("Rock"), 1).unwrap();
    let second = inventory.add_entry(&key("Rock"), 2).unwrap();

    assert_eq!(first, second);
    assert_eq!(inventory.list().len(), 1);
    assert_eq!(inventory.list().entries()[0].stack_count(), 3);

    let received = changes(&mut sub);
    assert_eq!(counts(&received), vec![(0, 1), (1, 3)]);
    assert!(received.iter().all(|change| change.entry == first));
}

#[test]
fn consuming_more_than_held_fails_and_changes_nothing() {
    let mut host = session(NetRole::Authority, registry());
    let inventory = host.spawn_inventory(PLAYER).unwrap();
    inventory.add_entry(&key("Rock"), 3).unwrap();
    let before = inventory.list().clone();
    let mut sub = host.bus().subscribe(Topic::STACK_CHANGED);

    let inventory = host.inventory_mut(PLAYER).unwrap();
    let err = inventory.consume_by_definition(&key("Rock"), 5).unwrap_err();

    assert!(matches!(
        err,
        RuntimeError::Inventory(InventoryError::InsufficientQuantity {
            requested: 5,
            available: 3,
            ..
        })
    ));
    assert_eq!(inventory.list(), &before);
    assert_eq!(inventory.list().entries()[0].stack_count(), 3);
    assert!(sub.try_next().is_none());
}

#[test]
fn consume_emits_one_event_per_affected_entry() {
    let mut host = session(NetRole::Authority, registry());
    let inventory = host.spawn_inventory(PLAYER).unwrap();
    let first = inventory.add_entry(&key("IronSword"), 1).unwrap();
    let second = inventory.add_entry(&key("IronSword"), 1).unwrap();
    let third = inventory.add_entry(&key("IronSword"), 1).unwrap();
    let mut sub = host.bus().subscribe(Topic::STACK_CHANGED);

    let inventory = host.inventory_mut(PLAYER).unwrap();
    inventory.consume_by_definition(&key("IronSword"), 2).unwrap();

    let received = changes(&mut sub);
    assert_eq!(
        received.iter().map(|c| (c.entry, c.counts())).collect::<Vec<_>>(),
        vec![(first, (1, 0)), (second, (1, 0))]
    );
    assert_eq!(inventory.list().entries()[0].id(), third);
}

#[test]
fn every_mutation_notifies_with_matching_counts() {
    let mut host = session(NetRole::Authority, registry());
    let mut sub = host.bus().subscribe(Topic::STACK_CHANGED);
    let inventory = host.spawn_inventory(PLAYER).unwrap();

    let coin = inventory.add_entry(&key("Coin"), 10).unwrap();
    inventory.add_entry(&key("Coin"), 5).unwrap();
    inventory.remove_entry(coin, 4).unwrap();
    inventory.remove_entry(coin, 11).unwrap();

    let received = changes(&mut sub);
    assert_eq!(counts(&received), vec![(0, 10), (10, 15), (15, 11), (11, 0)]);
    assert!(inventory.list().is_empty());
}

#[test]
fn cancelled_subscriber_stops_receiving() {
    let mut host = session(NetRole::Authority, registry());
    let mut grid = host.bus().subscribe(Topic::STACK_CHANGED);
    let mut toasts = host.bus().subscribe(Topic::STACK_CHANGED);

    toasts.cancel();
    host.spawn_inventory(PLAYER)
        .unwrap()
        .add_entry(&key("Rock"), 1)
        .unwrap();

    assert_eq!(counts(&changes(&mut grid)), vec![(0, 1)]);
    assert!(toasts.try_next().is_none());
    assert_eq!(host.bus().subscriber_count(&Topic::STACK_CHANGED), 1);
}

#[test]
fn cancel_twice_and_publish_after_cancel_are_noops() {
    let mut host = session(NetRole::Authority, registry());
    let mut sub = host.bus().subscribe(Topic::STACK_CHANGED);
    sub.cancel();
    sub.cancel();

    let inventory = host.spawn_inventory(PLAYER).unwrap();
    inventory.add_entry(&key("Rock"), 2).unwrap();

    assert!(sub.is_cancelled());
    assert!(sub.drain().is_empty());
}

#[test]
fn totals_equal_added_minus_removed() {
    let mut host = session(NetRole::Authority, registry());
    let inventory = host.spawn_inventory(PLAYER).unwrap();
    let rock = key("Rock");

    let mut expected: u64 = 0;
    let mut state: u32 = 17;
    for _ in 0..200 {
        state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let amount = (state >> 16) % 5 + 1;
        if (state >> 8) & 1 == 0 {
            inventory.add_entry(&rock, amount).unwrap();
            expected += u64::from(amount);
        } else if let Some(entry) = inventory.list().find_first_by_definition(&rock) {
            let id = entry.id();
            let take = amount.min(entry.stack_count());
            inventory.remove_entry(id, take).unwrap();
            expected -= u64::from(take);
        }
        assert_eq!(inventory.list().total_count_by_definition(&rock), expected);
    }
}
