mod common;

use common::{PLAYER, changes, counts, key, registry, session};
use inventory_core::{
    ActorId, EntrySnapshot, InstanceId, InventorySnapshot, NetRole, ReplicationError, StatTags,
};
use inventory_runtime::{
    ReplicationPacket, RuntimeError, Session, Topic, decode_packet, encode_packet,
};
use tokio::sync::mpsc;

/// Ships every pending diff from `host` to `client` through the wire codec.
fn sync(host: &mut Session, client: &mut Session) {
    for diff in host.take_replication_diffs() {
        let bytes = encode_packet(&ReplicationPacket::Diff(diff)).unwrap();
        client.apply_packet(&decode_packet(&bytes).unwrap()).unwrap();
    }
}

#[test]
fn replica_observers_see_what_authority_observers_see() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let mut client = session(NetRole::Replica, items);
    client.spawn_inventory(PLAYER).unwrap();
    let mut host_sub = host.bus().subscribe(Topic::STACK_CHANGED);
    let mut client_sub = client.bus().subscribe(Topic::STACK_CHANGED);

    let inventory = host.spawn_inventory(PLAYER).unwrap();
    inventory.add_entry(&key("Rock"), 1).unwrap();
    inventory.add_entry(&key("Rock"), 2).unwrap();
    let sword = inventory.add_entry(&key("IronSword"), 1).unwrap();
    inventory.consume_by_definition(&key("Rock"), 3).unwrap();
    sync(&mut host, &mut client);

    inventory_mut(&mut host).remove_entry(sword, 1).unwrap();
    inventory_mut(&mut host).add_entry(&key("Coin"), 7).unwrap();
    sync(&mut host, &mut client);

    let authority_events = changes(&mut host_sub);
    let replica_events = changes(&mut client_sub);
    assert_eq!(
        counts(&authority_events),
        vec![(0, 1), (1, 3), (0, 1), (3, 0), (1, 0), (0, 7)]
    );
    assert_eq!(replica_events, authority_events);

    let host_list = host.inventory(PLAYER).unwrap().list();
    let client_list = client.inventory(PLAYER).unwrap().list();
    assert_eq!(client_list.entries(), host_list.entries());
}

#[test]
fn replica_instances_keep_authority_stats() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let mut client = session(NetRole::Replica, items);
    client.spawn_inventory(PLAYER).unwrap();

    let sword = host
        .spawn_inventory(PLAYER)
        .unwrap()
        .add_entry(&key("IronSword"), 1)
        .unwrap();
    sync(&mut host, &mut client);

    let instance = client.inventory(PLAYER).unwrap().list().instance(sword).unwrap();
    assert_eq!(instance.stat("durability"), 100);
    assert_eq!(instance.stat("damage"), 7);
    assert_eq!(instance.stat(StatTags::QUANTITY), 1);
}

#[test]
fn gap_is_rejected_until_snapshot_repairs_it() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let mut client = session(NetRole::Replica, items);
    client.spawn_inventory(PLAYER).unwrap();

    host.spawn_inventory(PLAYER).unwrap().add_entry(&key("Rock"), 2).unwrap();
    let lost = host.take_replication_diffs();
    inventory_mut(&mut host).add_entry(&key("Gem"), 1).unwrap();
    let next = host.take_replication_diffs();
    assert_eq!(lost.len(), 1);

    let mut client_sub = client.bus().subscribe(Topic::STACK_CHANGED);
    let err = client.apply_replication(&next[0]).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Replication(ReplicationError::SequenceGap {
            expected: 1,
            received: 2
        })
    ));
    assert!(client.inventory(PLAYER).unwrap().list().is_empty());
    assert!(client_sub.try_next().is_none());

    let snapshot = host.inventory(PLAYER).unwrap().snapshot();
    client.apply_snapshot(&snapshot).unwrap();
    assert_eq!(counts(&changes(&mut client_sub)), vec![(0, 2), (0, 1)]);

    // Already covered by the snapshot.
    assert!(client.apply_replication(&next[0]).unwrap().is_empty());
    assert!(client_sub.try_next().is_none());
}

#[test]
fn redelivered_diff_is_ignored() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let mut client = session(NetRole::Replica, items);
    client.spawn_inventory(PLAYER).unwrap();

    host.spawn_inventory(PLAYER).unwrap().add_entry(&key("Rock"), 4).unwrap();
    let diffs = host.take_replication_diffs();

    assert_eq!(client.apply_replication(&diffs[0]).unwrap().len(), 1);
    assert!(client.apply_replication(&diffs[0]).unwrap().is_empty());
    assert_eq!(
        client
            .inventory(PLAYER)
            .unwrap()
            .list()
            .total_count_by_definition(&key("Rock")),
        4
    );
}

#[test]
fn late_joiner_is_spawned_from_snapshot() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let inventory = host.spawn_inventory(PLAYER).unwrap();
    inventory.add_entry(&key("Coin"), 12).unwrap();
    inventory.add_entry(&key("HealthPotion"), 2).unwrap();
    host.take_replication_diffs();

    let mut late = session(NetRole::Replica, items);
    let mut sub = late.bus().subscribe(Topic::STACK_CHANGED);
    for snapshot in host.snapshots() {
        let bytes = encode_packet(&ReplicationPacket::Snapshot(snapshot)).unwrap();
        late.apply_packet(&decode_packet(&bytes).unwrap()).unwrap();
    }

    assert_eq!(counts(&changes(&mut sub)), vec![(0, 12), (0, 2)]);
    let replica = late.inventory(PLAYER).unwrap();
    assert_eq!(replica.role(), NetRole::Replica);
    assert_eq!(replica.snapshot(), host.inventory(PLAYER).unwrap().snapshot());

    // Subsequent diffs continue from the snapshot sequence.
    inventory_mut(&mut host).add_entry(&key("Coin"), 1).unwrap();
    sync(&mut host, &mut late);
    assert_eq!(counts(&changes(&mut sub)), vec![(12, 13)]);
}

#[test]
fn diffs_for_unknown_owner_are_rejected() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let mut client = session(NetRole::Replica, items);
    host.spawn_inventory(PLAYER).unwrap().add_entry(&key("Rock"), 1).unwrap();

    let diffs = host.take_replication_diffs();
    let err = client.apply_replication(&diffs[0]).unwrap_err();
    assert!(matches!(err, RuntimeError::UnknownInventory(owner) if owner == PLAYER));
}

#[tokio::test]
async fn replica_task_applies_encoded_diffs_over_channel() {
    let items = registry();
    let mut host = session(NetRole::Authority, items.clone());
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(8);

    let replica = tokio::spawn(async move {
        let mut client = session(NetRole::Replica, items);
        client.spawn_inventory(PLAYER).unwrap();
        let mut sub = client.bus().subscribe(Topic::STACK_CHANGED);
        while let Some(bytes) = rx.recv().await {
            let packet = decode_packet(&bytes).unwrap();
            client.apply_packet(&packet).unwrap();
        }
        (client.inventory(PLAYER).unwrap().snapshot(), changes(&mut sub))
    });

    let mut host_sub = host.bus().subscribe(Topic::STACK_CHANGED);
    host.spawn_inventory(PLAYER).unwrap();
    for count in 1..=3 {
        inventory_mut(&mut host).add_entry(&key("Gem"), count).unwrap();
        for diff in host.take_replication_diffs() {
            tx.send(encode_packet(&ReplicationPacket::Diff(diff)).unwrap())
                .await
                .unwrap();
        }
    }
    drop(tx);

    let (snapshot, replica_events) = replica.await.unwrap();
    assert_eq!(snapshot, host.inventory(PLAYER).unwrap().snapshot());
    assert_eq!(replica_events, changes(&mut host_sub));
}

fn inventory_mut(session: &mut Session) -> &mut inventory_runtime::InventoryComponent {
    session.inventory_mut(PLAYER).unwrap()
}

#[test]
fn rejected_snapshot_leaves_no_inventory_behind() {
    let items = registry();
    let stranger = ActorId(9);
    let snapshot = InventorySnapshot {
        owner: stranger,
        sequence: 1,
        entries: Vec::new(),
    };

    let mut host = session(NetRole::Authority, items.clone());
    let err = host.apply_snapshot(&snapshot).unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Replication(ReplicationError::Unauthorized { .. })
    ));
    assert!(host.inventory(stranger).is_none());

    let mut client = session(NetRole::Replica, items);
    let broken = InventorySnapshot {
        entries: vec![EntrySnapshot {
            id: InstanceId(1),
            definition: key("Dragon"),
            count: 1,
            stat_tags: StatTags::default(),
        }],
        ..snapshot
    };
    assert!(client.apply_snapshot(&broken).is_err());
    assert!(client.inventory(stranger).is_none());
    assert_eq!(client.inventories().count(), 0);
}
