//! Scripted session: pickups on the host, mirrored by a replica task.

use std::sync::Arc;

use anyhow::{Context, Result};
use inventory_core::{
    ActorId, CollectableComponent, DecorComponent, ErrorSeverity, Interaction, InventoryConfig,
    InventorySnapshot, ItemKey, ItemOracle, NetRole, PickupBundle, WorldActor,
};
use inventory_runtime::{
    Event, InventoryGridView, PickupOutcome, ReplicationPacket, RuntimeError, Session, ToastFeed,
    Topic, decode_packet, encode_packet,
};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::config::CliConfig;

const PLAYER: ActorId = ActorId(1);

fn world() -> Vec<WorldActor> {
    vec![
        WorldActor::new(ActorId(100), "Rock pile")
            .with_component(DecorComponent::new("mesh"))
            .with_component(CollectableComponent::new("loot", PickupBundle::single("Rock", 3))),
        WorldActor::new(ActorId(101), "Potion crate")
            .with_collectable(PickupBundle::single("HealthPotion", 2).with("Rock", 1)),
        // Misconfigured: two collectable components.
        WorldActor::new(ActorId(102), "Treasure chest")
            .with_component(CollectableComponent::new("gold", PickupBundle::single("Coin", 25)))
            .with_component(CollectableComponent::new("gems", PickupBundle::single("Gem", 2))),
        WorldActor::new(ActorId(103), "Weapon rack")
            .with_collectable(PickupBundle::single("IronSword", 1)),
        WorldActor::new(ActorId(104), "Tree").with_component(DecorComponent::new("leaves")),
    ]
}

pub async fn run(
    config: &CliConfig,
    inventory_config: InventoryConfig,
    items: Arc<dyn ItemOracle>,
) -> Result<()> {
    let mut host = Session::builder()
        .config(inventory_config.clone())
        .items(Arc::clone(&items))
        .build()?;
    host.spawn_inventory(PLAYER)?;

    let mut toasts = ToastFeed::with_capacity(
        host.bus(),
        Arc::clone(&items),
        PLAYER,
        config.toast_capacity,
    );
    let mut pickups = host.bus().subscribe(Topic::PICKUP_COLLECTED);

    let (tx, rx) = mpsc::channel(config.link_buffer);
    let replica = tokio::spawn(run_replica(
        inventory_config,
        Arc::clone(&items),
        config.toast_capacity,
        rx,
    ));

    // The replica joins late: everything before this point arrives as a snapshot.
    for snapshot in host.snapshots() {
        send(&tx, &ReplicationPacket::Snapshot(snapshot)).await?;
    }

    for target in world() {
        println!("[host] interact with {}", target.name());
        match host.interact(Interaction::new(PLAYER, &target)) {
            Ok(PickupOutcome::Collected(entries)) => {
                info!(target: "cli::demo", actor = target.name(), entries = entries.len(), "collected");
            }
            Ok(PickupOutcome::NotCollectable) => println!("[host]   nothing to pick up"),
            Err(error) => report(&error),
        }
        flush(&mut host, &tx).await?;

        while let Some(event) = pickups.try_next() {
            if let Event::PickupCollected(collected) = event {
                println!(
                    "[host]   {} collected {} template(s) from {}",
                    collected.collector,
                    collected.bundle.templates.len(),
                    collected.target
                );
            }
        }
        toasts.pump();
        for toast in toasts.take() {
            println!("[host]   toast: {}", toast.text);
        }
    }

    // Spend a couple of rocks; the oldest stack drains first.
    if let Some(inventory) = host.inventory_mut(PLAYER) {
        match inventory.consume_by_definition(&ItemKey::new("Rock"), 2) {
            Ok(changes) => info!(target: "cli::demo", entries = changes.len(), "rocks consumed"),
            Err(error) => report(&error),
        }
        if let Err(error) = inventory.consume_by_definition(&ItemKey::new("Gem"), 5) {
            report(&error);
        }
    }
    flush(&mut host, &tx).await?;
    toasts.pump();
    for toast in toasts.take() {
        println!("[host]   toast: {}", toast.text);
    }

    drop(tx);
    let replica_snapshot = replica.await.context("replica task panicked")??;

    let host_snapshot = host
        .inventory(PLAYER)
        .map(|inventory| inventory.snapshot())
        .context("player inventory missing")?;
    if host_snapshot == replica_snapshot {
        info!(target: "cli::demo", sequence = host_snapshot.sequence, "replica converged");
    } else {
        warn!(target: "cli::demo", "replica diverged from host");
    }

    println!("{}", serde_json::to_string_pretty(&host_snapshot)?);
    Ok(())
}

async fn run_replica(
    inventory_config: InventoryConfig,
    items: Arc<dyn ItemOracle>,
    toast_capacity: usize,
    mut rx: mpsc::Receiver<Vec<u8>>,
) -> Result<InventorySnapshot> {
    let mut client = Session::builder()
        .role(NetRole::Replica)
        .config(inventory_config)
        .items(Arc::clone(&items))
        .build()?;
    let mut toasts = ToastFeed::with_capacity(client.bus(), Arc::clone(&items), PLAYER, toast_capacity);
    let mut grid: Option<InventoryGridView> = None;

    while let Some(bytes) = rx.recv().await {
        let packet = decode_packet(&bytes)?;
        if let Err(error) = client.apply_packet(&packet) {
            report(&error);
            continue;
        }

        if grid.is_none()
            && let Some(inventory) = client.inventory(PLAYER)
        {
            grid = Some(InventoryGridView::open(
                client.bus(),
                Arc::clone(&items),
                inventory.list(),
            ));
        }
        if let Some(grid) = grid.as_mut() {
            grid.pump();
        }

        toasts.pump();
        for toast in toasts.take() {
            println!("[replica] toast: {}", toast.text);
        }
    }

    if let Some(grid) = grid.as_mut() {
        for tile in grid.model().tiles() {
            println!("[replica] tile {} x{} ({})", tile.display_name, tile.count, tile.entry);
        }
        grid.close();
    }

    client
        .inventory(PLAYER)
        .map(|inventory| inventory.snapshot())
        .context("replica never received the player inventory")
}

async fn flush(host: &mut Session, tx: &mpsc::Sender<Vec<u8>>) -> Result<()> {
    for diff in host.take_replication_diffs() {
        send(tx, &ReplicationPacket::Diff(diff)).await?;
    }
    Ok(())
}

async fn send(tx: &mpsc::Sender<Vec<u8>>, packet: &ReplicationPacket) -> Result<()> {
    let bytes = encode_packet(packet)?;
    tx.send(bytes)
        .await
        .map_err(|_| anyhow::anyhow!("replica link closed"))
}

fn report(error: &RuntimeError) {
    match error.severity() {
        ErrorSeverity::Internal => error!(target: "cli::demo", %error, "operation failed"),
        _ => warn!(target: "cli::demo", %error, "operation rejected"),
    }
    println!("  ! {}", error);
}
