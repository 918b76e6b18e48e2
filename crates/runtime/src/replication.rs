//! Wire encoding for replication payloads.
//!
//! Diffs and snapshots travel as bincode over their serde derives. Hosts
//! that multiplex both on one link wrap them in a [`ReplicationPacket`].

use inventory_core::{InventorySnapshot, ReplicationDiff};
use serde::{Deserialize, Serialize};

use crate::api::Result;

/// One message on an authority-to-replica link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicationPacket {
    Diff(ReplicationDiff),
    Snapshot(InventorySnapshot),
}

pub fn encode_diff(diff: &ReplicationDiff) -> Result<Vec<u8>> {
    Ok(bincode::serialize(diff)?)
}

pub fn decode_diff(bytes: &[u8]) -> Result<ReplicationDiff> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn encode_snapshot(snapshot: &InventorySnapshot) -> Result<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

pub fn decode_snapshot(bytes: &[u8]) -> Result<InventorySnapshot> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn encode_packet(packet: &ReplicationPacket) -> Result<Vec<u8>> {
    Ok(bincode::serialize(packet)?)
}

pub fn decode_packet(bytes: &[u8]) -> Result<ReplicationPacket> {
    Ok(bincode::deserialize(bytes)?)
}
