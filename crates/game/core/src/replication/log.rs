use crate::types::ActorId;

use super::error::ReplicationError;
use super::{EntryOp, ReplicationDiff};

/// Authority-side dirty log: ops committed since the last flush.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReplicationLog {
    pending: Vec<EntryOp>,
    /// Sequence number the next recorded op receives.
    next_sequence: u64,
}

impl ReplicationLog {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_sequence: 1,
        }
    }

    pub fn record(&mut self, op: EntryOp) {
        self.pending.push(op);
        self.next_sequence += 1;
    }

    pub fn is_dirty(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending(&self) -> &[EntryOp] {
        &self.pending
    }

    /// Sequence number of the most recently recorded op (0 before any).
    pub fn last_sequence(&self) -> u64 {
        self.next_sequence.saturating_sub(1)
    }

    /// Drains pending ops into a diff, or `None` when nothing is dirty.
    pub fn take(&mut self, owner: ActorId) -> Option<ReplicationDiff> {
        if self.pending.is_empty() {
            return None;
        }
        let ops = std::mem::take(&mut self.pending);
        Some(ReplicationDiff {
            owner,
            first_sequence: self.next_sequence - ops.len() as u64,
            ops,
        })
    }
}

/// Replica-side position in the authority's op sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplicaCursor {
    applied: u64,
}

impl ReplicaCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Returns the ops of `diff` not applied yet.
    ///
    /// Redelivered ops are skipped; a diff starting past the next expected
    /// sequence is a gap and must be repaired with a snapshot.
    pub fn admit<'a>(&self, diff: &'a ReplicationDiff) -> Result<&'a [EntryOp], ReplicationError> {
        if diff.is_empty() || diff.last_sequence() <= self.applied {
            return Ok(&[]);
        }

        let expected = self.applied + 1;
        if diff.first_sequence > expected {
            return Err(ReplicationError::SequenceGap {
                expected,
                received: diff.first_sequence,
            });
        }

        let skip = (expected - diff.first_sequence) as usize;
        Ok(&diff.ops[skip..])
    }

    pub fn advance(&mut self, sequence: u64) {
        self.applied = self.applied.max(sequence);
    }

    pub fn reset(&mut self, sequence: u64) {
        self.applied = sequence;
    }
}
