//! # Vote State Machine
//!
//! Pure transition logic for up/down voting. The store adapter evaluates
//! [`transition`] inside its transaction; nothing here touches I/O.
//!
//! States are {none, up, down}; actions are {up, down, retract}. Requesting
//! the vote you already hold toggles it off. At most one vote record exists
//! per (voter, item). The transition emits the new state plus signed
//! counter deltas, and counters are clamped at zero when deltas are applied.

use serde::{Deserialize, Serialize};

/// Direction of a held vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteKind {
    Up,
    Down,
}

/// What the voter asked for. `Retract` is the explicit un-vote action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteAction {
    Up,
    Down,
    Retract,
}

/// Outcome of one vote request: the vote state to persist and the signed
/// deltas to apply to the item's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: Option<VoteKind>,
    pub up_delta: i32,
    pub down_delta: i32,
}

/// Computes the new vote state and counter deltas for one request.
pub fn transition(existing: Option<VoteKind>, action: VoteAction) -> Transition {
    use VoteAction as A;
    use VoteKind as K;

    let (next, up_delta, down_delta) = match (existing, action) {
        (None, A::Up) => (Some(K::Up), 1, 0),
        (None, A::Down) => (Some(K::Down), 0, 1),
        (None, A::Retract) => (None, 0, 0),
        // Re-requesting the held vote toggles it off.
        (Some(K::Up), A::Up) => (None, -1, 0),
        (Some(K::Down), A::Down) => (None, 0, -1),
        // Switching sides moves one unit across both counters.
        (Some(K::Up), A::Down) => (Some(K::Down), -1, 1),
        (Some(K::Down), A::Up) => (Some(K::Up), 1, -1),
        (Some(K::Up), A::Retract) => (None, -1, 0),
        (Some(K::Down), A::Retract) => (None, 0, -1),
    };
    Transition {
        next,
        up_delta,
        down_delta,
    }
}

/// Applies a signed delta to a counter, flooring at zero. The floor is a
/// defensive invariant: counters must never go negative even if a prior
/// inconsistency left them out of step with the vote records.
pub fn apply_delta(counter: u32, delta: i32) -> u32 {
    counter.saturating_add_signed(delta)
}

/// What a committed vote transaction reports back to the caller: the
/// voter's new state and the item's counters as of the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub new_state: Option<VoteKind>,
    pub upvotes: u32,
    pub downvotes: u32,
}

/// A persisted vote, keyed uniquely by (voter, item). Created on first
/// vote, rewritten on a switch, removed on toggle-off/retract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub item_id: uuid::Uuid,
    pub voter_id: String,
    pub kind: VoteKind,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
