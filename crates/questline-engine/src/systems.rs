/*
[INPUT]:  Queries and effects from conditions and actions
[OUTPUT]: Pluggable seam to inventory, player stats, and dialogue subsystems
[POS]:    Integration layer - boundary between the engine and the game
[UPDATE]: When condition/action variants need new external capabilities
*/

use rust_decimal::Decimal;
use tracing::info;

/// Seam to the external game subsystems conditions read and actions mutate.
///
/// Query methods return `Option`: `None` means the subsystem is not wired up
/// in this session. Each condition variant documents its own policy for
/// `None` (all current variants treat it as satisfied, so the engine runs
/// standalone). Queries must not mutate the game; effect methods are
/// fire-and-forget and must not fail loudly — an unavailable target is at
/// most logged.
pub trait TaskSystems {
    /// How many of `item_id` the player holds.
    fn item_count(&self, item_id: &str) -> Option<i64> {
        let _ = item_id;
        None
    }

    /// Current value of a named player stat.
    fn stat_value(&self, stat: &str) -> Option<Decimal> {
        let _ = stat;
        None
    }

    /// Whether a dialogue has been completed, optionally requiring every
    /// line to have been read.
    fn dialogue_finished(&self, dialogue_id: &str, must_be_fully_read: bool) -> Option<bool> {
        let _ = (dialogue_id, must_be_fully_read);
        None
    }

    /// Apply a delta to a named player stat.
    fn apply_stat_delta(&mut self, stat: &str, delta: Decimal);

    /// Broadcast a named world event.
    fn broadcast_world_event(&mut self, event: &str);

    /// Add `amount` of `item_id` to the player inventory.
    fn grant_item(&mut self, item_id: &str, amount: i64);

    /// Kick off a dialogue.
    fn begin_dialogue(&mut self, dialogue_id: &str);
}

/// Default stand-in used until real subsystems are plugged in: every query
/// reports "unavailable" and every effect is logged and dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSystems;

impl TaskSystems for NullSystems {
    fn apply_stat_delta(&mut self, stat: &str, delta: Decimal) {
        info!(stat, %delta, "stat delta (no stat system attached)");
    }

    fn broadcast_world_event(&mut self, event: &str) {
        info!(event, "world event (no event bus attached)");
    }

    fn grant_item(&mut self, item_id: &str, amount: i64) {
        info!(item_id, amount, "item grant (no inventory attached)");
    }

    fn begin_dialogue(&mut self, dialogue_id: &str) {
        info!(dialogue_id, "dialogue start (no dialogue system attached)");
    }
}
