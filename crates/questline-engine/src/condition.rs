/*
[INPUT]:  Tagged condition definitions from the catalog + TaskSystems queries
[OUTPUT]: Pure satisfaction checks gating task completion
[POS]:    Capability layer - completion predicates
[UPDATE]: When adding condition variants or changing unavailable-system policy
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::systems::TaskSystems;

/// One completion requirement on a task.
///
/// The serde tag is the stable authoring key for each variant, so catalogs
/// carry `kind: item` / `kind: stat` / `kind: dialogue` alongside that
/// variant's parameters. `is_met` is a pure predicate: it reads external
/// systems and never writes them.
///
/// Every variant treats an unavailable subsystem (`None` from the query) as
/// satisfied, so an engine with no real game attached never deadlocks a
/// quest on a check nobody can answer. Not final behavior for shipping
/// content; real subsystems replace it through [`TaskSystems`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskCondition {
    /// Player holds at least `amount` of `item_id`.
    Item {
        item_id: String,
        #[serde(default = "default_amount")]
        amount: i64,
    },
    /// Named stat currently sits inside `[min, max]`.
    Stat {
        stat: String,
        #[serde(default)]
        min: Decimal,
        #[serde(default = "default_stat_max")]
        max: Decimal,
    },
    /// Dialogue has been completed, optionally requiring a full read.
    Dialogue {
        dialogue_id: String,
        #[serde(default = "default_fully_read")]
        must_be_fully_read: bool,
    },
}

fn default_amount() -> i64 {
    1
}

fn default_stat_max() -> Decimal {
    Decimal::from(100)
}

fn default_fully_read() -> bool {
    true
}

impl TaskCondition {
    /// Whether this requirement is currently satisfied.
    pub fn is_met(&self, systems: &dyn TaskSystems) -> bool {
        match self {
            TaskCondition::Item { item_id, amount } => match systems.item_count(item_id) {
                Some(held) => held >= *amount,
                None => {
                    debug!(%item_id, amount, "inventory unavailable, item condition passes");
                    true
                }
            },
            TaskCondition::Stat { stat, min, max } => match systems.stat_value(stat) {
                Some(value) => *min <= value && value <= *max,
                None => {
                    debug!(%stat, "stat system unavailable, stat condition passes");
                    true
                }
            },
            TaskCondition::Dialogue {
                dialogue_id,
                must_be_fully_read,
            } => match systems.dialogue_finished(dialogue_id, *must_be_fully_read) {
                Some(finished) => finished,
                None => {
                    debug!(%dialogue_id, "dialogue system unavailable, dialogue condition passes");
                    true
                }
            },
        }
    }
}
