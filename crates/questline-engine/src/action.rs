/*
[INPUT]:  Tagged action definitions from the catalog
[OUTPUT]: Single side effects applied through TaskSystems
[POS]:    Capability layer - start/completion/branch side effects
[UPDATE]: When adding action variants or new effect targets
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::systems::TaskSystems;

/// One side effect run when a task starts, completes, or a branch is taken.
///
/// Same tagged-union authoring convention as conditions: `kind: stat_delta`,
/// `kind: world_event`, `kind: give_item`, `kind: dialogue`. Execution is
/// fire-and-forget; a missing external system is the variant's local problem
/// (logged inside [`TaskSystems`] implementations) and never interrupts the
/// task transition that ran it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskAction {
    /// Adjust a named player stat by `delta`.
    StatDelta { stat: String, delta: Decimal },
    /// Broadcast a named world event.
    WorldEvent { event: String },
    /// Put `amount` of `item_id` into the player inventory.
    GiveItem {
        item_id: String,
        #[serde(default = "default_amount")]
        amount: i64,
    },
    /// Start a dialogue.
    Dialogue { dialogue_id: String },
}

fn default_amount() -> i64 {
    1
}

impl TaskAction {
    /// Perform the effect.
    pub fn execute(&self, systems: &mut dyn TaskSystems) {
        match self {
            TaskAction::StatDelta { stat, delta } => systems.apply_stat_delta(stat, *delta),
            TaskAction::WorldEvent { event } => systems.broadcast_world_event(event),
            TaskAction::GiveItem { item_id, amount } => systems.grant_item(item_id, *amount),
            TaskAction::Dialogue { dialogue_id } => systems.begin_dialogue(dialogue_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSystems {
        effects: Vec<String>,
    }

    impl TaskSystems for RecordingSystems {
        fn apply_stat_delta(&mut self, stat: &str, delta: Decimal) {
            self.effects.push(format!("stat {stat} {delta}"));
        }

        fn broadcast_world_event(&mut self, event: &str) {
            self.effects.push(format!("event {event}"));
        }

        fn grant_item(&mut self, item_id: &str, amount: i64) {
            self.effects.push(format!("item {item_id} x{amount}"));
        }

        fn begin_dialogue(&mut self, dialogue_id: &str) {
            self.effects.push(format!("dialogue {dialogue_id}"));
        }
    }

    #[test]
    fn each_variant_routes_to_its_effect() {
        let mut systems = RecordingSystems::default();
        let actions = [
            TaskAction::StatDelta {
                stat: "Sanity".into(),
                delta: Decimal::from(-5),
            },
            TaskAction::WorldEvent {
                event: "lights_out".into(),
            },
            TaskAction::GiveItem {
                item_id: "sedative".into(),
                amount: 2,
            },
            TaskAction::Dialogue {
                dialogue_id: "warden_warning".into(),
            },
        ];
        for action in &actions {
            action.execute(&mut systems);
        }
        assert_eq!(
            systems.effects,
            vec![
                "stat Sanity -5",
                "event lights_out",
                "item sedative x2",
                "dialogue warden_warning",
            ]
        );
    }

    #[test]
    fn give_item_amount_defaults_to_one() {
        let action: TaskAction =
            serde_yaml::from_str("kind: give_item\nitem_id: sedative\n").expect("valid action");
        assert_eq!(
            action,
            TaskAction::GiveItem {
                item_id: "sedative".into(),
                amount: 1,
            }
        );
    }

    #[test]
    fn tags_round_trip_through_json() {
        let action = TaskAction::StatDelta {
            stat: "Sanity".into(),
            delta: Decimal::from(5),
        };
        let json = serde_json::to_string(&action).expect("serialize");
        assert!(json.contains("\"kind\":\"stat_delta\""));
        let back: TaskAction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, action);
    }
}
