/*
[INPUT]:  Deserialized task definitions (YAML catalog entries)
[OUTPUT]: Immutable task graph nodes with conditions, actions, and branches
[POS]:    Data model layer - static quest definitions
[UPDATE]: When the authored task schema changes
*/

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::action::TaskAction;
use crate::condition::TaskCondition;
use crate::systems::TaskSystems;

/// Static definition of one quest step.
///
/// Nodes are catalog data: immutable once loaded, shared by reference, and
/// never carry runtime status (see `TaskRuntimeState`). Successor edges are
/// by-id, so branches across nodes may form cycles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Stable id, unique across the catalog.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Flavor / journal text.
    #[serde(default)]
    pub description: String,
    /// AND-combined completion requirements; empty means vacuously satisfied.
    #[serde(default)]
    pub conditions: Vec<TaskCondition>,
    /// Run in order when the task starts.
    #[serde(default)]
    pub on_start: Vec<TaskAction>,
    /// Run in order when the task completes.
    #[serde(default)]
    pub on_complete: Vec<TaskAction>,
    /// Progress reports needed before the completion gate opens. Must be >= 1.
    #[serde(default = "default_total_progress")]
    pub total_progress: i64,
    /// Explicitly selectable successor edges.
    #[serde(default)]
    pub branches: Vec<TaskBranch>,
    /// Successor when no branch is chosen.
    #[serde(default)]
    pub default_next_task: Option<String>,
}

fn default_total_progress() -> i64 {
    1
}

impl TaskNode {
    /// Whether every completion condition currently holds. Conditions are
    /// order-independent pure predicates, so the first false short-circuits.
    pub fn conditions_met(&self, systems: &dyn TaskSystems) -> bool {
        self.conditions.iter().all(|c| c.is_met(systems))
    }
}

/// A named alternative successor edge with its own side effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBranch {
    /// Human-readable label shown when picking an outcome.
    #[serde(default)]
    pub label: String,
    /// Direct stat adjustments applied before the branch actions.
    #[serde(default)]
    pub stat_impacts: Vec<StatImpact>,
    /// Run in order when this branch is taken.
    #[serde(default)]
    pub actions: Vec<TaskAction>,
    /// Successor task id; absent means the chain ends here.
    #[serde(default)]
    pub next_task: Option<String>,
}

/// One stat adjustment carried directly on a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatImpact {
    pub stat: String,
    pub delta: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::NullSystems;
    use std::cell::Cell;

    #[test]
    fn empty_condition_list_is_vacuously_satisfied() {
        let node = TaskNode {
            id: "t1".into(),
            name: String::new(),
            description: String::new(),
            conditions: vec![],
            on_start: vec![],
            on_complete: vec![],
            total_progress: 1,
            branches: vec![],
            default_next_task: None,
        };
        assert!(node.conditions_met(&NullSystems));
    }

    #[test]
    fn conditions_short_circuit_on_first_false() {
        struct CountingSystems {
            stat_queries: Cell<usize>,
        }

        impl TaskSystems for CountingSystems {
            fn item_count(&self, _item_id: &str) -> Option<i64> {
                Some(0)
            }

            fn stat_value(&self, _stat: &str) -> Option<Decimal> {
                self.stat_queries.set(self.stat_queries.get() + 1);
                Some(Decimal::from(50))
            }

            fn apply_stat_delta(&mut self, _stat: &str, _delta: Decimal) {}
            fn broadcast_world_event(&mut self, _event: &str) {}
            fn grant_item(&mut self, _item_id: &str, _amount: i64) {}
            fn begin_dialogue(&mut self, _dialogue_id: &str) {}
        }

        let systems = CountingSystems {
            stat_queries: Cell::new(0),
        };
        let node = TaskNode {
            id: "t1".into(),
            name: String::new(),
            description: String::new(),
            conditions: vec![
                TaskCondition::Item {
                    item_id: "rusty_key".into(),
                    amount: 1,
                },
                TaskCondition::Stat {
                    stat: "Sanity".into(),
                    min: Decimal::ZERO,
                    max: Decimal::from(100),
                },
            ],
            on_start: vec![],
            on_complete: vec![],
            total_progress: 1,
            branches: vec![],
            default_next_task: None,
        };

        assert!(!node.conditions_met(&systems));
        assert_eq!(systems.stat_queries.get(), 0);
    }

    #[test]
    fn node_deserializes_with_defaults() {
        let yaml = "id: t1\nname: Find the key\n";
        let node: TaskNode = serde_yaml::from_str(yaml).expect("valid node");
        assert_eq!(node.id, "t1");
        assert_eq!(node.total_progress, 1);
        assert!(node.conditions.is_empty());
        assert!(node.branches.is_empty());
        assert_eq!(node.default_next_task, None);
    }

    #[test]
    fn branch_deserializes_with_stat_impacts() {
        let yaml = r#"
label: hand over the key
stat_impacts:
  - stat: Trust
    delta: 10
next_task: t2
"#;
        let branch: TaskBranch = serde_yaml::from_str(yaml).expect("valid branch");
        assert_eq!(branch.label, "hand over the key");
        assert_eq!(branch.stat_impacts.len(), 1);
        assert_eq!(branch.stat_impacts[0].delta, Decimal::from(10));
        assert_eq!(branch.next_task.as_deref(), Some("t2"));
    }
}
