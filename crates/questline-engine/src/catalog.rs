/*
[INPUT]:  Ordered task node definitions (YAML document or in-memory list)
[OUTPUT]: Validated, id-indexed, immutable task catalog
[POS]:    Data model layer - the task graph as loaded for a session
[UPDATE]: When adding catalog validation rules or load formats
*/

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::CatalogError;
use crate::node::TaskNode;

/// Serialized form of a catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFile {
    pub tasks: Vec<TaskNode>,
}

/// All task definitions for one session, indexed by id.
///
/// Read-only after construction. Successor edges are resolved lazily at
/// follow time: a dangling successor id is legal (treated as end of chain)
/// and only warned about here, while structural defects in the nodes
/// themselves fail the load.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    nodes: HashMap<String, Arc<TaskNode>>,
    order: Vec<String>,
}

impl TaskCatalog {
    /// Build a catalog from an ordered node list, validating every node.
    pub fn new(tasks: Vec<TaskNode>) -> Result<Self, CatalogError> {
        let mut nodes: HashMap<String, Arc<TaskNode>> = HashMap::with_capacity(tasks.len());
        let mut order = Vec::with_capacity(tasks.len());

        for node in tasks {
            if node.id.is_empty() {
                return Err(CatalogError::EmptyTaskId);
            }
            if node.total_progress < 1 {
                return Err(CatalogError::InvalidProgressTarget {
                    task_id: node.id.clone(),
                    value: node.total_progress,
                });
            }
            if node.default_next_task.as_deref() == Some("") {
                return Err(CatalogError::EmptySuccessorId {
                    task_id: node.id.clone(),
                });
            }
            if node.branches.iter().any(|b| b.next_task.as_deref() == Some("")) {
                return Err(CatalogError::EmptySuccessorId {
                    task_id: node.id.clone(),
                });
            }
            if nodes.contains_key(&node.id) {
                return Err(CatalogError::DuplicateTaskId {
                    task_id: node.id.clone(),
                });
            }
            order.push(node.id.clone());
            nodes.insert(node.id.clone(), Arc::new(node));
        }

        let catalog = Self { nodes, order };
        catalog.warn_dangling_successors();
        Ok(catalog)
    }

    /// Parse and validate a YAML catalog document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::new(file.tasks)
    }

    /// Read, parse, and validate a YAML catalog file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// O(1) lookup by id.
    pub fn get(&self, task_id: &str) -> Option<&Arc<TaskNode>> {
        self.nodes.get(task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.nodes.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in authored order.
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// First node in authored order, the conventional session entry point.
    pub fn first_task(&self) -> Option<&Arc<TaskNode>> {
        self.order.first().and_then(|id| self.nodes.get(id))
    }

    fn warn_dangling_successors(&self) {
        for node in self.nodes.values() {
            let branch_targets = node.branches.iter().filter_map(|b| b.next_task.as_deref());
            let targets = node.default_next_task.as_deref().into_iter().chain(branch_targets);
            for target in targets {
                if !self.nodes.contains_key(target) {
                    warn!(
                        task_id = %node.id,
                        successor = %target,
                        "successor id not in catalog, will end the chain"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> TaskNode {
        TaskNode {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            conditions: vec![],
            on_start: vec![],
            on_complete: vec![],
            total_progress: 1,
            branches: vec![],
            default_next_task: None,
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = TaskCatalog::new(vec![node("t1"), node("t1")]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTaskId { task_id } if task_id == "t1"));
    }

    #[test]
    fn empty_id_is_rejected() {
        let err = TaskCatalog::new(vec![node("")]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTaskId));
    }

    #[test]
    fn zero_progress_target_is_rejected() {
        let mut bad = node("t1");
        bad.total_progress = 0;
        let err = TaskCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidProgressTarget { task_id, value: 0 } if task_id == "t1"
        ));
    }

    #[test]
    fn empty_successor_id_is_rejected() {
        let mut bad = node("t1");
        bad.default_next_task = Some(String::new());
        let err = TaskCatalog::new(vec![bad]).unwrap_err();
        assert!(matches!(err, CatalogError::EmptySuccessorId { task_id } if task_id == "t1"));
    }

    #[test]
    fn dangling_successor_is_accepted() {
        let mut dangling = node("t1");
        dangling.default_next_task = Some("never_authored".into());
        let catalog = TaskCatalog::new(vec![dangling]).expect("dangling successor is legal");
        assert!(catalog.contains("t1"));
        assert!(!catalog.contains("never_authored"));
    }

    #[test]
    fn lookup_and_authored_order() {
        let catalog = TaskCatalog::new(vec![node("t1"), node("t2")]).expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("t2").map(|n| n.id.as_str()), Some("t2"));
        assert_eq!(catalog.first_task().map(|n| n.id.as_str()), Some("t1"));
        let ids: Vec<&str> = catalog.task_ids().collect();
        assert_eq!(ids, vec!["t1", "t2"]);
    }

    #[test]
    fn yaml_catalog_round_trip() {
        let yaml = r#"
tasks:
  - id: t1
    name: Find the key
    total_progress: 2
    conditions:
      - kind: item
        item_id: rusty_key
    on_complete:
      - kind: world_event
        event: door_unlocked
    default_next_task: t2
  - id: t2
    name: Open the door
"#;
        let catalog = TaskCatalog::from_yaml_str(yaml).expect("valid yaml catalog");
        assert_eq!(catalog.len(), 2);
        let t1 = catalog.get("t1").expect("t1 present");
        assert_eq!(t1.total_progress, 2);
        assert_eq!(t1.conditions.len(), 1);
        assert_eq!(t1.default_next_task.as_deref(), Some("t2"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = TaskCatalog::from_yaml_str("tasks: [this is: not a task]").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
