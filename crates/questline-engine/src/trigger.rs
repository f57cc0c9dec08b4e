/*
[INPUT]:  External stimuli (interaction, collision, scripted events)
[OUTPUT]: Progress reports forwarded to the engine, with once-only latching
[POS]:    Integration layer - stimulus-side bookkeeping
[UPDATE]: When trigger firing rules change
*/

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::TaskEngine;
use crate::error::EngineError;

/// Stimulus-side adapter that reports progress against one task.
///
/// The engine itself is not idempotent: every accepted report mutates state.
/// Firing a stimulus only once is therefore the trigger's job, tracked in a
/// local latch here rather than in the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressTrigger {
    /// Task the stimulus reports against.
    pub target_task_id: String,
    /// Progress added per firing.
    #[serde(default = "default_amount")]
    pub amount: i64,
    /// Whether the trigger may fire only once.
    #[serde(default = "default_once")]
    pub once: bool,
    #[serde(skip)]
    fired: bool,
}

fn default_amount() -> i64 {
    1
}

fn default_once() -> bool {
    true
}

impl ProgressTrigger {
    pub fn new(target_task_id: impl Into<String>, amount: i64, once: bool) -> Self {
        Self {
            target_task_id: target_task_id.into(),
            amount,
            once,
            fired: false,
        }
    }

    /// Forward the stimulus to the engine. Returns whether a report was
    /// actually made (a latched once-only trigger returns `Ok(false)`).
    pub fn fire(&mut self, engine: &mut TaskEngine) -> Result<bool, EngineError> {
        if self.once && self.fired {
            debug!(task_id = %self.target_task_id, "trigger already fired, ignoring");
            return Ok(false);
        }
        engine.advance_progress(&self.target_task_id, self.amount)?;
        self.fired = true;
        Ok(true)
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Unlatch, allowing a once-only trigger to fire again.
    pub fn rearm(&mut self) {
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TaskCatalog;
    use crate::node::TaskNode;

    fn engine_with_one_task(total_progress: i64) -> TaskEngine {
        let node = TaskNode {
            id: "t1".into(),
            name: String::new(),
            description: String::new(),
            conditions: vec![],
            on_start: vec![],
            on_complete: vec![],
            total_progress,
            branches: vec![],
            default_next_task: None,
        };
        TaskEngine::new(TaskCatalog::new(vec![node]).expect("valid catalog"))
    }

    #[test]
    fn once_trigger_reports_a_single_time() {
        let mut engine = engine_with_one_task(5);
        engine.start_task("t1").unwrap();

        let mut trigger = ProgressTrigger::new("t1", 1, true);
        assert!(trigger.fire(&mut engine).unwrap());
        assert!(!trigger.fire(&mut engine).unwrap());
        assert_eq!(engine.task_state("t1").unwrap().current_progress, 1);
    }

    #[test]
    fn repeatable_trigger_reports_every_time() {
        let mut engine = engine_with_one_task(5);
        engine.start_task("t1").unwrap();

        let mut trigger = ProgressTrigger::new("t1", 1, false);
        trigger.fire(&mut engine).unwrap();
        trigger.fire(&mut engine).unwrap();
        trigger.fire(&mut engine).unwrap();
        assert_eq!(engine.task_state("t1").unwrap().current_progress, 3);
    }

    #[test]
    fn rearm_unlatches_a_once_trigger() {
        let mut engine = engine_with_one_task(5);
        engine.start_task("t1").unwrap();

        let mut trigger = ProgressTrigger::new("t1", 2, true);
        trigger.fire(&mut engine).unwrap();
        trigger.rearm();
        assert!(trigger.fire(&mut engine).unwrap());
        assert_eq!(engine.task_state("t1").unwrap().current_progress, 4);
    }

    #[test]
    fn unknown_target_propagates_without_latching() {
        let mut engine = engine_with_one_task(5);
        let mut trigger = ProgressTrigger::new("ghost", 1, true);
        assert!(trigger.fire(&mut engine).is_err());
        assert!(!trigger.has_fired());
    }
}
