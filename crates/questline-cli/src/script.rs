/*
[INPUT]:  YAML script file of external stimuli (start/advance/complete steps)
[OUTPUT]: Engine calls replayed in order
[POS]:    CLI playback layer - scripted quest walkthroughs
[UPDATE]: When adding script step kinds
*/

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use questline_engine::TaskEngine;

/// Serialized walkthrough: an ordered list of stimuli to replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptFile {
    pub steps: Vec<ScriptStep>,
}

/// One external stimulus, tagged the same way catalog conditions and actions
/// are (`op: start`, `op: advance`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ScriptStep {
    Start {
        task: String,
    },
    Advance {
        task: String,
        #[serde(default = "default_amount")]
        amount: i64,
    },
    RequestCompletion,
    Complete {
        task: String,
        #[serde(default)]
        branch: Option<usize>,
    },
    Reset {
        task: String,
    },
}

fn default_amount() -> i64 {
    1
}

pub fn load_script(path: &Path) -> Result<ScriptFile> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("read script {}", path.display()))?;
    serde_yaml::from_str(&contents).context("parse script")
}

/// Replay every step against the engine. A step that names an unknown task
/// aborts playback with that step's index in the error context.
pub fn run_script(engine: &mut TaskEngine, script: &ScriptFile) -> Result<()> {
    for (index, step) in script.steps.iter().enumerate() {
        apply_step(engine, step).with_context(|| format!("script step {index}"))?;
    }
    Ok(())
}

fn apply_step(engine: &mut TaskEngine, step: &ScriptStep) -> Result<()> {
    match step {
        ScriptStep::Start { task } => engine.start_task(task)?,
        ScriptStep::Advance { task, amount } => engine.advance_progress(task, *amount)?,
        ScriptStep::RequestCompletion => {
            let completed = engine.request_completion();
            info!(completed, "completion requested");
        }
        ScriptStep::Complete { task, branch } => engine.complete_task(task, *branch)?,
        ScriptStep::Reset { task } => engine.reset_task(task)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_engine::{TaskCatalog, TaskStatus};

    #[test]
    fn steps_deserialize_with_defaults() {
        let yaml = r#"
steps:
  - op: start
    task: t1
  - op: advance
    task: t1
  - op: request_completion
  - op: complete
    task: t1
"#;
        let script: ScriptFile = serde_yaml::from_str(yaml).expect("valid script");
        assert_eq!(script.steps.len(), 4);
        assert!(matches!(
            script.steps[1],
            ScriptStep::Advance { ref task, amount: 1 } if task == "t1"
        ));
        assert!(matches!(
            script.steps[3],
            ScriptStep::Complete { branch: None, .. }
        ));
    }

    #[test]
    fn playback_walks_the_catalog() {
        let catalog = TaskCatalog::from_yaml_str(
            "tasks:\n  - id: t1\n    total_progress: 2\n    default_next_task: t2\n  - id: t2\n",
        )
        .expect("valid catalog");
        let mut engine = TaskEngine::new(catalog);

        let script: ScriptFile = serde_yaml::from_str(
            "steps:\n  - op: start\n    task: t1\n  - op: advance\n    task: t1\n    amount: 2\n",
        )
        .expect("valid script");

        run_script(&mut engine, &script).expect("playback succeeds");
        assert_eq!(engine.task_state("t1").unwrap().status, TaskStatus::Completed);
        assert_eq!(engine.active_task(), Some("t2"));
    }

    #[test]
    fn unknown_task_aborts_with_step_context() {
        let catalog = TaskCatalog::from_yaml_str("tasks:\n  - id: t1\n").expect("valid catalog");
        let mut engine = TaskEngine::new(catalog);
        let script: ScriptFile =
            serde_yaml::from_str("steps:\n  - op: start\n    task: ghost\n").expect("valid script");

        let err = run_script(&mut engine, &script).unwrap_err();
        assert!(format!("{err:#}").contains("script step 0"));
    }
}
