/*
[INPUT]:  Loaded catalog + user choices via CLI prompts
[OUTPUT]: Engine operations driven interactively, state printed per step
[POS]:    CLI interactive flow
[UPDATE]: When adding interactive operations
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use questline_engine::{TaskEngine, TaskStatus};

pub fn run_play(engine: &mut TaskEngine, start: Option<&str>) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!("{}", style("Questline interactive session").bold().cyan());

    match start {
        Some(task_id) => engine.start_task(task_id).context("start requested task")?,
        None => {
            let first = engine
                .catalog()
                .first_task()
                .map(|node| node.id.clone())
                .context("catalog is empty")?;
            engine.start_task(&first).context("start first task")?;
        }
    }

    loop {
        let actions = vec![
            "Advance active task",
            "Request completion",
            "Complete active task (pick branch)",
            "Show status",
            "Reset all",
            "Quit",
        ];
        let selection = Select::with_theme(&theme)
            .with_prompt("Select action")
            .items(&actions)
            .default(0)
            .interact()?;

        match selection {
            0 => advance_active(engine, &theme)?,
            1 => {
                if !engine.request_completion() {
                    println!("{}", style("Still blocked or nothing active.").yellow());
                }
            }
            2 => complete_active(engine, &theme)?,
            3 => print_status(engine),
            4 => {
                engine.reset_all();
                println!("{}", style("All tasks reset.").yellow());
            }
            _ => return Ok(()),
        }
    }
}

fn advance_active(engine: &mut TaskEngine, theme: &ColorfulTheme) -> Result<()> {
    let Some(task_id) = engine.active_task().map(str::to_string) else {
        println!("{}", style("No active task.").yellow());
        return Ok(());
    };
    let amount: i64 = Input::with_theme(theme)
        .with_prompt(format!("Progress amount for {task_id}"))
        .default(1)
        .interact_text()?;
    engine.advance_progress(&task_id, amount)?;
    Ok(())
}

fn complete_active(engine: &mut TaskEngine, theme: &ColorfulTheme) -> Result<()> {
    let Some(task_id) = engine.active_task().map(str::to_string) else {
        println!("{}", style("No active task.").yellow());
        return Ok(());
    };
    let node = engine
        .catalog()
        .get(&task_id)
        .cloned()
        .context("active task missing from catalog")?;

    let branch = if node.branches.is_empty() {
        None
    } else {
        let mut items: Vec<String> = node
            .branches
            .iter()
            .map(|b| b.label.clone())
            .collect();
        items.push("(default successor)".to_string());
        let picked = Select::with_theme(theme)
            .with_prompt("Outcome")
            .items(&items)
            .default(0)
            .interact()?;
        (picked < node.branches.len()).then_some(picked)
    };

    engine.complete_task(&task_id, branch)?;
    Ok(())
}

fn print_status(engine: &TaskEngine) {
    let active = engine.active_task().unwrap_or("-");
    println!("{} {}", style("active:").bold(), active);
    let task_ids: Vec<String> = engine.catalog().task_ids().map(str::to_string).collect();
    for task_id in task_ids {
        let Some(state) = engine.task_state(&task_id) else {
            continue;
        };
        let Some(node) = engine.catalog().get(&task_id) else {
            continue;
        };
        let status = match state.status {
            TaskStatus::NotStarted => style("not started").dim(),
            TaskStatus::InProgress => style("in progress").yellow(),
            TaskStatus::Completed => style("completed").green(),
            TaskStatus::Failed => style("failed").red(),
        };
        println!(
            "  {:<24} {} {}/{}",
            task_id, status, state.current_progress, node.total_progress
        );
    }
}
