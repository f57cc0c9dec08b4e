/*
[INPUT]:  Interactive user input via CLI
[OUTPUT]: Generated YAML starter catalog
[POS]:    CLI initialization layer
[UPDATE]: When the catalog schema changes
*/

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, theme::ColorfulTheme};
use std::path::PathBuf;

use questline_engine::{CatalogFile, TaskCatalog, TaskNode};

pub fn run_init(output: PathBuf) -> Result<()> {
    println!("{}", style("Questline catalog init").bold().cyan());
    println!(
        "{}",
        style("This will guide you through creating a starter task catalog.").dim()
    );

    let theme = ColorfulTheme::default();
    let mut tasks: Vec<TaskNode> = Vec::new();

    loop {
        let ordinal = tasks.len() + 1;
        println!("\n{}", style(format!("--- Task {ordinal} ---")).bold());

        let id: String = Input::with_theme(&theme)
            .with_prompt("Task ID (e.g., find-the-key)")
            .default(format!("task-{ordinal}"))
            .interact_text()?;

        let name: String = Input::with_theme(&theme)
            .with_prompt("Display name")
            .default(id.clone())
            .interact_text()?;

        let total_progress: i64 = Input::with_theme(&theme)
            .with_prompt("Progress target (>= 1)")
            .default(1)
            .interact_text()?;

        let next: String = Input::with_theme(&theme)
            .with_prompt("Default successor task ID (empty for none)")
            .allow_empty(true)
            .interact_text()?;

        tasks.push(TaskNode {
            id,
            name,
            description: String::new(),
            conditions: vec![],
            on_start: vec![],
            on_complete: vec![],
            total_progress,
            branches: vec![],
            default_next_task: (!next.is_empty()).then_some(next),
        });

        let more = Confirm::with_theme(&theme)
            .with_prompt("Add another task?")
            .default(false)
            .interact()?;
        if !more {
            break;
        }
    }

    // Round-trip through the validator so a scaffold never writes a catalog
    // the engine would reject.
    TaskCatalog::new(tasks.clone()).context("scaffolded catalog failed validation")?;

    let file = CatalogFile { tasks };
    let yaml = serde_yaml::to_string(&file).context("serialize catalog")?;
    std::fs::write(&output, yaml)
        .with_context(|| format!("write catalog {}", output.display()))?;

    println!(
        "\n{} {}",
        style("Catalog written to").green(),
        style(output.display()).bold()
    );
    println!(
        "{}",
        style("Add conditions, actions, and branches by editing the file.").dim()
    );
    Ok(())
}
