/*
[INPUT]:  CLI arguments, YAML catalog and script files
[OUTPUT]: Validated catalogs and engine sessions with printed lifecycle
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or subcommands
*/

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use console::style;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use questline_engine::{TaskCatalog, TaskEngine, TaskEvent};

mod cli;
mod script;

#[derive(Parser, Debug)]
#[command(name = "questline", version, about = "Quest/task progression engine runner")]
struct Cli {
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a catalog and report whether it validates
    Validate {
        #[arg(long = "catalog", value_name = "PATH")]
        catalog: PathBuf,
    },
    /// Replay a scripted list of stimuli against a catalog
    Run {
        #[arg(long = "catalog", value_name = "PATH")]
        catalog: PathBuf,
        #[arg(long = "script", value_name = "PATH")]
        script: PathBuf,
        /// Task to start before playback (defaults to none; scripts usually
        /// start their own)
        #[arg(long = "start", value_name = "TASK_ID")]
        start: Option<String>,
    },
    /// Drive a session interactively
    Play {
        #[arg(long = "catalog", value_name = "PATH")]
        catalog: PathBuf,
        /// Task to start with (defaults to the first in the catalog)
        #[arg(long = "start", value_name = "TASK_ID")]
        start: Option<String>,
    },
    /// Scaffold a starter catalog
    Init {
        #[arg(long = "output", value_name = "PATH", default_value = "catalog.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    match args.command {
        Command::Validate { catalog } => validate(&catalog),
        Command::Run {
            catalog,
            script,
            start,
        } => run(&catalog, &script, start.as_deref()),
        Command::Play { catalog, start } => {
            let mut engine = load_engine(&catalog)?;
            cli::play::run_play(&mut engine, start.as_deref())
        }
        Command::Init { output } => cli::init::run_init(output),
    }
}

fn validate(path: &Path) -> Result<()> {
    let catalog = TaskCatalog::from_file(path)
        .with_context(|| format!("catalog {}", path.display()))?;
    println!(
        "{} {} ({} tasks)",
        style("valid:").green().bold(),
        path.display(),
        catalog.len()
    );
    for task_id in catalog.task_ids() {
        println!("  {task_id}");
    }
    Ok(())
}

fn run(catalog_path: &Path, script_path: &Path, start: Option<&str>) -> Result<()> {
    let mut engine = load_engine(catalog_path)?;
    if let Some(task_id) = start {
        engine.start_task(task_id).context("start requested task")?;
    }
    let script = script::load_script(script_path)?;
    info!(steps = script.steps.len(), "replaying script");
    script::run_script(&mut engine, &script)?;

    match engine.active_task() {
        Some(task_id) => println!("{} {task_id}", style("session ended, active:").bold()),
        None => println!("{}", style("session ended, no active task").bold()),
    }
    Ok(())
}

fn load_engine(catalog_path: &Path) -> Result<TaskEngine> {
    let catalog = TaskCatalog::from_file(catalog_path)
        .with_context(|| format!("catalog {}", catalog_path.display()))?;
    info!(tasks = catalog.len(), "catalog loaded");

    let mut engine = TaskEngine::new(catalog);
    engine.subscribe(|event| match event {
        TaskEvent::Started { task_id } => {
            println!("{} {task_id}", style("started ").green().bold());
        }
        TaskEvent::Updated {
            task_id,
            current_progress,
            total_progress,
        } => {
            println!(
                "{} {task_id} {current_progress}/{total_progress}",
                style("updated ").yellow()
            );
        }
        TaskEvent::Completed { task_id } => {
            println!("{} {task_id}", style("complete").cyan().bold());
        }
    });
    Ok(engine)
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
