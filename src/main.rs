use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use mycoplan::config::{Config, UnknownDependencyPolicy};
use mycoplan::{mlog, mlog_debug, Result, Scheduler, WorkflowRequest, WorkflowTask};

/// mycoplan - turn interdependent cultivation tasks into a serial schedule
#[derive(Parser, Debug)]
#[command(name = "mycoplan")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    MYCOPLAN_DEBUG=1     Enable debug logging (alternative to --debug)")]
pub struct Cli {
    /// Enable debug logging (writes to ~/.mycoplan/mycoplan.log)
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Read configuration from this file instead of ~/.mycoplan/mycoplan.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build a schedule proposal and print it as JSON
    Schedule {
        /// JSON file with an array of workflow tasks
        #[arg(long)]
        tasks: PathBuf,

        /// JSON file with the workflow request
        #[arg(long)]
        request: PathBuf,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Distribute tasks without a room across this many rooms
        #[arg(long)]
        rooms: Option<usize>,

        /// Fail on dependencies that name no task
        #[arg(long)]
        strict: bool,

        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Validate the task graph and print the scheduling order
    Order {
        /// JSON file with an array of workflow tasks
        #[arg(long)]
        tasks: PathBuf,

        /// Fail on dependencies that name no task
        #[arg(long)]
        strict: bool,
    },

    /// Print the effective configuration
    Config {
        /// Save the effective configuration to the config path
        #[arg(long)]
        write: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    mycoplan::log::init_with_debug(cli.debug);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Schedule {
            tasks,
            request,
            start,
            rooms,
            strict,
            compact,
        } => run_schedule(config, &tasks, &request, &start, rooms, strict, compact),
        Command::Order { tasks, strict } => run_order(config, &tasks, strict),
        Command::Config { write } => run_config(&config, cli.config.as_deref(), write),
    }
}

fn run_schedule(
    mut config: Config,
    tasks_path: &Path,
    request_path: &Path,
    start: &str,
    rooms: Option<usize>,
    strict: bool,
    compact: bool,
) -> Result<()> {
    mlog!(
        "Schedule command: tasks={}, request={}, start={}, rooms={:?}, strict={}",
        tasks_path.display(),
        request_path.display(),
        start,
        rooms,
        strict
    );
    if strict {
        config.unknown_dependencies = UnknownDependencyPolicy::Reject;
    }
    let room_count = rooms.or(config.default_room_count);

    let tasks: Vec<WorkflowTask> = read_json(tasks_path)?;
    let request: WorkflowRequest = read_json(request_path)?;

    let scheduler = Scheduler::new(config)?;
    let mut proposal = scheduler.create_schedule_proposal(&tasks, &request, start)?;
    if let Some(count) = room_count {
        proposal = proposal.with_rooms(count)?;
    }

    let output = if compact {
        serde_json::to_string(&proposal)?
    } else {
        serde_json::to_string_pretty(&proposal)?
    };
    println!("{}", output);
    Ok(())
}

fn run_order(mut config: Config, tasks_path: &Path, strict: bool) -> Result<()> {
    mlog!("Order command: tasks={}, strict={}", tasks_path.display(), strict);
    if strict {
        config.unknown_dependencies = UnknownDependencyPolicy::Reject;
    }

    let tasks: Vec<WorkflowTask> = read_json(tasks_path)?;
    let scheduler = Scheduler::new(config)?;
    for task in scheduler.sequence(&tasks)? {
        println!("{}", task.task_id);
    }
    Ok(())
}

fn run_config(config: &Config, path: Option<&Path>, write: bool) -> Result<()> {
    print!("{}", toml::to_string_pretty(config)?);
    if write {
        match path {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        let shown = match path {
            Some(path) => path.to_path_buf(),
            None => Config::config_path()?,
        };
        eprintln!("Saved configuration to {}", shown.display());
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    mlog_debug!("Reading {}", path.display());
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
