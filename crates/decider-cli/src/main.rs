//! Decider CLI - drive behavior trees from the command line.
//!
//! - `decider run` - tick the built-in guard scenario and print the active path each tick
//! - `decider tree` - print the structure of the guard tree
//! - `decider config` - print the default configuration as YAML

mod config;
mod demo;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use decider_bt::{BehaviorTree, Task};
use decider_core::{AgentData, TickContext};
use decider_tools::{TraceLog, TRACE_LOG};

use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "decider")]
#[command(about = "Priority-arbitrated behavior tree runner", version)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the guard scenario
    Run {
        /// Override the configured number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Print the arbitration trace after the run
        #[arg(long)]
        trace: bool,
    },

    /// Print the guard tree
    Tree,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    match cli.command {
        Some(Commands::Run { ticks, trace }) => run_demo(config, ticks, trace),
        Some(Commands::Tree) => {
            print_tree(demo::guard_tree().as_ref(), 0);
            Ok(())
        }
        Some(Commands::Config) => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
        None => {
            println!("Decider - behavior tree runner");
            println!();
            println!("Usage: decider <COMMAND>");
            println!();
            println!("Commands:");
            println!("  run     Tick the guard scenario");
            println!("  tree    Print the guard tree");
            println!("  config  Print the effective configuration");
            println!();
            println!("Run 'decider --help' for more information.");
            Ok(())
        }
    }
}

fn run_demo(config: CliConfig, ticks: Option<u64>, show_trace: bool) -> Result<()> {
    let demo_config = config.demo;
    let ticks = ticks.unwrap_or(demo_config.ticks);
    tracing::info!(
        ticks,
        max_task_levels = config.engine.max_task_levels,
        "Starting guard scenario"
    );

    let tree = BehaviorTree::new(demo::guard_tree());
    let mut agent = AgentData::with_config(config.engine);
    demo::prepare(&mut agent, &demo_config);
    agent.blackboard.set(TRACE_LOG, TraceLog::default());

    let changes = Rc::new(Cell::new(0u64));
    let observed = Rc::clone(&changes);
    agent.on_active_tasks_changed(move |_| observed.set(observed.get() + 1));

    let mut ctx = TickContext::new(0, demo_config.dt_seconds);
    for _ in 0..ticks {
        demo::advance_world(&mut agent, &demo_config, ctx.tick);
        let status = tree.tick(&mut agent, ctx)?;

        let path = tree
            .active_tasks(&agent)
            .map(|active| active.names().join(" > "))
            .unwrap_or_else(|| "-".to_string());
        let health = agent.blackboard.try_get(demo::HEALTH).copied().unwrap_or(0.0);
        println!(
            "tick {:>4}  {:<8}  hp {:>5.1}  {}",
            ctx.tick,
            format!("{status:?}"),
            health,
            path
        );
        ctx = ctx.next();
    }

    let log = agent.blackboard.remove(TRACE_LOG).unwrap_or_default();
    tracing::info!(
        active_set_changes = changes.get(),
        interrupts = log.count("selector.interrupt"),
        takeovers = log.count("selector.takeover"),
        successes = log.count("selector.success"),
        "Scenario complete"
    );

    if show_trace {
        for event in &log.events {
            println!("{:>4}  {:<20} {} -> {}", event.tick, event.tag, event.a, event.b);
        }
    }
    Ok(())
}

fn print_tree(task: &dyn Task, depth: usize) {
    println!("{:indent$}{}", "", task.name(), indent = depth * 2);
    for child in task.children() {
        print_tree(child.as_ref(), depth + 1);
    }
}
