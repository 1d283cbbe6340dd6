use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use waylog_core::{duplicate_edges, Config, EdgeStatus, FileStorage, LogData, LogManager};

#[derive(Parser)]
#[command(name = "waylog")]
#[command(about = "Reconcile exported movement logs into a connectivity graph", long_about = None)]
struct Cli {
    /// Path to a config file (defaults to waylog.toml, then user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize connections and edge statuses
    Report {
        /// Only show connections leaving this scene
        #[arg(long)]
        scene: Option<String>,
        /// Print the resolved snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List repeat observations that are safe to delete
    Duplicates {
        /// Require identical raw action/state sets
        #[arg(long)]
        exact: bool,
    },
    /// Delete exact repeat observations and write the tables back
    Prune,
    /// Mark a connection as ignored, or clear it
    Ignore {
        /// Source node key, e.g. "GardenVillage/Well"
        source: String,
        /// Target node key
        target: String,
        /// Remove the pair from the ignored list instead
        #[arg(long)]
        clear: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    let storage = FileStorage::with_config(config.storage.clone());
    let mut manager = LogManager::load(storage)?;

    match cli.command {
        Commands::Report { scene, json } => report(&manager.snapshot(), scene.as_deref(), json)?,
        Commands::Duplicates { exact } => duplicates(&manager.snapshot(), exact),
        Commands::Prune => {
            let snapshot = manager.snapshot();
            let keys: HashSet<String> = duplicate_edges(&snapshot.edges, true)
                .into_iter()
                .map(|e| e.key)
                .collect();
            let removed = manager.delete_edges(&keys);
            manager.save()?;
            println!("Removed {removed} duplicate edges");
        }
        Commands::Ignore {
            source,
            target,
            clear,
        } => {
            manager.set_connection_ignored(&source, &target, !clear);
            manager.save()?;
            let verb = if clear { "Cleared" } else { "Ignored" };
            println!("{verb} {source} -> {target}");
        }
    }
    Ok(())
}

fn duplicates(data: &LogData, exact: bool) {
    let duplicates = duplicate_edges(&data.edges, exact);
    for edge in &duplicates {
        let actions = edge.actions.iter().cloned().collect::<Vec<_>>().join(",");
        println!(
            "{}  {} -> {}  rt={}  [{actions}]",
            edge.key, edge.source_node, edge.target_node, edge.real_time
        );
    }
    println!("{} deletable edges", duplicates.len());
}

#[derive(Default)]
struct ConnectionSummary {
    active: usize,
    redundant: usize,
    rejected: usize,
    unverified: usize,
    ignored: bool,
}

fn report(data: &LogData, scene: Option<&str>, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(data)?);
        return Ok(());
    }

    let mut connections: BTreeMap<(String, String), ConnectionSummary> = BTreeMap::new();
    for edge in &data.edges {
        if let Some(scene) = scene {
            if edge.source_scene != scene {
                continue;
            }
        }
        let summary = connections
            .entry((edge.source_node.clone(), edge.target_node.clone()))
            .or_default();
        match edge.status {
            EdgeStatus::Active => summary.active += 1,
            EdgeStatus::Redundant => summary.redundant += 1,
            EdgeStatus::Rejected => summary.rejected += 1,
            EdgeStatus::Unverified => summary.unverified += 1,
        }
        summary.ignored |= edge.ignored;
    }

    for ((source, target), summary) in &connections {
        let total = summary.active + summary.redundant + summary.rejected + summary.unverified;
        let mut line = format!(
            "{source} -> {target}: {total} edges ({} active, {} redundant",
            summary.active, summary.redundant
        );
        if summary.rejected > 0 {
            line.push_str(&format!(", {} rejected", summary.rejected));
        }
        line.push(')');
        if summary.ignored {
            line.push_str("  [ignored]");
        }
        println!("{line}");
    }
    println!(
        "{} connections, {} edges, {} nodes",
        connections.len(),
        data.edges.len(),
        data.nodes.len()
    );
    Ok(())
}
