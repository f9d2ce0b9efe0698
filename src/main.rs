/*!
 * schedsim - Command Line Entry Point
 *
 * Reads a JSON workload, runs the simulator and prints JSON to stdout:
 * - run: one policy (flag, workload file, or the adaptive pick)
 * - recommend: adaptive selector output
 * - compare: every policy side by side
 */

use anyhow::Context;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use sched_sim::{
    compare_all, init_tracing, AdaptiveSelector, Process, Scheduler, SchedulingPolicy, TimeQuantum,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "schedsim")]
#[command(about = "Deterministic CPU scheduling simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Compact single-line JSON instead of pretty output
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate one policy over the workload
    Run {
        /// Workload file: {"processes": [...], "policy": {...}}
        workload: PathBuf,

        /// Policy name (fcfs, sjf, srtf, rr, priority, priority_aging, mlfq)
        #[arg(short, long)]
        policy: Option<String>,

        /// Round Robin time quantum in ms
        #[arg(short, long)]
        quantum: Option<u64>,

        /// Drop the event log from the output
        #[arg(long, default_value_t = false)]
        no_events: bool,
    },
    /// Recommend a policy for the workload
    Recommend { workload: PathBuf },
    /// Run every policy and rank by average waiting time
    Compare { workload: PathBuf },
}

/// Input file format
#[derive(Debug, Deserialize)]
struct Workload {
    processes: Vec<Process>,
    #[serde(default)]
    policy: Option<SchedulingPolicy>,
}

fn load_workload(path: &Path) -> anyhow::Result<Workload> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading workload {}", path.display()))?;
    let mut workload: Workload = serde_json::from_str(&raw)
        .with_context(|| format!("parsing workload {}", path.display()))?;
    for process in &mut workload.processes {
        process.reset();
    }
    Ok(workload)
}

/// Pick the policy for `run`: flag, then workload file, then the selector
fn resolve_policy(
    flag: Option<&str>,
    quantum: Option<u64>,
    workload: &Workload,
) -> miette::Result<SchedulingPolicy> {
    let policy = match (flag, &workload.policy) {
        (Some(name), _) => SchedulingPolicy::from_name(name)?,
        (None, Some(policy)) => policy.clone(),
        (None, None) => AdaptiveSelector::new().recommend(&workload.processes).policy,
    };

    match (policy, quantum) {
        (SchedulingPolicy::RoundRobin { .. }, Some(q)) => Ok(SchedulingPolicy::RoundRobin {
            time_quantum: TimeQuantum::new(q)?,
        }),
        (_, Some(_)) => Err(miette::miette!("--quantum only applies to Round Robin")),
        (policy, None) => Ok(policy),
    }
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> miette::Result<()> {
    let out = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };
    println!("{}", out.into_diagnostic()?);
    Ok(())
}

fn main() -> miette::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let load = |path: &Path| load_workload(path).map_err(|e| miette::miette!("{:#}", e));

    match cli.command {
        Command::Run {
            workload,
            policy,
            quantum,
            no_events,
        } => {
            let workload = load(&workload)?;
            let policy = resolve_policy(policy.as_deref(), quantum, &workload)?;
            info!(policy = %policy, processes = workload.processes.len(), "Running simulation");

            let mut result = policy.schedule(&workload.processes)?;
            if no_events {
                result.events.clear();
            }
            print_json(&result, cli.compact)
        }
        Command::Recommend { workload } => {
            let workload = load(&workload)?;
            let recommendation = AdaptiveSelector::new().recommend(&workload.processes);
            print_json(&recommendation, cli.compact)
        }
        Command::Compare { workload } => {
            let workload = load(&workload)?;
            let comparison = compare_all(&workload.processes)?;
            print_json(&comparison, cli.compact)
        }
    }
}
