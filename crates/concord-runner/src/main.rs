use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use concord_core::config::ConcordConfig;
use concord_runner::bootstrap::{build_orchestrator, open_reputation};

/// Concord - compare two diagnostic agents on clinical notes
#[derive(Parser, Debug)]
#[command(name = "concord")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    CONCORD_LOG     Log filter, overrides observability.log_level")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the experiment loop
    Run {
        /// Path to the TOML configuration
        #[arg(long, short = 'c')]
        config: PathBuf,

        /// Override experiment.iterations
        #[arg(long)]
        iterations: Option<usize>,

        /// Override experiment.seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print stored agent reputations and the current best agent
    Reputation {
        /// Path to the TOML configuration
        #[arg(long, short = 'c')]
        config: PathBuf,
    },
}

fn load_config(path: &PathBuf) -> Result<ConcordConfig> {
    ConcordConfig::load(path).with_context(|| format!("loading config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            config,
            iterations,
            seed,
        } => {
            let mut config = load_config(&config)?;
            if let Some(iterations) = iterations {
                config.experiment.iterations = iterations;
            }
            if seed.is_some() {
                config.experiment.seed = seed;
            }
            concord_observability::init_from_config(&config.observability);

            let mut orchestrator =
                build_orchestrator(&config).context("assembling the experiment")?;
            let report = orchestrator.run().context("experiment aborted")?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Reputation { config } => {
            let config = load_config(&config)?;
            concord_observability::init_from_config(&config.observability);

            let tracker = open_reputation(&config).with_context(|| {
                format!(
                    "opening reputation store {}",
                    config.storage.reputation_path().display()
                )
            })?;
            for (agent, record) in tracker.snapshot() {
                println!(
                    "{agent}\taccepted={}\ttotal={}\treputation={:.3}",
                    record.accepted,
                    record.total,
                    record.reputation()
                );
            }
            match tracker.best_agent() {
                Some(best) => println!("best agent: {best}"),
                None => println!("best agent: none"),
            }
        }
    }
    Ok(())
}
