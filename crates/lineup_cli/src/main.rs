//! Lineup CLI
//!
//! Terminal front-end for the lineup engine: validates saved lineups and
//! lists placement or swap candidates from roster files.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "lineup_cli")]
#[command(about = "Validate and inspect fantasy football lineups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a saved lineup against matchday submission rules
    Validate {
        /// Roster JSON file (array of player records)
        #[arg(long)]
        roster: PathBuf,

        /// Lineup snapshot JSON file
        #[arg(long)]
        lineup: PathBuf,

        /// Bench limits as P,D,C,A (default 1,3,3,3)
        #[arg(long)]
        limits: Option<String>,
    },

    /// List eligible players for one slot, grouped by role
    Candidates {
        /// Roster JSON file (array of player records)
        #[arg(long)]
        roster: PathBuf,

        /// Lineup snapshot JSON file (defaults to an empty lineup)
        #[arg(long)]
        lineup: Option<PathBuf>,

        /// Formation code for an empty lineup, e.g. "3-5-2"
        #[arg(long)]
        formation: Option<String>,

        /// Bench limits as P,D,C,A (default 1,3,3,3)
        #[arg(long)]
        limits: Option<String>,

        /// Target slot, written KIND[:INDEX], e.g. "D:2" or "GK"
        #[arg(long)]
        slot: String,

        /// Case-insensitive name/club filter
        #[arg(long)]
        query: Option<String>,
    },

    /// List swap partners for one slot, grouped by current placement
    Swaps {
        /// Roster JSON file (array of player records)
        #[arg(long)]
        roster: PathBuf,

        /// Lineup snapshot JSON file (defaults to an empty lineup)
        #[arg(long)]
        lineup: Option<PathBuf>,

        /// Formation code for an empty lineup, e.g. "3-5-2"
        #[arg(long)]
        formation: Option<String>,

        /// Bench limits as P,D,C,A (default 1,3,3,3)
        #[arg(long)]
        limits: Option<String>,

        /// Target slot, written KIND[:INDEX], e.g. "B:0"
        #[arg(long)]
        slot: String,

        /// Case-insensitive name/club filter
        #[arg(long)]
        query: Option<String>,
    },

    /// Print a lineup slot-by-slot with its validation status
    Show {
        /// Roster JSON file (array of player records)
        #[arg(long)]
        roster: PathBuf,

        /// Lineup snapshot JSON file (defaults to an empty lineup)
        #[arg(long)]
        lineup: Option<PathBuf>,

        /// Formation code for an empty lineup, e.g. "3-5-2"
        #[arg(long)]
        formation: Option<String>,

        /// Bench limits as P,D,C,A (default 1,3,3,3)
        #[arg(long)]
        limits: Option<String>,
    },
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { roster, lineup, limits } => {
            let engine =
                lineup_cli::build_engine(&roster, Some(&lineup), None, limits.as_deref())?;
            let report = engine.validate_for_submission();

            print!("{}", lineup_cli::render_lineup(&engine));
            print!("{}", lineup_cli::render_report(&report));

            if !report.is_valid() {
                anyhow::bail!(
                    "Lineup failed validation with {} violation(s)",
                    report.violations.len()
                );
            }
        }

        Commands::Candidates { roster, lineup, formation, limits, slot, query } => {
            let engine = lineup_cli::build_engine(
                &roster,
                lineup.as_deref(),
                formation.as_deref(),
                limits.as_deref(),
            )?;
            let slot = parse_slot(&slot)?;
            let groups = match query.as_deref() {
                Some(query) => engine.search_candidates(slot, query)?,
                None => engine.list_candidates(slot)?,
            };

            println!("🔍 Candidates for {}:", slot);
            print!("{}", lineup_cli::render_candidates(&groups));
        }

        Commands::Swaps { roster, lineup, formation, limits, slot, query } => {
            let engine = lineup_cli::build_engine(
                &roster,
                lineup.as_deref(),
                formation.as_deref(),
                limits.as_deref(),
            )?;
            let slot = parse_slot(&slot)?;
            let groups = match query.as_deref() {
                Some(query) => engine.search_swap_candidates(slot, query)?,
                None => engine.list_swap_candidates(slot)?,
            };

            println!("🔍 Swap partners for {}:", slot);
            print!("{}", lineup_cli::render_swap_groups(&groups));
        }

        Commands::Show { roster, lineup, formation, limits } => {
            let engine = lineup_cli::build_engine(
                &roster,
                lineup.as_deref(),
                formation.as_deref(),
                limits.as_deref(),
            )?;

            print!("{}", lineup_cli::render_lineup(&engine));
            print!("{}", lineup_cli::render_report(&engine.validate_for_submission()));
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn parse_slot(spec: &str) -> Result<lineup_core::SlotRef> {
    spec.parse::<lineup_core::SlotRef>().map_err(|message| anyhow::anyhow!(message))
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("lineup_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
