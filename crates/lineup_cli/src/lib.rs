//! Lineup CLI Library
//!
//! File loading and text rendering around the lineup engine: reads roster
//! and lineup snapshot files, builds an engine, and formats candidate lists
//! and validation reports for the terminal.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use lineup_core::{
    BenchRules, CandidateGroup, Formation, Lineup, LineupEngine, LineupReport, Player, Roster,
    SlotKind, SlotRef, SwapGroup, SwapSource,
};

/// Read a roster file: a JSON array of player records.
pub fn load_players(path: &Path) -> Result<Vec<Player>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse roster file: {}", path.display()))
}

/// Read a lineup snapshot file produced by a previous session.
pub fn load_snapshot(path: &Path) -> Result<Lineup> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read lineup file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse lineup file: {}", path.display()))
}

/// Parse a bench limit override of the form `P,D,C,A`, e.g. `1,3,3,3`.
pub fn parse_limits(spec: &str) -> Result<BenchRules> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        bail!("Bench limits must be four comma-separated counts (P,D,C,A), got: {}", spec);
    }
    let mut counts = [0u8; 4];
    for (count, part) in counts.iter_mut().zip(&parts) {
        *count = part.parse().with_context(|| format!("Invalid bench limit: {}", part))?;
    }
    Ok(BenchRules::new(counts[0], counts[1], counts[2], counts[3]))
}

/// Build an engine from CLI arguments.
///
/// A lineup snapshot, when given, fixes the formation; otherwise the engine
/// starts empty in `formation` (default 4-3-3).
pub fn build_engine(
    roster_path: &Path,
    lineup_path: Option<&Path>,
    formation: Option<&str>,
    limits: Option<&str>,
) -> Result<LineupEngine> {
    let players = load_players(roster_path)?;
    let roster = Roster::new(players)?;
    let rules = match limits {
        Some(spec) => parse_limits(spec)?,
        None => BenchRules::default(),
    };

    if let Some(path) = lineup_path {
        let snapshot = load_snapshot(path)?;
        return Ok(LineupEngine::from_snapshot(roster, rules, snapshot)?);
    }

    let mut engine = LineupEngine::new(roster, rules);
    if let Some(code) = formation {
        engine = engine.with_formation(code.parse::<Formation>()?);
    }
    Ok(engine)
}

/// Render the lineup slot-by-slot with player names and clubs.
pub fn render_lineup(engine: &LineupEngine) -> String {
    let mut out = format!("Formation: {}\n", engine.formation().code());
    for kind in SlotKind::ALL {
        for index in 0..engine.lineup().len_of(kind) {
            let slot = SlotRef::new(kind, index);
            let label = match
                engine.lineup().occupant(slot).and_then(|id| engine.roster().get(id))
            {
                Some(player) => format!("{} ({})", player.name, player.club),
                None => "(empty)".to_string(),
            };
            out.push_str(&format!("  {:<5} {}\n", slot.to_string(), label));
        }
    }
    out.push_str("Bench usage:");
    for count in engine.bench_role_counts() {
        out.push_str(&format!(" {} {}/{}", count.role.abbreviation(), count.used, count.limit));
    }
    out.push('\n');
    out
}

/// Render a matchday validation report.
pub fn render_report(report: &LineupReport) -> String {
    if report.is_valid() {
        return "✅ Lineup is ready for submission\n".to_string();
    }
    let mut out = String::new();
    for violation in &report.violations {
        out.push_str(&format!("❌ {}\n", violation.describe()));
    }
    out
}

/// Render placement candidate groups in presentation order.
pub fn render_candidates(groups: &[CandidateGroup]) -> String {
    if groups.is_empty() {
        return "No eligible players\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!("{}:\n", group.role.display_name()));
        for player in &group.players {
            out.push_str(&format!(
                "  {:>4}  {} ({}) fvm {}\n",
                player.id.to_string(),
                player.name,
                player.club,
                player.fvm
            ));
        }
    }
    out
}

/// Render swap candidate groups with their source labels.
pub fn render_swap_groups(groups: &[SwapGroup]) -> String {
    if groups.is_empty() {
        return "No eligible swap partners\n".to_string();
    }
    let mut out = String::new();
    for group in groups {
        let label = match group.source {
            SwapSource::Starters => "Starters",
            SwapSource::Bench => "Bench",
            SwapSource::Unassigned => "Unassigned",
        };
        out.push_str(&format!("{}:\n", label));
        for player in &group.players {
            out.push_str(&format!(
                "  {:>4}  {} ({}) {}\n",
                player.id.to_string(),
                player.name,
                player.club,
                player.role.abbreviation()
            ));
        }
    }
    out
}
