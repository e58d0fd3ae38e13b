use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use spray_core::extract::{extract_samples, parse_event_log, write_tick_log};
use tracing::{info, warn};

#[derive(Clone, Debug)]
pub struct ExtractOutcome {
    pub tick_log: String,
    pub rows: usize,
    pub shots: usize,
    pub players: usize,
}

/// Reads a replay event log (JSON) and builds the tick log the plotter consumes.
pub fn run_extract(events: &Path) -> Result<ExtractOutcome> {
    let raw = fs::read_to_string(events)
        .with_context(|| format!("failed reading event log {}", events.display()))?;
    let log = parse_event_log(&raw)
        .with_context(|| format!("failed decoding event log {}", events.display()))?;

    let samples = extract_samples(&log);
    if samples.is_empty() {
        warn!(events = %events.display(), "event log produced no rifle samples");
    }

    let players: BTreeSet<&str> = samples.iter().map(|s| s.player.as_str()).collect();
    let outcome = ExtractOutcome {
        tick_log: write_tick_log(&samples),
        rows: samples.len(),
        shots: samples.iter().filter(|s| s.is_shot).count(),
        players: players.len(),
    };
    info!(
        rows = outcome.rows,
        shots = outcome.shots,
        players = outcome.players,
        "extracted tick log"
    );
    Ok(outcome)
}
