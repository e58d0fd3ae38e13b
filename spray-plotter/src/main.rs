use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spray_core::constants::{GAP_THRESHOLD_DEFAULT, MIN_SHOTS_FOR_OUTPUT_DEFAULT};
use spray_core::{OutputFilter, SegmenterConfig};
use spray_plotter::plot::{run_plot, PlotConfig};
use spray_plotter::tick_log::run_extract;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spray-plotter")]
#[command(about = "Split replay tick logs into sprays and plot each spray's aim path")]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render one SVG per spray found in a tick log
    Plot {
        /// Tick log: player,tick,shot,hit,kill,yaw,pitch,weapon rows without header
        #[arg(long)]
        csv: PathBuf,
        /// Only consider samples from this player
        #[arg(long)]
        filter: Option<String>,
        /// Only plot the spray whose first shot is on this tick
        #[arg(long)]
        tick: Option<i64>,
        #[arg(long, default_value = "out")]
        out: PathBuf,
        /// Tick distance that ends a spray
        #[arg(long, default_value_t = GAP_THRESHOLD_DEFAULT)]
        gap: u64,
        #[arg(long, default_value_t = MIN_SHOTS_FOR_OUTPUT_DEFAULT)]
        min_shots: usize,
        /// Render only the first selected spray
        #[arg(long)]
        first_only: bool,
        #[arg(long)]
        jobs: Option<usize>,
    },
    /// Build a tick log from a replay event log (JSON)
    Extract {
        #[arg(long)]
        events: PathBuf,
        /// Defaults to stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Plot {
            csv,
            filter,
            tick,
            out,
            gap,
            min_shots,
            first_only,
            jobs,
        } => {
            let report = run_plot(PlotConfig {
                csv,
                out_dir: out.clone(),
                segmenter: SegmenterConfig {
                    gap_threshold: gap,
                    player_filter: filter,
                },
                output: OutputFilter {
                    min_shots,
                    first_shot_tick: tick,
                },
                first_only,
                jobs,
            })?;

            println!("replay={}", report.replay);
            println!("sprays={}", report.sprays_total);
            println!("rendered={}", report.sprays_selected);
            println!("skipped_empty={}", report.sprays_skipped_empty);
            println!("out_dir={}", out.display());
            for spray in &report.rendered {
                println!(
                    "  tick={} player={} weapon={} shots={} hits={} kills={} wrap_fixed={} {}",
                    spray
                        .first_shot_tick
                        .map(|tick| tick.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    spray.player,
                    spray.weapon_name,
                    spray.shots,
                    spray.hits,
                    spray.kills,
                    spray.wrap_fixed,
                    spray.path,
                );
            }
        }
        Commands::Extract { events, output } => {
            let outcome = run_extract(&events)?;
            if let Some(path) = output {
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, &outcome.tick_log)
                    .with_context(|| format!("failed writing {}", path.display()))?;
                println!("players={}", outcome.players);
                println!("rows={}", outcome.rows);
                println!("shots={}", outcome.shots);
                println!("output={}", path.display());
            } else {
                print!("{}", outcome.tick_log);
            }
        }
    }

    Ok(())
}
