use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use spray_core::sample::SampleReader;
use spray_core::{segment_stream, OutputFilter, SegmenterConfig, SprayEpisode};
use tracing::{debug, info, warn};

use crate::render::render_spray;
use crate::util::{replay_name, spray_file_name, unique_file_names};
use crate::weapons::weapon_name;

#[derive(Clone, Debug)]
pub struct PlotConfig {
    pub csv: PathBuf,
    pub out_dir: PathBuf,
    pub segmenter: SegmenterConfig,
    pub output: OutputFilter,
    /// Stop after the first selected spray.
    pub first_only: bool,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderedSpray {
    pub player: String,
    pub weapon_id: Option<i32>,
    pub weapon_name: String,
    pub first_shot_tick: Option<i64>,
    pub aim_points: usize,
    pub shots: usize,
    pub hits: usize,
    pub kills: usize,
    pub wrap_fixed: bool,
    pub path: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlotReport {
    pub generated_unix_s: u64,
    pub input: String,
    pub replay: String,
    pub gap_threshold: u64,
    pub min_shots: usize,
    pub player_filter: Option<String>,
    pub tick_filter: Option<i64>,
    pub jobs: Option<usize>,
    pub sprays_total: usize,
    pub sprays_selected: usize,
    pub sprays_skipped_empty: usize,
    pub rendered: Vec<RenderedSpray>,
}

pub fn run_plot(config: PlotConfig) -> Result<PlotReport> {
    if let Some(jobs) = config.jobs {
        if jobs == 0 {
            return Err(anyhow!("plot --jobs must be >= 1 when provided"));
        }
    }

    let file = File::open(&config.csv)
        .with_context(|| format!("failed opening {}", config.csv.display()))?;
    let sprays = segment_stream(SampleReader::new(BufReader::new(file)), &config.segmenter)
        .with_context(|| format!("failed parsing tick log {}", config.csv.display()))?;
    let sprays_total = sprays.len();

    let (mut selected, empty): (Vec<_>, Vec<_>) = config
        .output
        .prepare(sprays)
        .into_iter()
        .partition(|spray| !spray.is_empty());
    if !empty.is_empty() {
        warn!(count = empty.len(), "skipping sprays without shots");
    }
    if config.first_only {
        selected.truncate(1);
    }
    info!(
        input = %config.csv.display(),
        sprays = sprays_total,
        selected = selected.len(),
        "segmented tick log"
    );

    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let replay = replay_name(&config.csv);
    // Names are fixed before the fan-out so no two renders share a file.
    let file_names = unique_file_names(selected.iter().map(|spray| {
        spray_file_name(
            &replay,
            spray.player().unwrap_or_default(),
            spray.first_shot_tick().unwrap_or_default(),
        )
    }));
    let planned: Vec<(&SprayEpisode, PathBuf)> = selected
        .iter()
        .zip(file_names)
        .map(|(spray, name)| (spray, config.out_dir.join(name)))
        .collect();

    let render_one = |(spray, path): &(&SprayEpisode, PathBuf)| -> Result<RenderedSpray> {
        render_spray(spray, &replay, path).with_context(|| {
            format!(
                "render failed for player={} tick={}",
                spray.player().unwrap_or_default(),
                spray.first_shot_tick().unwrap_or_default()
            )
        })?;
        debug!(path = %path.display(), shots = spray.shot_count(), "rendered spray");
        Ok(rendered_record(spray, path))
    };

    let results: Vec<Result<RenderedSpray>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| planned.par_iter().map(render_one).collect())
    } else {
        planned.par_iter().map(render_one).collect()
    };

    let mut rendered = Vec::with_capacity(results.len());
    for result in results {
        rendered.push(result?);
    }

    write_sprays_csv(&config.out_dir.join("sprays.csv"), &rendered)?;

    let report = PlotReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        input: config.csv.to_string_lossy().into_owned(),
        replay,
        gap_threshold: config.segmenter.gap_threshold,
        min_shots: config.output.min_shots,
        player_filter: config.segmenter.player_filter.clone(),
        tick_filter: config.output.first_shot_tick,
        jobs: config.jobs,
        sprays_total,
        sprays_selected: rendered.len(),
        sprays_skipped_empty: empty.len(),
        rendered,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;
    info!(out_dir = %config.out_dir.display(), rendered = report.sprays_selected, "plot finished");

    Ok(report)
}

fn rendered_record(spray: &SprayEpisode, path: &Path) -> RenderedSpray {
    RenderedSpray {
        player: spray.player().unwrap_or_default().to_string(),
        weapon_id: spray.weapon_id(),
        weapon_name: spray
            .weapon_id()
            .map(weapon_name)
            .unwrap_or("Unknown")
            .to_string(),
        first_shot_tick: spray.first_shot_tick(),
        aim_points: spray.aim_path().len(),
        shots: spray.shots().len(),
        hits: spray.hits().len(),
        kills: spray.kills().len(),
        wrap_fixed: spray.wrap_fixed(),
        path: path.to_string_lossy().into_owned(),
    }
}

fn write_sprays_csv(path: &Path, rows: &[RenderedSpray]) -> Result<()> {
    let mut csv = String::from(
        "player,weapon_id,weapon_name,first_shot_tick,aim_points,shots,hits,kills,wrap_fixed,path\n",
    );
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            row.player,
            row.weapon_id.map(|id| id.to_string()).unwrap_or_default(),
            row.weapon_name,
            row.first_shot_tick
                .map(|tick| tick.to_string())
                .unwrap_or_default(),
            row.aim_points,
            row.shots,
            row.hits,
            row.kills,
            row.wrap_fixed,
            row.path
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
