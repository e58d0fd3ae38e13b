//! Draws one spray as an SVG: the aim path as a line, shots as numbered
//! markers coloured by outcome.

use std::ops::Range;
use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use spray_core::{AimPoint, SprayEpisode};

use crate::weapons::weapon_name;

pub const IMAGE_SIZE: (u32, u32) = (1000, 800);

const BACKGROUND: RGBColor = RGBColor(253, 246, 227);
const PATH_DARK: RGBColor = RGBColor(169, 169, 169);
const PATH_LIGHT: RGBColor = RGBColor(211, 211, 211);
const SHOT_COLOR: RGBColor = RGBColor(218, 165, 32);
const HIT_COLOR: RGBColor = RGBColor(0, 255, 0);
const KILL_COLOR: RGBColor = RGBColor(255, 0, 0);

const STILL_MARKER_RADIUS: i32 = 2;
const SHOT_MARKER_RADIUS: i32 = 6;
const MIN_AXIS_PAD_DEG: f64 = 0.5;

pub fn spray_title(replay: &str, spray: &SprayEpisode) -> String {
    let tick = spray
        .first_shot_tick()
        .map(|tick| tick.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Game: {replay}.dem | Tick: {tick}, Player: {}, Weapon: {}",
        spray.player().unwrap_or("-"),
        spray.weapon_id().map(weapon_name).unwrap_or("Unknown"),
    )
}

/// Writes `spray` to `path` as an SVG.
pub fn render_spray(spray: &SprayEpisode, replay: &str, path: &Path) -> Result<()> {
    let root = SVGBackend::new(path, IMAGE_SIZE).into_drawing_area();
    draw_spray(&root, spray, &spray_title(replay, spray))
        .map_err(|err| anyhow!("plotting error for {}: {err}", path.display()))?;
    root.present()
        .map_err(|err| anyhow!("failed writing {}: {err}", path.display()))?;
    Ok(())
}

// The game's left and up are negative, so both axes are drawn mirrored:
// points are plotted negated and the tick labels negate them back.
fn to_plot(point: &AimPoint) -> (f64, f64) {
    (-point.yaw, -point.pitch)
}

fn draw_spray<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spray: &SprayEpisode,
    title: &str,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&BACKGROUND)?;

    let (x_range, y_range) = plot_ranges(spray);
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 18).into_font())
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc("yaw (degrees)")
        .y_desc("pitch (degrees)")
        .x_label_formatter(&|v: &f64| format!("{:.1}", -*v))
        .y_label_formatter(&|v: &f64| format!("{:.1}", -*v))
        .draw()?;

    let mut dark = true;
    for pair in spray.aim_path().windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if from == to {
            chart.draw_series(std::iter::once(Circle::new(
                to_plot(from),
                STILL_MARKER_RADIUS,
                WHITE.filled(),
            )))?;
            continue;
        }
        let color = if dark { PATH_DARK } else { PATH_LIGHT };
        dark = !dark;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![to_plot(from), to_plot(to)],
            color.stroke_width(2),
        )))?;
    }

    // Later layers win: a kill covers its hit marker, a hit covers its shot.
    for (points, color) in [
        (spray.shots(), SHOT_COLOR),
        (spray.hits(), HIT_COLOR),
        (spray.kills(), KILL_COLOR),
    ] {
        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(to_plot(point), SHOT_MARKER_RADIUS, color.filled())),
        )?;
    }

    let label_style = TextStyle::from(("sans-serif", 10).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(spray.shots().iter().enumerate().map(|(idx, point)| {
        Text::new(format!("{}", idx + 1), to_plot(point), label_style.clone())
    }))?;

    Ok(())
}

fn plot_ranges(spray: &SprayEpisode) -> (Range<f64>, Range<f64>) {
    let plotted: Vec<(f64, f64)> = spray
        .aim_path()
        .iter()
        .chain(spray.shots())
        .map(to_plot)
        .collect();
    (
        axis_range(plotted.iter().map(|(x, _)| *x)),
        axis_range(plotted.iter().map(|(_, y)| *y)),
    )
}

fn axis_range<I>(values: I) -> Range<f64>
where
    I: Iterator<Item = f64>,
{
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return -1.0..1.0;
    }
    let pad = ((hi - lo) * 0.1).max(MIN_AXIS_PAD_DEG);
    (lo - pad)..(hi + pad)
}
