use anyhow::Result;
use spray_core::{OutputFilter, SegmenterConfig};
use spray_plotter::plot::{run_plot, PlotConfig, PlotReport};
use spray_plotter::tick_log::run_extract;
use std::fs;
use std::path::Path;

fn burst(player: &str, start: i64, shots: i64, yaw: f64, weapon: i32) -> String {
    let mut rows = String::new();
    for i in 0..shots {
        let yaw = (yaw + i as f64 * 0.8) % 360.0;
        // One aim-only tick between shots.
        rows.push_str(&format!(
            "{player},{},0,0,0,{:.6},{:.6},{weapon}\n",
            start + 2 * i,
            yaw,
            355.0 - i as f64
        ));
        let hit = u8::from(i == shots - 1);
        rows.push_str(&format!(
            "{player},{},1,{hit},{hit},{:.6},{:.6},{weapon}\n",
            start + 2 * i + 1,
            yaw,
            355.0 - i as f64
        ));
    }
    rows
}

fn config(csv: &Path, out_dir: &Path) -> PlotConfig {
    PlotConfig {
        csv: csv.to_path_buf(),
        out_dir: out_dir.to_path_buf(),
        segmenter: SegmenterConfig::default(),
        output: OutputFilter::default(),
        first_only: false,
        jobs: None,
    }
}

fn write_log(dir: &Path, text: &str) -> Result<std::path::PathBuf> {
    let path = dir.join("inferno.csv");
    fs::write(&path, text)?;
    Ok(path)
}

#[test]
fn plots_every_qualifying_spray() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut text = burst("alice", 1000, 6, 100.0, 303);
    text.push_str(&burst("alice", 2000, 2, 100.0, 303));
    text.push_str(&burst("bob", 3000, 5, 358.5, 309));
    let csv = write_log(tmp.path(), &text)?;
    let out = tmp.path().join("out");

    let report = run_plot(config(&csv, &out))?;

    assert_eq!(report.replay, "inferno");
    assert_eq!(report.sprays_total, 3);
    assert_eq!(report.sprays_selected, 2);
    assert!(out.join("inferno_alice_0001001.svg").exists());
    assert!(out.join("inferno_bob_0003001.svg").exists());
    assert!(out.join("sprays.csv").exists());

    let bob = report
        .rendered
        .iter()
        .find(|spray| spray.player == "bob")
        .expect("bob rendered");
    assert_eq!(bob.weapon_name, "AWP");
    assert_eq!(bob.shots, 5);
    assert_eq!(bob.hits, 1);
    assert_eq!(bob.kills, 1);
    assert!(bob.wrap_fixed, "358 + drift crosses north");

    let summary: PlotReport = serde_json::from_slice(&fs::read(out.join("summary.json"))?)?;
    assert_eq!(summary.sprays_selected, 2);
    assert_eq!(summary.gap_threshold, 20);
    Ok(())
}

#[test]
fn filters_narrow_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut text = burst("alice", 1000, 6, 100.0, 303);
    text.push_str(&burst("bob", 1020, 6, 200.0, 304));
    text.push_str(&burst("alice", 5000, 4, 120.0, 303));
    let csv = write_log(tmp.path(), &text)?;

    let mut by_player = config(&csv, &tmp.path().join("player"));
    by_player.segmenter.player_filter = Some("alice".to_string());
    let report = run_plot(by_player)?;
    assert_eq!(report.sprays_selected, 2);
    assert!(report.rendered.iter().all(|spray| spray.player == "alice"));

    let mut by_tick = config(&csv, &tmp.path().join("tick"));
    by_tick.segmenter.player_filter = Some("alice".to_string());
    by_tick.output.first_shot_tick = Some(5001);
    let report = run_plot(by_tick)?;
    assert_eq!(report.sprays_selected, 1);
    assert_eq!(report.rendered[0].first_shot_tick, Some(5001));

    let mut first_only = config(&csv, &tmp.path().join("first"));
    first_only.first_only = true;
    first_only.jobs = Some(2);
    let report = run_plot(first_only)?;
    assert_eq!(report.sprays_selected, 1);

    let mut nobody = config(&csv, &tmp.path().join("nobody"));
    nobody.segmenter.player_filter = Some("carol".to_string());
    let report = run_plot(nobody)?;
    assert_eq!(report.sprays_total, 0);
    assert!(report.rendered.is_empty());
    Ok(())
}

#[test]
fn malformed_row_aborts_without_output() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut text = burst("alice", 1000, 6, 100.0, 303);
    text.push_str("alice,2000,1,0,0,not-a-number,0.0,303\n");
    let csv = write_log(tmp.path(), &text)?;
    let out = tmp.path().join("out");

    let err = run_plot(config(&csv, &out)).expect_err("bad yaw must fail");
    assert!(format!("{err:#}").contains("line 13"), "{err:#}");
    assert!(!out.join("summary.json").exists());
    Ok(())
}

#[test]
fn every_rendered_spray_gets_its_own_file() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut text = burst("alice", 1000, 4, 100.0, 303);
    for tick in [5000, 6000, 7000] {
        text.push_str(&format!("ghost,{tick},0,0,0,10.000000,0.000000,303\n"));
    }
    // The log restarts, so alice's second spray repeats the first one's tick.
    text.push_str(&burst("alice", 1000, 4, 140.0, 303));
    let csv = write_log(tmp.path(), &text)?;
    let out = tmp.path().join("out");

    let mut cfg = config(&csv, &out);
    cfg.output.min_shots = 0;
    cfg.jobs = Some(4);
    let report = run_plot(cfg)?;

    assert_eq!(report.sprays_total, 5);
    assert_eq!(report.sprays_skipped_empty, 3);
    assert_eq!(report.sprays_selected, 2);
    let paths: Vec<&str> = report.rendered.iter().map(|spray| spray.path.as_str()).collect();
    assert!(paths[0].ends_with("inferno_alice_0001001.svg"), "{paths:?}");
    assert!(paths[1].ends_with("inferno_alice_0001001_2.svg"), "{paths:?}");
    for path in &paths {
        assert!(Path::new(path).exists(), "{path}");
    }
    assert!(!out.join("inferno_unnamed_0000000.svg").exists());

    let listing = fs::read_to_string(out.join("sprays.csv"))?;
    assert_eq!(listing.lines().count(), 3);
    Ok(())
}

#[test]
fn zero_jobs_is_rejected() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let csv = write_log(tmp.path(), "")?;
    let mut cfg = config(&csv, &tmp.path().join("out"));
    cfg.jobs = Some(0);
    assert!(run_plot(cfg).is_err());
    Ok(())
}

#[test]
fn empty_log_renders_nothing() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let csv = write_log(tmp.path(), "")?;
    let report = run_plot(config(&csv, &tmp.path().join("out")))?;
    assert_eq!(report.sprays_total, 0);
    assert_eq!(report.sprays_selected, 0);
    Ok(())
}

#[test]
fn extracted_events_feed_the_plotter() -> Result<()> {
    let tmp = tempfile::tempdir()?;
    let mut views = Vec::new();
    for tick in 500..560 {
        views.push(serde_json::json!({
            "player": "zywoo",
            "tick": tick,
            "yaw": 45.0 + (tick - 500) as f64 * 0.05,
            "pitch": 2.0,
        }));
    }
    let fires: Vec<_> = (500..524)
        .step_by(4)
        .map(|tick| serde_json::json!({"player": "zywoo", "tick": tick, "weapon_id": 305}))
        .collect();
    let events = serde_json::json!({
        "weapon_fires": fires,
        "kills": [{"killer": "zywoo", "tick": 520}],
        "hurts": [{"attacker": "zywoo", "victim": "someone", "tick": 520}],
        "views": views,
    });
    let events_path = tmp.path().join("events.json");
    fs::write(&events_path, serde_json::to_vec(&events)?)?;

    let outcome = run_extract(&events_path)?;
    assert_eq!(outcome.players, 1);
    assert_eq!(outcome.shots, 6);
    assert_eq!(outcome.rows, 36);

    let csv = tmp.path().join("overpass.csv");
    fs::write(&csv, &outcome.tick_log)?;
    let report = run_plot(config(&csv, &tmp.path().join("out")))?;
    assert_eq!(report.sprays_selected, 1);
    let spray = &report.rendered[0];
    assert_eq!(spray.weapon_name, "M4A1");
    assert_eq!(spray.first_shot_tick, Some(500));
    assert_eq!(spray.shots, 6);
    assert_eq!(spray.kills, 1);
    Ok(())
}
