use serde::{Deserialize, Serialize};

use crate::angles::{fix_horizontal_wrap, needs_horizontal_wrap_fix};
use crate::sample::TickSample;

/// A view direction in degrees, pitch already normalized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AimPoint {
    pub yaw: f64,
    pub pitch: f64,
}

impl AimPoint {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }
}

/// The spray currently being built by the segmenter.
///
/// Identity fields stay `None` until the first shot lands in it.
#[derive(Clone, Debug, Default)]
pub struct SprayAccumulator {
    player: Option<String>,
    weapon_id: Option<i32>,
    first_shot_tick: Option<i64>,
    aim_path: Vec<AimPoint>,
    shots: Vec<AimPoint>,
    hits: Vec<AimPoint>,
    kills: Vec<AimPoint>,
}

impl SprayAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_aim_path<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = AimPoint>,
    {
        self.aim_path.extend(points);
    }

    /// Classifies a shot sample. The caller has already appended `point` to
    /// the aim path.
    pub fn record_shot(&mut self, sample: &TickSample, point: AimPoint) {
        if self.player.is_none() {
            self.player = Some(sample.player.clone());
        }
        if self.weapon_id.is_none() {
            self.weapon_id = Some(sample.weapon_id);
        }
        if self.first_shot_tick.is_none() {
            self.first_shot_tick = Some(sample.tick);
        }

        self.shots.push(point);
        if sample.is_hit {
            self.hits.push(point);
        }
        if sample.is_kill {
            self.kills.push(point);
        }
    }

    pub fn seal(self) -> SprayEpisode {
        SprayEpisode {
            player: self.player,
            weapon_id: self.weapon_id,
            first_shot_tick: self.first_shot_tick,
            aim_path: self.aim_path,
            shots: self.shots,
            hits: self.hits,
            kills: self.kills,
            wrap_fixed: false,
        }
    }
}

/// A closed spray. Only the horizontal wrap fix may still change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SprayEpisode {
    player: Option<String>,
    weapon_id: Option<i32>,
    first_shot_tick: Option<i64>,
    aim_path: Vec<AimPoint>,
    shots: Vec<AimPoint>,
    hits: Vec<AimPoint>,
    kills: Vec<AimPoint>,
    wrap_fixed: bool,
}

impl SprayEpisode {
    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn weapon_id(&self) -> Option<i32> {
        self.weapon_id
    }

    pub fn first_shot_tick(&self) -> Option<i64> {
        self.first_shot_tick
    }

    pub fn aim_path(&self) -> &[AimPoint] {
        &self.aim_path
    }

    pub fn shots(&self) -> &[AimPoint] {
        &self.shots
    }

    pub fn hits(&self) -> &[AimPoint] {
        &self.hits
    }

    pub fn kills(&self) -> &[AimPoint] {
        &self.kills
    }

    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shots.is_empty()
    }

    /// Whether [`Self::normalize_horizontal`] shifted this spray's yaw.
    pub fn wrap_fixed(&self) -> bool {
        self.wrap_fixed
    }

    /// Moves the yaw seam away from the spray when its aim path straddles
    /// 0/360. All four point sequences receive the same shift.
    ///
    /// Returns `true` if the shift was applied. Calling it again is a no-op.
    pub fn normalize_horizontal(&mut self) -> bool {
        if self.wrap_fixed {
            return false;
        }
        if !needs_horizontal_wrap_fix(self.aim_path.iter().map(|point| point.yaw)) {
            return false;
        }

        for points in [
            &mut self.aim_path,
            &mut self.shots,
            &mut self.hits,
            &mut self.kills,
        ] {
            let yaws: Vec<f64> = points.iter().map(|point| point.yaw).collect();
            for (point, yaw) in points.iter_mut().zip(fix_horizontal_wrap(&yaws)) {
                point.yaw = yaw;
            }
        }
        self.wrap_fixed = true;
        true
    }
}
