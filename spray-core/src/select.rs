use crate::constants::MIN_SHOTS_FOR_OUTPUT_DEFAULT;
use crate::spray::SprayEpisode;

/// Decides which closed sprays reach the renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputFilter {
    pub min_shots: usize,
    /// Keep only the spray whose first shot landed on this tick.
    pub first_shot_tick: Option<i64>,
}

impl Default for OutputFilter {
    fn default() -> Self {
        Self {
            min_shots: MIN_SHOTS_FOR_OUTPUT_DEFAULT,
            first_shot_tick: None,
        }
    }
}

impl OutputFilter {
    pub fn accepts(&self, spray: &SprayEpisode) -> bool {
        if let Some(tick) = self.first_shot_tick {
            if spray.first_shot_tick() != Some(tick) {
                return false;
            }
        }
        spray.shot_count() >= self.min_shots
    }

    /// Drops rejected sprays and applies the horizontal wrap fix to the rest,
    /// keeping their original order.
    pub fn prepare(&self, sprays: Vec<SprayEpisode>) -> Vec<SprayEpisode> {
        sprays
            .into_iter()
            .filter(|spray| self.accepts(spray))
            .map(|mut spray| {
                spray.normalize_horizontal();
                spray
            })
            .collect()
    }
}
