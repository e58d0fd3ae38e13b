//! Splits a chronologically ordered tick log into sprays.
//!
//! A spray ends when two consecutive samples are more than
//! `gap_threshold` ticks apart. Aim samples are buffered until the next shot
//! so a spray's aim path never trails past its last shot.

use std::borrow::Borrow;

use crate::angles::normalize_vertical;
use crate::constants::GAP_THRESHOLD_DEFAULT;
use crate::error::ParseError;
use crate::sample::{samples, TickSample};
use crate::spray::{AimPoint, SprayAccumulator, SprayEpisode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SegmenterConfig {
    pub gap_threshold: u64,
    /// Samples from any other player are dropped before gap detection.
    pub player_filter: Option<String>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            gap_threshold: GAP_THRESHOLD_DEFAULT,
            player_filter: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Segmenter {
    config: SegmenterConfig,
    open: Option<SprayAccumulator>,
    pending_aim: Vec<AimPoint>,
    previous_tick: Option<i64>,
}

impl Segmenter {
    pub fn new(config: SegmenterConfig) -> Self {
        Self {
            config,
            open: None,
            pending_aim: Vec::new(),
            previous_tick: None,
        }
    }

    /// True once the first accepted sample has opened a spray.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Feeds one sample. Returns the spray it closed, if the sample arrived
    /// after a gap.
    pub fn push(&mut self, sample: &TickSample) -> Option<SprayEpisode> {
        let point = AimPoint::new(sample.yaw, normalize_vertical(sample.pitch));

        if let Some(player) = &self.config.player_filter {
            if *player != sample.player {
                return None;
            }
        }

        let mut sealed = None;
        if let Some(previous) = self.previous_tick {
            if sample.tick.abs_diff(previous) > self.config.gap_threshold {
                sealed = self
                    .open
                    .replace(SprayAccumulator::new())
                    .map(SprayAccumulator::seal);
                self.pending_aim.clear();
            }
        }
        self.previous_tick = Some(sample.tick);

        let open = self.open.get_or_insert_with(SprayAccumulator::new);
        self.pending_aim.push(point);
        if sample.is_shot {
            open.extend_aim_path(self.pending_aim.drain(..));
            open.record_shot(sample, point);
        }

        sealed
    }

    /// Seals the open spray, empty or not. `None` only if no sample was ever
    /// accepted.
    pub fn finish(self) -> Option<SprayEpisode> {
        self.open.map(SprayAccumulator::seal)
    }
}

/// Runs a whole sample sequence through a fresh [`Segmenter`].
pub fn segment_samples<I>(samples: I, config: &SegmenterConfig) -> Vec<SprayEpisode>
where
    I: IntoIterator,
    I::Item: Borrow<TickSample>,
{
    let mut segmenter = Segmenter::new(config.clone());
    let mut sprays = Vec::new();
    for sample in samples {
        sprays.extend(segmenter.push(sample.borrow()));
    }
    sprays.extend(segmenter.finish());
    sprays
}

/// Like [`segment_samples`] but over parsed rows; the first parse error
/// aborts the pass and discards everything segmented so far.
pub fn segment_stream<I>(
    rows: I,
    config: &SegmenterConfig,
) -> Result<Vec<SprayEpisode>, ParseError>
where
    I: IntoIterator<Item = Result<TickSample, ParseError>>,
{
    let mut segmenter = Segmenter::new(config.clone());
    let mut sprays = Vec::new();
    for row in rows {
        sprays.extend(segmenter.push(&row?));
    }
    sprays.extend(segmenter.finish());
    Ok(sprays)
}

pub fn segment_text(
    text: &str,
    config: &SegmenterConfig,
) -> Result<Vec<SprayEpisode>, ParseError> {
    segment_stream(samples(text), config)
}
