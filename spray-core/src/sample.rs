use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::constants::SAMPLE_FIELD_COUNT;
use crate::error::{ParseError, SampleField};

/// One row of the tick log: a player's view direction at a tick, plus what
/// their weapon did on that tick.
///
/// `pitch` is kept exactly as stored in the replay; the segmenter normalizes
/// it on ingestion.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickSample {
    pub player: String,
    pub tick: i64,
    pub is_shot: bool,
    pub is_hit: bool,
    pub is_kill: bool,
    pub yaw: f64,
    pub pitch: f64,
    pub weapon_id: i32,
}

impl TickSample {
    /// Encodes the sample as a tick-log row (no trailing newline).
    pub fn to_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.6},{}",
            self.player,
            self.tick,
            u8::from(self.is_shot),
            u8::from(self.is_hit),
            u8::from(self.is_kill),
            self.yaw,
            self.pitch,
            self.weapon_id
        )
    }
}

/// Parses one tick-log row. `line` is only used for error reporting.
pub fn parse_row(row: &str, line: usize) -> Result<TickSample, ParseError> {
    let fields: Vec<&str> = row.split(',').collect();
    if fields.len() != SAMPLE_FIELD_COUNT {
        return Err(ParseError::FieldCount {
            line,
            expected: SAMPLE_FIELD_COUNT,
            found: fields.len(),
        });
    }

    Ok(TickSample {
        player: fields[0].to_string(),
        tick: parse_int(fields[1], SampleField::Tick, line)?,
        is_shot: parse_flag(fields[2], SampleField::Shot, line)?,
        is_hit: parse_flag(fields[3], SampleField::Hit, line)?,
        is_kill: parse_flag(fields[4], SampleField::Kill, line)?,
        yaw: parse_float(fields[5], SampleField::Yaw, line)?,
        pitch: parse_float(fields[6], SampleField::Pitch, line)?,
        weapon_id: parse_int(fields[7], SampleField::Weapon, line)?,
    })
}

/// Lazily parses every row of an in-memory tick log.
pub fn samples(text: &str) -> impl Iterator<Item = Result<TickSample, ParseError>> + '_ {
    text.lines()
        .enumerate()
        .map(|(idx, row)| parse_row(row, idx + 1))
}

pub fn parse_samples(text: &str) -> Result<Vec<TickSample>, ParseError> {
    samples(text).collect()
}

/// Streams samples from a reader, one row per line.
pub struct SampleReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> SampleReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            buf: String::new(),
        }
    }
}

impl<R: BufRead> Iterator for SampleReader<R> {
    type Item = Result<TickSample, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        self.line += 1;
        match self.reader.read_line(&mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                let row = self
                    .buf
                    .strip_suffix('\n')
                    .map(|row| row.strip_suffix('\r').unwrap_or(row))
                    .unwrap_or(self.buf.as_str());
                Some(parse_row(row, self.line))
            }
            Err(err) => Some(Err(ParseError::Io {
                line: self.line,
                message: err.to_string(),
            })),
        }
    }
}

fn parse_int<T: std::str::FromStr>(
    raw: &str,
    field: SampleField,
    line: usize,
) -> Result<T, ParseError> {
    let trimmed = raw.trim();
    trimmed.parse::<T>().map_err(|_| ParseError::InvalidInteger {
        line,
        field,
        value: trimmed.to_string(),
    })
}

fn parse_float(raw: &str, field: SampleField, line: usize) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    trimmed.parse::<f64>().map_err(|_| ParseError::InvalidFloat {
        line,
        field,
        value: trimmed.to_string(),
    })
}

// Any non-zero integer counts as set.
fn parse_flag(raw: &str, field: SampleField, line: usize) -> Result<bool, ParseError> {
    parse_int::<i64>(raw, field, line).map(|value| value != 0)
}
