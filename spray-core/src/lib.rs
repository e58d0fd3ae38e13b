pub mod angles;
pub mod constants;
pub mod error;
pub mod extract;
pub mod sample;
pub mod segment;
pub mod select;
pub mod spray;

pub use error::{ExtractError, ParseError};
pub use sample::{parse_samples, TickSample};
pub use segment::{segment_samples, segment_stream, segment_text, Segmenter, SegmenterConfig};
pub use select::OutputFilter;
pub use spray::{AimPoint, SprayEpisode};
