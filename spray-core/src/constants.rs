/// Largest tick distance between two consecutive samples that still belongs to one spray.
pub const GAP_THRESHOLD_DEFAULT: u64 = 20;
/// Sprays with fewer shots than this are not plotted.
pub const MIN_SHOTS_FOR_OUTPUT_DEFAULT: usize = 4;

/// Raw pitch values above this are "looking down" and wrap to negative angles.
pub const VERTICAL_SPLIT_DEG: f64 = 180.0;
pub const FULL_TURN_DEG: f64 = 360.0;
/// Yaw sets with a minimum below this and a maximum above `360 - margin` straddle north.
pub const HORIZONTAL_WRAP_MARGIN_DEG: f64 = 20.0;
pub const HORIZONTAL_WRAP_SHIFT_DEG: f64 = 180.0;

/// Number of positional fields in one tick-log row.
pub const SAMPLE_FIELD_COUNT: usize = 8;

/// View samples recorded after each fire event.
pub const EXTRACT_PADDING_TICKS: i64 = 15;
/// Rifle weapon codes occupy `300..400`.
pub const RIFLE_WEAPON_ID_MIN: i32 = 300;
pub const RIFLE_WEAPON_ID_MAX_EXCLUSIVE: i32 = 400;
