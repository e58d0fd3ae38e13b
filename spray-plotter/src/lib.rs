pub mod plot;
pub mod render;
pub mod tick_log;
pub mod util;
pub mod weapons;
