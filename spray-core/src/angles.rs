//! Angle corrections applied before a spray is plotted.
//!
//! The replay stores pitch as `270..360` looking down to level and `0..90`
//! level to looking up, and yaw on a `0..360` circle. Both encodings put a
//! discontinuity somewhere a spray can cross it.

use crate::constants::{
    FULL_TURN_DEG, HORIZONTAL_WRAP_MARGIN_DEG, HORIZONTAL_WRAP_SHIFT_DEG, VERTICAL_SPLIT_DEG,
};

/// Maps raw pitch onto a continuous axis: negative is down, positive is up.
#[inline]
pub fn normalize_vertical(angle: f64) -> f64 {
    if angle > VERTICAL_SPLIT_DEG {
        angle - FULL_TURN_DEG
    } else {
        angle
    }
}

/// True when a yaw set has points on both sides of the 0/360 seam.
///
/// Empty input has no seam to cross and yields `false`.
pub fn needs_horizontal_wrap_fix<I>(yaws: I) -> bool
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = yaws.into_iter();
    let Some(first) = iter.next() else {
        return false;
    };
    let (min, max) = iter.fold((first, first), |(lo, hi), yaw| (lo.min(yaw), hi.max(yaw)));
    min < HORIZONTAL_WRAP_MARGIN_DEG && max > FULL_TURN_DEG - HORIZONTAL_WRAP_MARGIN_DEG
}

/// Rotates one yaw by half a turn so the seam moves to 180.
#[inline]
pub fn shift_yaw(yaw: f64) -> f64 {
    (yaw + HORIZONTAL_WRAP_SHIFT_DEG).rem_euclid(FULL_TURN_DEG)
}

pub fn fix_horizontal_wrap(yaws: &[f64]) -> Vec<f64> {
    yaws.iter().copied().map(shift_yaw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_down_angles_become_negative() {
        assert_eq!(normalize_vertical(300.0), -60.0);
        assert_eq!(normalize_vertical(359.5), -0.5);
        assert_eq!(normalize_vertical(270.0), -90.0);
    }

    #[test]
    fn vertical_level_and_up_angles_pass_through() {
        assert_eq!(normalize_vertical(45.0), 45.0);
        assert_eq!(normalize_vertical(0.0), 0.0);
        assert_eq!(normalize_vertical(180.0), 180.0);
    }

    #[test]
    fn vertical_output_stays_in_half_open_range() {
        let mut raw = 0.0;
        while raw < 360.0 {
            let normalized = normalize_vertical(raw);
            assert!(
                normalized > -180.0 && normalized <= 180.0,
                "raw={raw} normalized={normalized}"
            );
            raw += 0.25;
        }
        let just_past_split = normalize_vertical(180.001);
        assert!(just_past_split > -180.0 && just_past_split < -179.0);
    }

    #[test]
    fn wrap_detected_when_spray_straddles_north() {
        assert!(needs_horizontal_wrap_fix([2.0, 358.0, 5.0, 355.0]));
        assert!(needs_horizontal_wrap_fix([19.9, 340.1]));
    }

    #[test]
    fn wrap_not_detected_at_margin_boundaries() {
        assert!(!needs_horizontal_wrap_fix([20.0, 350.0]));
        assert!(!needs_horizontal_wrap_fix([10.0, 340.0]));
        assert!(!needs_horizontal_wrap_fix([100.0, 120.0, 110.0]));
    }

    #[test]
    fn identical_and_empty_yaw_sets_never_wrap() {
        assert!(!needs_horizontal_wrap_fix([0.0, 0.0, 0.0]));
        assert!(!needs_horizontal_wrap_fix([359.0]));
        assert!(!needs_horizontal_wrap_fix(std::iter::empty()));
    }

    #[test]
    fn wrap_fix_moves_cluster_to_middle() {
        assert_eq!(
            fix_horizontal_wrap(&[2.0, 358.0, 5.0, 355.0]),
            vec![182.0, 178.0, 185.0, 175.0]
        );
    }

    #[test]
    fn shift_yaw_handles_out_of_range_input() {
        assert_eq!(shift_yaw(-10.0), 170.0);
        assert_eq!(shift_yaw(360.0), 180.0);
        assert_eq!(shift_yaw(180.0), 0.0);
    }
}
