/*
 *  tests/geometry_props.rs
 *
 *  Property tests for the wind arrow and forecast time conversion
 *
 *  AvHUD - aviation weather at a glance
 *  (c) 2025-26 Stuart Hunter
 */

use std::collections::HashSet;

use proptest::prelude::*;

use avhud::display::utc_to_local_hhmm;
use avhud::wind::{arrow, ARROW_RADIUS};

fn bearing_of(p: (i32, i32)) -> f64 {
    (p.0 as f64).atan2(-(p.1 as f64)).to_degrees().rem_euclid(360.0)
}

fn angle_between(a: f64, b: f64) -> f64 {
    ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
}

proptest! {
    #[test]
    fn arrow_is_unique_bounded_and_centered(dir in -1080i32..1080) {
        let pts = arrow(dir);
        prop_assert_eq!(pts[0], (0, 0));
        prop_assert!(pts.len() >= ARROW_RADIUS as usize + 1);

        let unique: HashSet<_> = pts.iter().copied().collect();
        prop_assert_eq!(unique.len(), pts.len());

        for &(x, y) in &pts {
            prop_assert!(x.abs() <= ARROW_RADIUS && y.abs() <= ARROW_RADIUS);
        }
    }

    #[test]
    fn arrow_wraps_every_full_turn(dir in -720i32..720, turns in -3i32..3) {
        prop_assert_eq!(arrow(dir), arrow(dir + 360 * turns));
    }

    #[test]
    fn arrow_tip_points_along_the_bearing(dir in 0i32..360) {
        let pts = arrow(dir);
        let aligned = pts.iter().any(|&p| {
            let r = ((p.0 * p.0 + p.1 * p.1) as f64).sqrt();
            r >= 5.0 && angle_between(bearing_of(p), dir as f64) <= 8.0
        });
        prop_assert!(aligned, "no tip near bearing {}: {:?}", dir, pts);
    }

    #[test]
    fn neighbouring_bearings_differ_a_little(dir in 0i32..360) {
        let a: HashSet<_> = arrow(dir).into_iter().collect();
        let b: HashSet<_> = arrow(dir + 1).into_iter().collect();
        prop_assert!(a.symmetric_difference(&b).count() <= 16);
    }

    #[test]
    fn valid_times_shift_six_hours_back(h in 0u32..24, m in 0u32..60) {
        let local = utc_to_local_hhmm(&format!("{:02}{:02}", h, m));
        prop_assert_eq!(local, format!("{:02}:{:02}", (h + 18) % 24, m));
    }

    #[test]
    fn malformed_times_are_blank(s in "[0-9]{0,3}|[0-9]{5,6}|[A-Za-z: ]{1,5}|2[4-9][0-5][0-9]|[01][0-9][6-9][0-9]") {
        prop_assert_eq!(utc_to_local_hhmm(&s), "");
    }
}
