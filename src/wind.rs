/*
 *  wind.rs
 *
 *  AvHUD - aviation weather at a glance
 *	(c) 2025-26 Stuart Hunter
 *
 *	This program is free software: you can redistribute it and/or modify
 *	it under the terms of the GNU General Public License as published by
 *	the Free Software Foundation, either version 3 of the License, or
 *	(at your option) any later version.
 *
 *	This program is distributed in the hope that it will be useful,
 *	but WITHOUT ANY WARRANTY; without even the implied warranty of
 *	MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *	GNU General Public License for more details.
 *
 *	See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *	Public License.
 *
 */

//! Wind direction arrow as a set of pixel offsets around a center point.

/// Shaft length in pixels from center to tip.
pub const ARROW_RADIUS: i32 = 6;
/// Length of each arrowhead barb.
pub const ARROW_BARB: i32 = 3;
/// Barbs sit at this angle either side of the shaft direction.
const BARB_ANGLE: f64 = 135.0;

// unit step for a bearing, 0 = up, clockwise, screen y grows downward
#[inline]
fn step(bearing_deg: f64, len: i32) -> (i32, i32) {
    let r = bearing_deg.to_radians();
    let l = len as f64;
    ((l * r.sin()).round() as i32, (-l * r.cos()).round() as i32)
}

/// Offsets for a wind arrow pointing along `direction_deg`.
///
/// 0 points up and angles grow clockwise, the same convention as a METAR
/// wind group. Any integer is accepted and reduced into 0..360. The shaft
/// is a rounded digital line from the center to `ARROW_RADIUS`, followed by
/// two barbs anchored at the tip. Offsets are unique and the shaft comes
/// first, starting at (0, 0).
pub fn arrow(direction_deg: i32) -> Vec<(i32, i32)> {
    let d = direction_deg.rem_euclid(360) as f64;
    let mut pts: Vec<(i32, i32)> = Vec::with_capacity((ARROW_RADIUS + 1 + 2 * ARROW_BARB) as usize);

    fn push(p: (i32, i32), pts: &mut Vec<(i32, i32)>) {
        if !pts.contains(&p) {
            pts.push(p);
        }
    }

    for i in 0..=ARROW_RADIUS {
        push(step(d, i), &mut pts);
    }

    let tip = step(d, ARROW_RADIUS);
    for side in [BARB_ANGLE, -BARB_ANGLE] {
        for j in 1..=ARROW_BARB {
            let (bx, by) = step(d + side, j);
            push((tip.0 + bx, tip.1 + by), &mut pts);
        }
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn cheb(a: (i32, i32), b: (i32, i32)) -> i32 {
        (a.0 - b.0).abs().max((a.1 - b.1).abs())
    }

    #[test]
    fn north_points_straight_up() {
        let a = arrow(0);
        let shaft = &a[..(ARROW_RADIUS + 1) as usize];
        assert!(shaft.iter().all(|&(dx, _)| dx == 0));
        assert!(a.contains(&(0, -ARROW_RADIUS)));
        assert!(a.iter().all(|&(_, dy)| dy <= 0));
        assert_eq!(
            a,
            vec![(0, 0), (0, -1), (0, -2), (0, -3), (0, -4), (0, -5), (0, -6), (1, -5), (2, -4), (-1, -5), (-2, -4)]
        );
    }

    #[test]
    fn east_points_right() {
        let a = arrow(90);
        assert!(a.contains(&(ARROW_RADIUS, 0)));
        assert!(a.iter().all(|&(dx, _)| dx >= 0));
    }

    #[test]
    fn shaft_has_no_gaps() {
        for d in 0..360 {
            let a = arrow(d);
            // dedupe can shorten the shaft on diagonals, walk until the barbs start
            let tip = step(d as f64, ARROW_RADIUS);
            let end = a.iter().position(|&p| p == tip).unwrap();
            for w in a[..=end].windows(2) {
                assert!(cheb(w[0], w[1]) <= 1, "gap at {}: {:?}", d, w);
            }
        }
    }

    #[test]
    fn offsets_are_unique_and_bounded() {
        for d in 0..360 {
            let a = arrow(d);
            let set: HashSet<_> = a.iter().copied().collect();
            assert_eq!(set.len(), a.len());
            assert!(a.iter().all(|&p| cheb(p, (0, 0)) <= ARROW_RADIUS));
        }
    }

    #[test]
    fn direction_wraps() {
        assert_eq!(arrow(360), arrow(0));
        assert_eq!(arrow(-90), arrow(270));
        assert_eq!(arrow(725), arrow(5));
    }
}
