// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Fixed-precision rounding and hashable grid points.
//!
//! Hole centers computed independently by different jobs only compare equal
//! after rounding to a fixed number of decimals. [`GridPoint`] is the integer
//! image of such a rounded point and is what the catalog uses as a map key.

use nalgebra::Point3;
use serde::Serialize;

/// Rounds `value` to `precision` decimals. Negative zero is folded into zero.
#[inline]
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rounds every coordinate of a point.
pub fn round_point(point: &Point3<f64>, precision: u32) -> Point3<f64> {
    Point3::new(
        round_to(point.x, precision),
        round_to(point.y, precision),
        round_to(point.z, precision),
    )
}

/// A point expressed in integer units of `10^-precision`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct GridPoint(pub [i64; 3]);

impl GridPoint {
    pub fn from_point(point: &Point3<f64>, precision: u32) -> Self {
        let factor = 10f64.powi(precision as i32);
        GridPoint([
            (point.x * factor).round() as i64,
            (point.y * factor).round() as i64,
            (point.z * factor).round() as i64,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_three_decimals() {
        assert_eq!(round_to(1.23456, 3), 1.235);
        assert_eq!(round_to(-7.0004, 3), -7.0);
        assert_eq!(round_to(10.0, 3), 10.0);
    }

    #[test]
    fn negative_zero_is_folded() {
        let r = round_to(-0.0002, 3);
        assert_eq!(r, 0.0);
        assert!(r.is_sign_positive());
    }

    #[test]
    fn rounding_is_idempotent() {
        let p = round_point(&Point3::new(12.3456789, -0.5555, 100.0001), 3);
        assert_eq!(round_point(&p, 3), p);
    }

    #[test]
    fn grid_points_match_after_rounding() {
        let a = Point3::new(1.0004, 2.0, 3.0);
        let b = Point3::new(0.9996, 2.0, 3.0);
        assert_eq!(GridPoint::from_point(&a, 3), GridPoint::from_point(&b, 3));
        assert_eq!(GridPoint::from_point(&a, 3), GridPoint([1000, 2000, 3000]));
        assert_ne!(
            GridPoint::from_point(&a, 3),
            GridPoint::from_point(&Point3::new(1.002, 2.0, 3.0), 3)
        );
    }
}
