// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent→child connection curves.

use kurbo::{CubicBez, Point};

/// Horizontal distance of the second control point from the curve start.
pub const TAIL_REACH: f64 = 50.0;

/// Cubic curve from a parent's right edge to a child's left edge.
///
/// The first control point sits two fifths of the way across at the start
/// height and the second [`TAIL_REACH`] right of the start at the end height,
/// giving an asymmetric S with a long flat run near the parent.
pub fn route(from: Point, to: Point) -> CubicBez {
    let c1 = Point::new(from.x + (to.x - from.x) * 2.0 / 5.0, from.y);
    let c2 = Point::new(from.x + TAIL_REACH, to.y);
    CubicBez::new(from, c1, c2, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_points() {
        let c = route(Point::new(100.0, 40.0), Point::new(249.0, 90.0));
        assert_eq!(c.p0, Point::new(100.0, 40.0));
        assert_eq!(c.p1, Point::new(100.0 + 149.0 * 2.0 / 5.0, 40.0));
        assert_eq!(c.p2, Point::new(150.0, 90.0));
        assert_eq!(c.p3, Point::new(249.0, 90.0));
    }

    #[test]
    fn level_route_is_flat() {
        let c = route(Point::new(0.0, 10.0), Point::new(100.0, 10.0));
        assert!([c.p0, c.p1, c.p2, c.p3].iter().all(|p| p.y == 10.0));
    }
}
