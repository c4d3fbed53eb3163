// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region rectangles in real (zoom-scaled) coordinates.

use kurbo::Point;

/// Axis-aligned rectangle in real coordinates, stored as two corners.
///
/// Layout happens in *logical* coordinates; a `RealRect` is the logical box
/// multiplied by the zoom scale at registration time. Pointer input is compared
/// against real rects directly, with no further transform.
///
/// Containment is inclusive on all four edges, see [`RealRect::contains`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RealRect {
    /// Top-left corner (minimum x and y).
    pub top_left: Point,
    /// Bottom-right corner (maximum x and y).
    pub bottom_right: Point,
}

impl RealRect {
    /// Create a rect from its two corners.
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// Scale a logical box into real coordinates.
    ///
    /// Both corners are multiplied by `scale`, so the result is linear in the
    /// scale: doubling it doubles every coordinate relative to the origin.
    /// This is the only logical→real transform; callers apply it once, when a
    /// region is registered.
    pub fn from_logical(origin: Point, width: f64, height: f64, scale: f64) -> Self {
        let x = origin.x * scale;
        let y = origin.y * scale;
        Self {
            top_left: Point::new(x, y),
            bottom_right: Point::new(x + width * scale, y + height * scale),
        }
    }

    /// Whether the point lies inside the rect or on its boundary.
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.top_left.x
            && pt.x <= self.bottom_right.x
            && pt.y >= self.top_left.y
            && pt.y <= self.bottom_right.y
    }

    /// Width in real units.
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    /// Height in real units.
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }
}

/// Inclusive point-in-rect test, `>=` and `<=` on both axes.
pub fn point_in_rect(pt: Point, rect: &RealRect) -> bool {
    rect.contains(pt)
}
