// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Integer display-space rectangles.

use kurbo::Rect;

/// An axis-aligned rectangle in integer display coordinates.
///
/// Edges are inclusive on the left/top and exclusive on the right/bottom, so
/// `right - left` is the width in pixels. Well-formed rectangles satisfy
/// `right >= left` and `bottom >= top`; malformed ones report zero area rather
/// than a negative one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntRect {
    /// Left edge.
    pub left: i32,
    /// Top edge.
    pub top: i32,
    /// Right edge (exclusive).
    pub right: i32,
    /// Bottom edge (exclusive).
    pub bottom: i32,
}

impl IntRect {
    /// Creates a rectangle from its four edges.
    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            right: left.saturating_add_unsigned(width),
            bottom: top.saturating_add_unsigned(height),
        }
    }

    /// Width in pixels, or zero for a malformed rectangle.
    #[must_use]
    pub fn width(&self) -> u64 {
        u64::try_from(i64::from(self.right) - i64::from(self.left)).unwrap_or(0)
    }

    /// Height in pixels, or zero for a malformed rectangle.
    #[must_use]
    pub fn height(&self) -> u64 {
        u64::try_from(i64::from(self.bottom) - i64::from(self.top)).unwrap_or(0)
    }

    /// Number of pixels covered.
    #[must_use]
    pub fn area(&self) -> u64 {
        self.width() * self.height()
    }

    /// Snaps a float layout rectangle to the nearest integer display frame.
    ///
    /// Coordinates outside the `i32` range saturate. The input is
    /// normalized first, so the result is always well formed.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let r = rect.abs().round();
        Self {
            left: snap(r.x0),
            top: snap(r.y0),
            right: snap(r.x1),
            bottom: snap(r.y1),
        }
    }

    /// Converts to a float rectangle.
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

impl From<Rect> for IntRect {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and clamped to the i32 range first"
)]
fn snap(v: f64) -> i32 {
    v.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
