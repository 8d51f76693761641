// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contiguous z-order intervals.
//!
//! A planning pass produces at most one [`ClientRange`]: the layers merged
//! into the GPU-composited client target. Video layers may additionally be
//! reserved for hardware planes through a [`DeviceRange`]. Both are half-open
//! intervals `[start, start + size)` over z-order.

use core::fmt;
use core::ops::Range;

use crate::layer::Layer;

/// The contiguous run of layers composited into the client target.
///
/// The empty range (`size == 0`) means no client composition this frame; it
/// is canonically stored with `start == 0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClientRange {
    /// Lowest z-index in the range.
    pub start: usize,
    /// Number of layers in the range.
    pub size: usize,
}

impl ClientRange {
    /// No client composition.
    pub const EMPTY: Self = Self { start: 0, size: 0 };

    /// Creates a range from a start and a size, canonicalizing empty ranges.
    #[must_use]
    pub const fn new(start: usize, size: usize) -> Self {
        if size == 0 {
            Self::EMPTY
        } else {
            Self { start, size }
        }
    }

    /// Creates the range `[start, end)`.
    ///
    /// `end` must not be below `start`.
    #[must_use]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(end >= start, "client range bounds inverted: {start}..{end}");
        Self::new(start, end.saturating_sub(start))
    }

    /// The whole stack of `layer_count` layers.
    #[must_use]
    pub const fn full(layer_count: usize) -> Self {
        Self::new(0, layer_count)
    }

    /// One past the highest z-index in the range.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start + self.size
    }

    /// Returns `true` if no layer is client composited.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if `z` lies inside the range.
    #[must_use]
    pub const fn contains(&self, z: usize) -> bool {
        z >= self.start && z < self.end()
    }

    /// Returns `true` if the range covers every layer of the stack.
    #[must_use]
    pub const fn is_full(&self, layer_count: usize) -> bool {
        self.start == 0 && self.size == layer_count
    }

    /// Returns `true` if `other` lies entirely inside this range.
    #[must_use]
    pub const fn covers(&self, other: &Self) -> bool {
        other.is_empty() || (self.start <= other.start && other.end() <= self.end())
    }

    /// The range as a standard index range.
    #[must_use]
    pub const fn as_range(&self) -> Range<usize> {
        self.start..self.end()
    }
}

impl fmt::Debug for ClientRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("ClientRange(empty)")
        } else {
            write!(f, "ClientRange({}..{})", self.start, self.end())
        }
    }
}

/// A contiguous run of video layers reserved for hardware planes.
///
/// Each layer in the range occupies two planes when device composited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct DeviceRange {
    /// Lowest z-index in the range.
    pub start: usize,
    /// Number of video layers in the range.
    pub size: usize,
}

impl DeviceRange {
    /// Creates a device range.
    #[must_use]
    pub const fn new(start: usize, size: usize) -> Self {
        Self { start, size }
    }

    /// One past the highest z-index in the range.
    ///
    /// Saturates at `usize::MAX`, which is never a valid stack bound.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.start.saturating_add(self.size)
    }

    /// Returns `true` if no layer is reserved.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if the range shares at least one layer with `client`.
    #[must_use]
    pub const fn overlaps(&self, client: &ClientRange) -> bool {
        !self.is_empty()
            && !client.is_empty()
            && self.start < client.end()
            && client.start < self.end()
    }

    /// Derives the video reservation from the layers' `is_video` flags.
    ///
    /// Returns `None` when the stack has no video layer or when the video
    /// layers do not form a single contiguous run.
    #[must_use]
    pub fn from_video_layers(layers: &[Layer]) -> Option<Self> {
        let first = layers.iter().position(|l| l.is_video)?;
        let last = layers.iter().rposition(|l| l.is_video)?;
        let run = &layers[first..=last];
        run.iter()
            .all(|l| l.is_video)
            .then(|| Self::new(first, run.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::IntRect;
    use alloc::vec;

    #[test]
    fn empty_ranges_are_canonical() {
        assert_eq!(ClientRange::new(3, 0), ClientRange::EMPTY);
        assert!(ClientRange::from_bounds(4, 4).is_empty());
        assert!(!ClientRange::EMPTY.contains(0));
    }

    #[test]
    fn covers_and_contains() {
        let r = ClientRange::new(1, 3);
        assert_eq!(r.end(), 4);
        assert!(r.contains(1) && r.contains(3));
        assert!(!r.contains(4));
        assert!(r.covers(&ClientRange::new(2, 2)));
        assert!(!r.covers(&ClientRange::new(0, 2)));
        assert!(r.covers(&ClientRange::EMPTY));
        assert!(ClientRange::full(5).is_full(5));
    }

    #[test]
    fn device_end_saturates() {
        let d = DeviceRange::new(usize::MAX, 1);
        assert_eq!(d.end(), usize::MAX);
        assert!(!d.overlaps(&ClientRange::new(0, 4)));
    }

    #[test]
    fn device_overlap() {
        let d = DeviceRange::new(2, 2);
        assert!(d.overlaps(&ClientRange::new(3, 4)));
        assert!(!d.overlaps(&ClientRange::new(0, 2)));
        assert!(!d.overlaps(&ClientRange::new(4, 1)));
        assert!(!DeviceRange::new(2, 0).overlaps(&ClientRange::new(0, 5)));
    }

    #[test]
    fn video_layers_form_device_range() {
        let plain = Layer::new(IntRect::new(0, 0, 10, 10));
        let video = plain.clone().with_video(true);
        let layers = vec![plain.clone(), video.clone(), video.clone(), plain.clone()];
        assert_eq!(
            DeviceRange::from_video_layers(&layers),
            Some(DeviceRange::new(1, 2))
        );

        let split = vec![video.clone(), plain.clone(), video];
        assert_eq!(DeviceRange::from_video_layers(&split), None);
        assert_eq!(DeviceRange::from_video_layers(&[plain]), None);
    }
}
