// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Client-range construction under a plane budget.
//!
//! Resolution runs in two steps:
//!
//! 1. [`mandatory_client_range`] finds the tightest contiguous span covering
//!    every layer the classifier rejects. Plane-capable layers sandwiched
//!    between two rejected ones are pulled in as well, because the client
//!    target is a single plane at a single z position.
//! 2. [`grow_for_budget`] (or [`grow_for_budget_with_video`] when video
//!    layers are reserved) widens that span until the layers left outside it
//!    fit in the hardware planes, choosing the placement with the smallest
//!    [`CostModel`](crate::pixops::CostModel) cost.
//!
//! Neither step can fail. Geometry the video resolver cannot realize
//! degrades to the plain resolver and is reported through
//! [`Resolution::fallback`].

mod budget;
mod video;

pub use budget::grow_for_budget;
pub use video::grow_for_budget_with_video;

use core::fmt;

use crate::layer::Layer;
use crate::range::ClientRange;

/// Computes the smallest contiguous range covering every layer for which
/// `is_client` returns `true`.
///
/// Returns [`ClientRange::EMPTY`] when no layer is mandatory.
pub fn mandatory_client_range<F>(layers: &[Layer], mut is_client: F) -> ClientRange
where
    F: FnMut(&Layer) -> bool,
{
    let mut first = None;
    let mut last = 0;
    for (z, layer) in layers.iter().enumerate() {
        if is_client(layer) {
            first.get_or_insert(z);
            last = z;
        }
    }
    match first {
        Some(start) => ClientRange::from_bounds(start, last + 1),
        None => ClientRange::EMPTY,
    }
}

/// Why the video-reserved resolver fell back to the plain resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FallbackReason {
    /// The video layers alone need more planes than are available.
    VideoOverBudget,
    /// Video takes every remaining plane but does not sit at either end of
    /// the stack, so the other layers cannot form one client range.
    VideoNotAtEdge,
    /// The layers on the far side of the video block from the client range
    /// need more device planes than remain.
    SideOverReservation,
    /// The mandatory client range intersects the video block.
    ClientOverlapsVideo,
    /// The video block extends past the top of the stack.
    DeviceRangeOutOfBounds,
}

impl FallbackReason {
    /// Short label for logs and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VideoOverBudget => "video-over-budget",
            Self::VideoNotAtEdge => "video-not-at-edge",
            Self::SideOverReservation => "side-over-reservation",
            Self::ClientOverlapsVideo => "client-overlaps-video",
            Self::DeviceRangeOutOfBounds => "device-range-out-of-bounds",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a budget resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Resolution {
    /// The resolved client range.
    pub range: ClientRange,
    /// Set when the video reservation was ignored and the plain resolver
    /// produced `range` instead.
    pub fallback: Option<FallbackReason>,
}

impl Resolution {
    /// A resolution produced without falling back.
    #[must_use]
    pub const fn direct(range: ClientRange) -> Self {
        Self {
            range,
            fallback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::IntRect;
    use alloc::vec::Vec;

    fn stack(mandatory: &[bool]) -> Vec<(Layer, bool)> {
        mandatory
            .iter()
            .map(|&m| (Layer::new(IntRect::new(0, 0, 8, 8)), m))
            .collect()
    }

    fn range_of(marks: &[bool]) -> ClientRange {
        let tagged = stack(marks);
        let layers: Vec<Layer> = tagged.iter().map(|(l, _)| l.clone()).collect();
        let mut z = 0;
        mandatory_client_range(&layers, |_| {
            let m = tagged[z].1;
            z += 1;
            m
        })
    }

    #[test]
    fn no_mandatory_layers_is_empty() {
        assert_eq!(range_of(&[false, false, false]), ClientRange::EMPTY);
        assert_eq!(range_of(&[]), ClientRange::EMPTY);
    }

    #[test]
    fn single_mandatory_layer() {
        assert_eq!(range_of(&[false, false, true, false, false]), ClientRange::new(2, 1));
    }

    #[test]
    fn sandwiched_layers_are_pulled_in() {
        assert_eq!(range_of(&[false, true, false, false, true]), ClientRange::new(1, 4));
    }

    #[test]
    fn whole_stack_mandatory() {
        assert_eq!(range_of(&[true, true, true]), ClientRange::new(0, 3));
    }
}
