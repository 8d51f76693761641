// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition plan: the plane assignments for one frame.

use alloc::vec::Vec;
use core::fmt;

use layerplane_core::display::DisplaySnapshot;
use layerplane_core::layer::{IntRect, Layer};
use layerplane_core::output::DisplayId;
use layerplane_core::range::ClientRange;

/// One hardware plane in the plan.
///
/// Items are produced in back-to-front order; the client target sits at the
/// z-position of the bottom layer it merges.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanItem {
    /// A layer scanned out directly.
    Layer {
        /// Z-index of the layer in the snapshot.
        z: usize,
        /// Destination rectangle.
        frame: IntRect,
        /// Whether the layer is video (and takes two planes).
        video: bool,
    },
    /// The GPU-composited client target.
    ClientTarget {
        /// The layers merged into the target.
        range: ClientRange,
        /// Bounding box of the merged layers' destinations.
        bounds: IntRect,
    },
}

impl PlanItem {
    /// Number of hardware planes this item occupies.
    #[must_use]
    pub fn planes(&self) -> usize {
        match self {
            Self::Layer { video: true, .. } => 2,
            Self::Layer { .. } | Self::ClientTarget { .. } => 1,
        }
    }
}

/// Why a stack could not be turned into a [`CompositionPlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// A layer carries no decision; the planner has not run on this stack.
    Unplanned {
        /// Z-index of the first undecided layer.
        z: usize,
    },
    /// Client layers are not contiguous.
    SplitClientRange {
        /// Z-index of the first client layer after the gap.
        z: usize,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unplanned { z } => write!(f, "layer {z} has not been planned"),
            Self::SplitClientRange { z } => {
                write!(f, "client layers are not contiguous at layer {z}")
            }
        }
    }
}

impl core::error::Error for PlanError {}

/// Ordered plane assignments for a single frame on a single display.
#[derive(Clone, Debug, Default)]
pub struct CompositionPlan {
    /// Target display for this plan.
    pub display: DisplayId,
    /// Items in back-to-front order.
    pub items: Vec<PlanItem>,
}

impl CompositionPlan {
    /// Creates an empty plan for the given display.
    #[must_use]
    pub fn new(display: DisplayId) -> Self {
        Self {
            display,
            items: Vec::new(),
        }
    }

    /// Builds the plan for a stamped snapshot.
    pub fn from_snapshot(
        display: DisplayId,
        snapshot: &DisplaySnapshot,
    ) -> Result<Self, PlanError> {
        let mut plan = Self::new(display);
        plan.rebuild(snapshot)?;
        Ok(plan)
    }

    /// Replaces the items with those of `snapshot`.
    ///
    /// On error the plan is left empty.
    pub fn rebuild(&mut self, snapshot: &DisplaySnapshot) -> Result<(), PlanError> {
        self.clear();
        let range = client_range(&snapshot.layers)?;
        for (z, layer) in snapshot.layers.iter().enumerate() {
            if range.contains(z) {
                if z == range.start {
                    self.items.push(PlanItem::ClientTarget {
                        range,
                        bounds: bounds(&snapshot.layers[range.as_range()]),
                    });
                }
            } else {
                self.items.push(PlanItem::Layer {
                    z,
                    frame: layer.display_frame,
                    video: layer.is_video,
                });
            }
        }
        Ok(())
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total hardware planes the plan needs.
    #[must_use]
    pub fn planes_required(&self) -> usize {
        self.items.iter().map(PlanItem::planes).sum()
    }

    /// The client range, if any layer is GPU composited.
    #[must_use]
    pub fn client_range(&self) -> Option<ClientRange> {
        self.items.iter().find_map(|item| match item {
            PlanItem::ClientTarget { range, .. } => Some(*range),
            PlanItem::Layer { .. } => None,
        })
    }

    /// Returns `true` if the plan fits in `usable_planes`.
    #[must_use]
    pub fn fits(&self, usable_planes: usize) -> bool {
        self.planes_required() <= usable_planes
    }
}

/// Recovers the client range from the stamped layers.
fn client_range(layers: &[Layer]) -> Result<ClientRange, PlanError> {
    let mut start = None;
    let mut end = 0;
    for (z, layer) in layers.iter().enumerate() {
        if layer.validated().is_none() {
            return Err(PlanError::Unplanned { z });
        }
        if layer.is_client() {
            match start {
                None => start = Some(z),
                Some(_) if z != end => return Err(PlanError::SplitClientRange { z }),
                Some(_) => {}
            }
            end = z + 1;
        }
    }
    Ok(start.map_or(ClientRange::EMPTY, |start| {
        ClientRange::from_bounds(start, end)
    }))
}

fn bounds(layers: &[Layer]) -> IntRect {
    let mut frames = layers
        .iter()
        .map(|l| l.display_frame)
        .filter(|r| r.area() > 0);
    let Some(first) = frames.next() else {
        return IntRect::default();
    };
    frames.fold(first, |acc, r| {
        IntRect::new(
            acc.left.min(r.left),
            acc.top.min(r.top),
            acc.right.max(r.right),
            acc.bottom.max(r.bottom),
        )
    })
}
