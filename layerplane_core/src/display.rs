// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame display snapshots and the long-lived display record.
//!
//! A [`DisplaySnapshot`] is rebuilt by the caller every refresh cycle: the
//! z-ordered layers plus the plane budget and color state for that frame.
//! A [`Display`] outlives frames and owns the accumulated
//! [`DisplayStats`] and the [`FlatteningTracker`].

use alloc::vec::Vec;

use crate::flatten::FlatteningTracker;
use crate::layer::Layer;
use crate::output::DisplayId;
use crate::stats::DisplayStats;

/// Everything the planner needs to know about one display for one frame.
#[derive(Clone, Debug, Default)]
pub struct DisplaySnapshot {
    /// Layers in back-to-front order; index 0 is the bottom.
    pub layers: Vec<Layer>,
    /// Hardware planes available to this display this frame.
    pub usable_planes: usize,
    /// Whether the active color transform is the identity.
    ///
    /// Only the client path can apply a non-identity transform.
    pub color_transform_is_identity: bool,
    /// Whether the frame may be flattened into a single client target.
    pub flattening_eligible: bool,
}

impl DisplaySnapshot {
    /// Creates a snapshot with an identity color transform and no flattening.
    #[must_use]
    pub fn new(layers: Vec<Layer>, usable_planes: usize) -> Self {
        Self {
            layers,
            usable_planes,
            color_transform_is_identity: true,
            flattening_eligible: false,
        }
    }

    /// Number of layers in the stack.
    #[must_use]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Long-lived state for one display.
#[derive(Clone, Debug, Default)]
pub struct Display {
    /// Which display this is.
    pub id: DisplayId,
    /// Counters accumulated across planning passes.
    pub stats: DisplayStats,
    /// Content-signature tracker feeding [`DisplaySnapshot::flattening_eligible`].
    pub flattening: FlatteningTracker,
    passes: u64,
}

impl Display {
    /// Creates a display with zeroed statistics.
    #[must_use]
    pub fn new(id: DisplayId) -> Self {
        Self {
            id,
            stats: DisplayStats::default(),
            flattening: FlatteningTracker::new(),
            passes: 0,
        }
    }

    /// Number of planning passes started on this display, including
    /// rejected ones.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Claims the index of the next planning pass.
    pub(crate) fn next_frame_index(&mut self) -> u64 {
        let index = self.passes;
        self.passes = self.passes.saturating_add(1);
        index
    }

    /// Updates the flattening tracker from the snapshot's layers and stores
    /// the verdict in the snapshot.
    pub fn prepare(&mut self, snapshot: &mut DisplaySnapshot) {
        snapshot.flattening_eligible = self.flattening.observe(&snapshot.layers);
    }
}
