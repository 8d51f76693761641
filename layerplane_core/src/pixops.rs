// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel-operation cost model.
//!
//! The cost of compositing a layer is the area of its display frame. The
//! resolvers compare candidate client windows by the summed cost of the
//! layers they would pull onto the GPU.

use alloc::vec::Vec;

use crate::layer::Layer;

/// Cost of compositing a contiguous z-range on the client path.
pub trait CostModel {
    /// Summed cost of the layers in `[first_z, first_z + size)`.
    ///
    /// Indices past the end of the stack contribute nothing.
    fn window_cost(&self, first_z: usize, size: usize) -> u64;
}

/// Sums the display-frame areas of `layers[first_z..first_z + size]`.
///
/// Indices past the end of the stack are ignored.
#[must_use]
pub fn pixel_ops(layers: &[Layer], first_z: usize, size: usize) -> u64 {
    let start = first_z.min(layers.len());
    let end = first_z.saturating_add(size).min(layers.len());
    layers[start..end]
        .iter()
        .fold(0_u64, |acc, l| acc.saturating_add(l.pixel_ops()))
}

/// Prefix-summed pixel costs for O(1) window queries.
#[derive(Clone, Debug, Default)]
pub struct PixelCost {
    /// `prefix[i]` is the cost of layers `0..i`.
    prefix: Vec<u64>,
}

impl PixelCost {
    /// Precomputes prefix sums over `layers`.
    #[must_use]
    pub fn new(layers: &[Layer]) -> Self {
        let mut prefix = Vec::with_capacity(layers.len() + 1);
        let mut acc = 0_u64;
        prefix.push(acc);
        for layer in layers {
            acc = acc.saturating_add(layer.pixel_ops());
            prefix.push(acc);
        }
        Self { prefix }
    }

    /// Number of layers covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prefix.len().saturating_sub(1)
    }

    /// Returns `true` if built from an empty stack.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cost of the whole stack.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.prefix.last().copied().unwrap_or(0)
    }
}

impl CostModel for PixelCost {
    fn window_cost(&self, first_z: usize, size: usize) -> u64 {
        let n = self.len();
        let start = first_z.min(n);
        let end = first_z.saturating_add(size).min(n);
        self.prefix[end] - self.prefix[start]
    }
}
