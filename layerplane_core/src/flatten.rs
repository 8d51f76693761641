// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening eligibility from frame content signatures.
//!
//! A static frame does not need a fresh plane assignment: the planner can
//! hand the whole stack to the client target once and let it be reused. The
//! [`FlatteningTracker`] decides when that shortcut applies by comparing a
//! signature of every layer's inputs against the previous frame.

use core::hash::{Hash, Hasher};

use crate::layer::Layer;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a, enough to tell consecutive frames apart.
#[derive(Debug)]
struct SignatureHasher(u64);

impl Hasher for SignatureHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 ^= u64::from(*b);
            self.0 = self.0.wrapping_mul(FNV_PRIME);
        }
    }
}

/// Computes the content signature of a layer stack.
///
/// Only planner inputs take part; decision fields written by a previous pass
/// do not change the signature.
#[must_use]
pub fn content_signature(layers: &[Layer]) -> u64 {
    let mut h = SignatureHasher(FNV_OFFSET);
    layers.len().hash(&mut h);
    for layer in layers {
        layer.hint.hash(&mut h);
        layer.display_frame.hash(&mut h);
        layer.requires_scaling_or_phasing.hash(&mut h);
        layer.is_video.hash(&mut h);
        layer.usable_as_device.hash(&mut h);
    }
    h.finish()
}

/// Tracks the previous frame's signature for one display.
#[derive(Clone, Copy, Debug)]
pub struct FlatteningTracker {
    enabled: bool,
    last_signature: Option<u64>,
}

impl Default for FlatteningTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl FlatteningTracker {
    /// Creates an enabled tracker with no history.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            last_signature: None,
        }
    }

    /// Creates a tracker that never reports eligibility.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            last_signature: None,
        }
    }

    /// Returns `true` if the tracker can report eligibility.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Records this frame's layers and reports whether it may be flattened.
    ///
    /// A frame is eligible when its signature matches the previous frame or
    /// when it has at most one layer.
    pub fn observe(&mut self, layers: &[Layer]) -> bool {
        if !self.enabled {
            return false;
        }
        let signature = content_signature(layers);
        let unchanged = self.last_signature == Some(signature);
        self.last_signature = Some(signature);
        unchanged || layers.len() <= 1
    }

    /// Forgets the previous frame, so the next frame is never "unchanged".
    pub fn reset(&mut self) {
        self.last_signature = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{CompositionKind, IntRect};
    use alloc::vec::Vec;

    fn stack(n: i32) -> Vec<Layer> {
        (0..n)
            .map(|i| Layer::new(IntRect::new(0, 0, 10 * (i + 1), 10)))
            .collect()
    }

    #[test]
    fn first_frame_is_not_eligible() {
        let mut t = FlatteningTracker::new();
        assert!(!t.observe(&stack(3)));
    }

    #[test]
    fn repeated_frame_is_eligible() {
        let mut t = FlatteningTracker::new();
        let layers = stack(3);
        t.observe(&layers);
        assert!(t.observe(&layers));
    }

    #[test]
    fn changed_geometry_breaks_eligibility() {
        let mut t = FlatteningTracker::new();
        let mut layers = stack(3);
        t.observe(&layers);
        layers[1].display_frame.right += 1;
        assert!(!t.observe(&layers));
        assert!(t.observe(&layers));
    }

    #[test]
    fn changed_hint_breaks_eligibility() {
        let mut t = FlatteningTracker::new();
        let mut layers = stack(2);
        t.observe(&layers);
        layers[0].hint = CompositionKind::Client;
        assert!(!t.observe(&layers));
    }

    #[test]
    fn single_layer_is_always_eligible() {
        let mut t = FlatteningTracker::new();
        assert!(t.observe(&stack(1)));
        assert!(t.observe(&[]));
    }

    #[test]
    fn disabled_tracker_never_flattens() {
        let mut t = FlatteningTracker::disabled();
        let layers = stack(1);
        assert!(!t.observe(&layers));
        assert!(!t.observe(&layers));
    }

    #[test]
    fn reset_forgets_history() {
        let mut t = FlatteningTracker::new();
        let layers = stack(4);
        t.observe(&layers);
        t.reset();
        assert!(!t.observe(&layers));
    }
}
