// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer plane capability classification.

use crate::display::DisplaySnapshot;
use crate::layer::Layer;

/// Decides whether a single layer must be composited on the client path.
///
/// The planner is generic over this trait so platforms with extra hardware
/// restrictions can plug in their own predicate without dynamic dispatch.
pub trait LayerClassifier {
    /// Returns `true` if `layer` cannot be given a dedicated plane.
    fn is_client_layer(&self, snapshot: &DisplaySnapshot, layer: &Layer) -> bool;
}

/// The stock classifier.
///
/// A layer is forced onto the client path when any of these hold:
///
/// - its hint is not a plane-capable kind (only device and cursor are);
/// - the upstream check marked it unusable as a device layer;
/// - the display's color transform is not the identity;
/// - it needs scaling or phasing and the platform routes those through the
///   GPU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CapabilityPolicy {
    /// Send layers that need scaling or phasing through the GPU.
    pub force_gpu_for_scaling: bool,
}

impl LayerClassifier for CapabilityPolicy {
    fn is_client_layer(&self, snapshot: &DisplaySnapshot, layer: &Layer) -> bool {
        !layer.hint.is_plane_capable()
            || !layer.usable_as_device
            || !snapshot.color_transform_is_identity
            || (layer.requires_scaling_or_phasing && self.force_gpu_for_scaling)
    }
}
