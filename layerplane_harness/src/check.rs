// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Invariant checks for stamped layer stacks.

use alloc::vec::Vec;
use core::fmt;

use layerplane_core::classify::LayerClassifier;
use layerplane_core::display::DisplaySnapshot;

/// One broken guarantee found by [`check_plan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Violation {
    /// A layer carries no decision.
    Unplanned {
        /// Z-index of the layer.
        z: usize,
    },
    /// A device layer sits between two client layers.
    SplitClientRange {
        /// Z-index of the device layer inside the span.
        z: usize,
    },
    /// A layer the classifier marks client was left on a plane.
    MandatoryOnPlane {
        /// Z-index of the layer.
        z: usize,
    },
    /// The plan needs more planes than the display has.
    OverBudget {
        /// Planes the plan needs (video layers count twice, the client
        /// target once).
        required: usize,
        /// Planes available.
        available: usize,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unplanned { z } => write!(f, "layer {z} has no decision"),
            Self::SplitClientRange { z } => {
                write!(f, "device layer {z} splits the client range")
            }
            Self::MandatoryOnPlane { z } => {
                write!(f, "layer {z} must be client but is on a plane")
            }
            Self::OverBudget {
                required,
                available,
            } => write!(f, "plan needs {required} planes, {available} available"),
        }
    }
}

/// Checks a snapshot stamped by the planner.
///
/// An empty result means every layer is decided, the client layers are
/// contiguous, no layer `classifier` marks client is on a plane, and the
/// plan fits in `snapshot.usable_planes`.
#[must_use]
pub fn check_plan<C>(snapshot: &DisplaySnapshot, classifier: &C) -> Vec<Violation>
where
    C: LayerClassifier + ?Sized,
{
    let mut violations = Vec::new();
    let layers = &snapshot.layers;

    for (z, layer) in layers.iter().enumerate() {
        if layer.validated().is_none() {
            violations.push(Violation::Unplanned { z });
        }
    }
    if !violations.is_empty() {
        return violations;
    }

    let first = layers.iter().position(|l| l.is_client());
    let last = layers.iter().rposition(|l| l.is_client());
    if let (Some(first), Some(last)) = (first, last) {
        for z in first..last {
            if !layers[z].is_client() {
                violations.push(Violation::SplitClientRange { z });
            }
        }
    }

    for (z, layer) in layers.iter().enumerate() {
        if !layer.is_client() && classifier.is_client_layer(snapshot, layer) {
            violations.push(Violation::MandatoryOnPlane { z });
        }
    }

    let device: usize = layers
        .iter()
        .filter(|l| !l.is_client())
        .map(|l| l.plane_cost())
        .sum();
    let required = device + usize::from(first.is_some());
    if required > snapshot.usable_planes {
        violations.push(Violation::OverBudget {
            required,
            available: snapshot.usable_planes,
        });
    }

    violations
}
