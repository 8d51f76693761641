// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame layer record.

use super::kind::CompositionKind;
use super::rect::IntRect;

/// One entry of a display's z-ordered layer stack.
///
/// Input fields are public and set by the caller before planning. The
/// decision fields are written only by the planner and exposed through
/// getters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Layer {
    /// How the upper composition stack last marked this layer.
    pub hint: CompositionKind,
    /// Destination rectangle in display coordinates.
    pub display_frame: IntRect,
    /// The layer needs scaling or sub-pixel phasing to be displayed.
    pub requires_scaling_or_phasing: bool,
    /// The layer carries video content (two planes when device composited).
    pub is_video: bool,
    /// Upstream verdict on whether a plane can scan this layer's buffer out.
    pub usable_as_device: bool,

    validated: Option<CompositionKind>,
    use_alternate_compose_path: bool,
}

impl Layer {
    /// Creates a plane-capable layer covering `display_frame`.
    #[must_use]
    pub const fn new(display_frame: IntRect) -> Self {
        Self {
            hint: CompositionKind::Device,
            display_frame,
            requires_scaling_or_phasing: false,
            is_video: false,
            usable_as_device: true,
            validated: None,
            use_alternate_compose_path: false,
        }
    }

    /// Sets the composition hint.
    #[must_use]
    pub const fn with_hint(mut self, hint: CompositionKind) -> Self {
        self.hint = hint;
        self
    }

    /// Marks the layer as needing scaling or phasing.
    #[must_use]
    pub const fn with_scaling(mut self, scaling: bool) -> Self {
        self.requires_scaling_or_phasing = scaling;
        self
    }

    /// Marks the layer as video content.
    #[must_use]
    pub const fn with_video(mut self, video: bool) -> Self {
        self.is_video = video;
        self
    }

    /// Sets the upstream device-usability verdict.
    #[must_use]
    pub const fn with_usable_as_device(mut self, usable: bool) -> Self {
        self.usable_as_device = usable;
        self
    }

    /// Pixel cost of compositing this layer.
    #[must_use]
    pub fn pixel_ops(&self) -> u64 {
        self.display_frame.area()
    }

    /// The composition kind chosen by the last planning pass, if any.
    #[must_use]
    pub const fn validated(&self) -> Option<CompositionKind> {
        self.validated
    }

    /// Whether the last pass enabled the alternate hardware compose path.
    #[must_use]
    pub const fn use_alternate_compose_path(&self) -> bool {
        self.use_alternate_compose_path
    }

    /// Returns `true` if the last pass sent this layer to the client target.
    #[must_use]
    pub fn is_client(&self) -> bool {
        self.validated == Some(CompositionKind::Client)
    }

    /// Number of hardware planes this layer occupies when device composited.
    #[must_use]
    pub const fn plane_cost(&self) -> usize {
        if self.is_video { 2 } else { 1 }
    }

    pub(crate) fn stamp(&mut self, client: bool) {
        if client {
            self.validated = Some(CompositionKind::Client);
            self.use_alternate_compose_path = false;
        } else {
            self.validated = Some(CompositionKind::Device);
            self.use_alternate_compose_path = true;
        }
    }
}
