// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer-stack fixtures.

use alloc::vec::Vec;

use kurbo::{Rect, Size};
use layerplane_core::display::DisplaySnapshot;
use layerplane_core::layer::{CompositionKind, IntRect, Layer};
use layerplane_core::range::DeviceRange;

/// Builds a back-to-front layer stack for one display.
///
/// Layers are pushed bottom first. Rectangles are in display coordinates and
/// snapped to whole pixels.
#[derive(Clone, Debug)]
pub struct StackBuilder {
    screen: Size,
    layers: Vec<Layer>,
}

impl StackBuilder {
    /// Starts an empty stack on a `width × height` display.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            screen: Size::new(width, height),
            layers: Vec::new(),
        }
    }

    /// The display bounds.
    #[must_use]
    pub fn screen(&self) -> Rect {
        self.screen.to_rect()
    }

    /// Adds a plane-capable layer.
    #[must_use]
    pub fn layer(mut self, rect: Rect) -> Self {
        self.layers.push(Layer::new(IntRect::from_rect(rect)));
        self
    }

    /// Adds a layer covering the whole display.
    #[must_use]
    pub fn fullscreen(self) -> Self {
        let screen = self.screen();
        self.layer(screen)
    }

    /// Adds a video layer.
    #[must_use]
    pub fn video(mut self, rect: Rect) -> Self {
        self.layers
            .push(Layer::new(IntRect::from_rect(rect)).with_video(true));
        self
    }

    /// Adds a layer with an explicit hint.
    #[must_use]
    pub fn hinted(mut self, rect: Rect, hint: CompositionKind) -> Self {
        self.layers
            .push(Layer::new(IntRect::from_rect(rect)).with_hint(hint));
        self
    }

    /// Adds a layer the hardware cannot scan out.
    #[must_use]
    pub fn unusable(mut self, rect: Rect) -> Self {
        self.layers
            .push(Layer::new(IntRect::from_rect(rect)).with_usable_as_device(false));
        self
    }

    /// Adds a layer that needs scaling.
    #[must_use]
    pub fn scaled(mut self, rect: Rect) -> Self {
        self.layers
            .push(Layer::new(IntRect::from_rect(rect)).with_scaling(true));
        self
    }

    /// Number of layers pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if no layer was pushed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Finishes the stack.
    #[must_use]
    pub fn build(self) -> Vec<Layer> {
        self.layers
    }

    /// Finishes the stack as a snapshot with `usable_planes` planes.
    #[must_use]
    pub fn snapshot(self, usable_planes: usize) -> DisplaySnapshot {
        DisplaySnapshot::new(self.layers, usable_planes)
    }
}

/// `count` equal layers of `side × side` pixels, cascaded diagonally.
#[must_use]
pub fn cascade(count: usize, side: f64) -> Vec<Layer> {
    (0..count)
        .map(|i| {
            let offset = i as f64 * side / 4.0;
            Layer::new(IntRect::from_rect(Rect::from_origin_size(
                (offset, offset),
                (side, side),
            )))
        })
        .collect()
}

/// A typical media stack: wallpaper, `below` app layers, a video pair, and
/// `above` overlay layers, on a 1920 × 1080 display.
///
/// Returns the layers and the video block.
#[must_use]
pub fn media_stack(below: usize, above: usize) -> (Vec<Layer>, DeviceRange) {
    let mut builder = StackBuilder::new(1920.0, 1080.0).fullscreen();
    for i in 0..below {
        let x = 40.0 * i as f64;
        builder = builder.layer(Rect::new(x, 0.0, x + 640.0, 360.0));
    }
    let video = Rect::new(320.0, 180.0, 1600.0, 900.0);
    builder = builder.video(video).video(video);
    for i in 0..above {
        let y = 1000.0 - 40.0 * i as f64;
        builder = builder.layer(Rect::new(0.0, y, 1920.0, y + 80.0));
    }
    let layers = builder.build();
    let device = DeviceRange::new(below + 1, 2);
    (layers, device)
}
