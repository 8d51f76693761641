// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Composition kinds.

/// How a layer is (or should be) composited.
///
/// The same type is used for the upstream hint and for the planner's final
/// verdict, although the planner only ever writes [`Client`](Self::Client) or
/// [`Device`](Self::Device).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CompositionKind {
    /// Not yet classified.
    #[default]
    Invalid,
    /// Merged into the shared GPU-composited client target.
    Client,
    /// Scanned out directly by a dedicated hardware plane.
    Device,
    /// Solid fill produced by the display controller.
    SolidColor,
    /// Cursor plane content.
    Cursor,
    /// Content streamed from a sideband source.
    Sideband,
    /// Display decoration (rounded-corner masks and similar).
    ///
    /// The planner cannot reason about these and rejects the whole pass.
    DisplayDecoration,
}

impl CompositionKind {
    /// Returns `true` for the kinds a dedicated hardware plane can take.
    #[must_use]
    pub const fn is_plane_capable(self) -> bool {
        matches!(self, Self::Device | Self::Cursor)
    }

    /// Returns `true` for kinds the planner refuses to plan around.
    #[must_use]
    pub const fn is_unsupported(self) -> bool {
        matches!(self, Self::DisplayDecoration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_device_and_cursor_are_plane_capable() {
        let capable = [CompositionKind::Device, CompositionKind::Cursor];
        for kind in [
            CompositionKind::Invalid,
            CompositionKind::Client,
            CompositionKind::Device,
            CompositionKind::SolidColor,
            CompositionKind::Cursor,
            CompositionKind::Sideband,
            CompositionKind::DisplayDecoration,
        ] {
            assert_eq!(
                kind.is_plane_capable(),
                capable.contains(&kind),
                "wrong capability for {kind:?}"
            );
        }
    }
}
