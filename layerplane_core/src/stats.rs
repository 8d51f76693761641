// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accumulated per-display composition statistics.

use core::fmt;

/// Monotonic counters describing how a display's frames were composited.
///
/// The planner only ever adds to these; resetting them is up to the owning
/// [`Display`](crate::display::Display). Take two samples and call
/// [`delta`](Self::delta) to report a window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DisplayStats {
    /// Planning passes that completed (unsupported passes excluded).
    pub total_frames: u64,
    /// Passes short-circuited by flattening.
    pub frames_flattened: u64,
    /// Pixels pushed through the client (GPU) path.
    pub gpu_pixel_ops: u64,
    /// Pixels of every layer on the display.
    pub total_pixel_ops: u64,
    /// Plans rejected by the commit test and replaced by full client
    /// composition.
    pub failed_commit_tests: u64,
    /// Video-reserved resolutions that degraded to the plain resolver.
    pub budget_fallbacks: u64,
}

impl DisplayStats {
    /// Counter increments between `earlier` and `self`.
    #[must_use]
    pub const fn delta(&self, earlier: &Self) -> Self {
        Self {
            total_frames: self.total_frames.saturating_sub(earlier.total_frames),
            frames_flattened: self.frames_flattened.saturating_sub(earlier.frames_flattened),
            gpu_pixel_ops: self.gpu_pixel_ops.saturating_sub(earlier.gpu_pixel_ops),
            total_pixel_ops: self.total_pixel_ops.saturating_sub(earlier.total_pixel_ops),
            failed_commit_tests: self
                .failed_commit_tests
                .saturating_sub(earlier.failed_commit_tests),
            budget_fallbacks: self.budget_fallbacks.saturating_sub(earlier.budget_fallbacks),
        }
    }

    /// Share of pixels composited on the GPU, in percent.
    ///
    /// Returns `0.0` when no pixels were recorded.
    #[must_use]
    pub fn gpu_pixel_share(&self) -> f64 {
        if self.total_pixel_ops == 0 {
            0.0
        } else {
            self.gpu_pixel_ops as f64 * 100.0 / self.total_pixel_ops as f64
        }
    }

    pub(crate) fn record_pixels(&mut self, gpu: u64, total: u64) {
        self.total_frames = self.total_frames.saturating_add(1);
        self.gpu_pixel_ops = self.gpu_pixel_ops.saturating_add(gpu);
        self.total_pixel_ops = self.total_pixel_ops.saturating_add(total);
    }
}

impl fmt::Display for DisplayStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total frames count: {}", self.total_frames)?;
        writeln!(f, "Frames flattened: {}", self.frames_flattened)?;
        writeln!(
            f,
            "Pixel operations (GPU/total): {}/{} ({:.1}%)",
            self.gpu_pixel_ops,
            self.total_pixel_ops,
            self.gpu_pixel_share()
        )?;
        writeln!(f, "Failed commit tests: {}", self.failed_commit_tests)?;
        write!(f, "Budget fallbacks: {}", self.budget_fallbacks)
    }
}
