// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rolling GPU-load metrics and grading.

use alloc::string::String;

use layerplane_core::stats::DisplayStats;

/// Per-frame sample fed into [`LoadTracker::observe`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LoadSample {
    /// Percentage of the frame's pixels composited on the GPU.
    pub gpu_share: f64,
    /// The frame was flattened.
    pub flattened: bool,
    /// The video reservation fell back to the plain resolver.
    pub fallback: bool,
    /// The commit test rejected the plan.
    pub failed_commit: bool,
}

impl LoadSample {
    /// Builds a sample from the stats increments of one frame.
    #[must_use]
    pub fn from_delta(delta: &DisplayStats) -> Self {
        Self {
            gpu_share: delta.gpu_pixel_share(),
            flattened: delta.frames_flattened > 0,
            fallback: delta.budget_fallbacks > 0,
            failed_commit: delta.failed_commit_tests > 0,
        }
    }
}

/// Letter grade for how much composition the hardware absorbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadGrade {
    /// Planes carry nearly everything.
    A,
    /// Moderate GPU use.
    B,
    /// Heavy GPU use or frequent degraded plans.
    C,
    /// GPU composites most of the screen.
    D,
}

impl LoadGrade {
    /// Returns a short label for HUD rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// Aggregated report returned by [`LoadTracker::observe`].
#[derive(Clone, Copy, Debug)]
pub struct LoadReport {
    /// Current grade.
    pub grade: LoadGrade,
    /// Mean GPU share over the window, in percent.
    pub mean_gpu_share: f64,
    /// Degraded frames (fallbacks and rejected commits) per 1000 frames.
    pub degraded_per_1000: f64,
    /// Total frames observed.
    pub total_frames: u64,
    /// Frames that were flattened.
    pub flattened_frames: u64,
    /// Degraded frames observed.
    pub degraded_frames: u64,
}

/// Rolling GPU-load tracker with a fixed-size share history.
#[derive(Debug)]
pub struct LoadTracker<const N: usize> {
    shares: [f64; N],
    cursor: usize,
    filled: usize,
    total_frames: u64,
    flattened_frames: u64,
    degraded_frames: u64,
}

impl<const N: usize> Default for LoadTracker<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> LoadTracker<N> {
    /// Creates an empty tracker.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shares: [0.0; N],
            cursor: 0,
            filled: 0,
            total_frames: 0,
            flattened_frames: 0,
            degraded_frames: 0,
        }
    }

    /// Observes one frame and returns an updated report.
    #[must_use]
    pub fn observe(&mut self, sample: LoadSample) -> LoadReport {
        self.total_frames = self.total_frames.saturating_add(1);
        if N > 0 {
            self.shares[self.cursor] = sample.gpu_share;
            self.cursor = (self.cursor + 1) % N;
            self.filled = (self.filled + 1).min(N);
        }
        if sample.flattened {
            self.flattened_frames = self.flattened_frames.saturating_add(1);
        }
        if sample.fallback || sample.failed_commit {
            self.degraded_frames = self.degraded_frames.saturating_add(1);
        }

        let mean = self.mean_gpu_share();
        let degraded = self.degraded_frames as f64 * 1000.0 / self.total_frames as f64;

        LoadReport {
            grade: grade_for(mean, degraded),
            mean_gpu_share: mean,
            degraded_per_1000: degraded,
            total_frames: self.total_frames,
            flattened_frames: self.flattened_frames,
            degraded_frames: self.degraded_frames,
        }
    }

    /// Mean GPU share over the observed window, in percent.
    #[must_use]
    pub fn mean_gpu_share(&self) -> f64 {
        if self.filled == 0 {
            return 0.0;
        }
        let sum: f64 = self.shares[..self.filled].iter().sum();
        sum / self.filled as f64
    }

    /// Returns the share history oldest→newest.
    #[must_use]
    pub fn shares(&self) -> [f64; N] {
        let mut out = [0.0; N];
        let start = if self.filled < N { 0 } else { self.cursor };
        for (i, slot) in out.iter_mut().enumerate().take(self.filled) {
            *slot = self.shares[(start + i) % N];
        }
        out
    }

    /// Returns an ASCII sparkline over [`shares`](Self::shares), 0–100 %.
    #[must_use]
    pub fn sparkline_ascii(&self) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        self.shares()
            .iter()
            .map(|share| {
                let t = share.clamp(0.0, 100.0) / 100.0;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "index is clamped to ASCII level count"
                )]
                let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
                LEVELS[level] as char
            })
            .collect()
    }
}

fn grade_for(mean_gpu_share: f64, degraded_per_1000: f64) -> LoadGrade {
    if mean_gpu_share < 10.0 && degraded_per_1000 < 5.0 {
        LoadGrade::A
    } else if mean_gpu_share < 35.0 && degraded_per_1000 < 20.0 {
        LoadGrade::B
    } else if mean_gpu_share < 70.0 && degraded_per_1000 < 50.0 {
        LoadGrade::C
    } else {
        LoadGrade::D
    }
}
