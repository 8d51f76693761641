// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for planning passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! [`Planner`](crate::planner::Planner) calls as a pass moves through its
//! states. All method bodies default to no-ops, so implementing only the
//! events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates [`LayerDecision`] events and the
//!   corresponding `TraceSink` method.

use crate::output::DisplayId;
use crate::planner::ValidationResult;
use crate::range::ClientRange;
use crate::resolve::FallbackReason;

#[cfg(feature = "trace-rich")]
use crate::layer::CompositionKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// States of a planning pass.
///
/// A pass runs `Start → Flattened → Stamped`, or
/// `Start → RangeComputed → BudgetResolved → Stamped`. A pass rejected as
/// unsupported stops at `Start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanState {
    /// The snapshot has been received.
    Start,
    /// The whole stack was handed to the client target.
    Flattened,
    /// The mandatory client range is known.
    RangeComputed,
    /// The client range fits the plane budget.
    BudgetResolved,
    /// Every layer carries its final composition kind.
    Stamped,
}

/// Which client range a [`RangeEvent`] reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeStage {
    /// Span covering every layer that cannot take a plane.
    Mandatory,
    /// Span after growing for the plane budget.
    Resolved,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a pass starts.
#[derive(Clone, Copy, Debug)]
pub struct PlanBeginEvent {
    /// Monotonic pass counter for the display.
    pub frame_index: u64,
    /// Which display is being planned.
    pub display: DisplayId,
    /// Number of layers in the snapshot.
    pub layer_count: u32,
    /// Hardware planes available.
    pub usable_planes: u32,
    /// Whether the snapshot allowed flattening.
    pub flattening_eligible: bool,
}

/// Emitted on every state transition.
#[derive(Clone, Copy, Debug)]
pub struct StateEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// The state just entered.
    pub state: PlanState,
}

/// Emitted when a client range is computed.
#[derive(Clone, Copy, Debug)]
pub struct RangeEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// Which range this is.
    pub stage: RangeStage,
    /// The range.
    pub range: ClientRange,
}

/// Emitted when the video-reserved resolver degrades to the plain one.
#[derive(Clone, Copy, Debug)]
pub struct FallbackEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// Why the reservation could not be honoured.
    pub reason: FallbackReason,
}

/// Emitted after a commit test ran.
#[derive(Clone, Copy, Debug)]
pub struct CommitTestEvent {
    /// Pass counter.
    pub frame_index: u64,
    /// Whether the hardware accepted the plan.
    pub accepted: bool,
}

/// Per-pass outcome, emitted last.
#[derive(Clone, Copy, Debug)]
pub struct PlanSummary {
    /// Pass counter.
    pub frame_index: u64,
    /// Which display.
    pub display: DisplayId,
    /// The validation result reported to the caller.
    pub result: ValidationResult,
    /// Final client range.
    pub client: ClientRange,
    /// Number of layers in the snapshot.
    pub layer_count: u32,
    /// Whether the pass was flattened.
    pub flattened: bool,
    /// Pixels sent through the client path.
    pub gpu_pixel_ops: u64,
    /// Pixels of the whole stack.
    pub total_pixel_ops: u64,
}

/// Final composition kind of one layer.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct LayerDecision {
    /// Z-index of the layer.
    pub z: u32,
    /// The kind it was stamped with.
    pub kind: CompositionKind,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the planner.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a pass starts.
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        _ = e;
    }

    /// Called on every state transition.
    fn on_state(&mut self, e: &StateEvent) {
        _ = e;
    }

    /// Called when a client range is computed.
    fn on_range(&mut self, e: &RangeEvent) {
        _ = e;
    }

    /// Called when the video-reserved resolver falls back.
    fn on_fallback(&mut self, e: &FallbackEvent) {
        _ = e;
    }

    /// Called after a commit test.
    fn on_commit_test(&mut self, e: &CommitTestEvent) {
        _ = e;
    }

    /// Called with the pass summary.
    fn on_plan_summary(&mut self, s: &PlanSummary) {
        _ = s;
    }

    /// Called with per-layer decisions (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_layer_decisions(&mut self, frame_index: u64, decisions: &[LayerDecision]) {
        _ = (frame_index, decisions);
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PlanBeginEvent`].
    #[inline]
    pub fn plan_begin(&mut self, e: &PlanBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_plan_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`StateEvent`].
    #[inline]
    pub fn state(&mut self, e: &StateEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_state(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RangeEvent`].
    #[inline]
    pub fn range(&mut self, e: &RangeEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_range(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FallbackEvent`].
    #[inline]
    pub fn fallback(&mut self, e: &FallbackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_fallback(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CommitTestEvent`].
    #[inline]
    pub fn commit_test(&mut self, e: &CommitTestEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_commit_test(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PlanSummary`].
    #[inline]
    pub fn plan_summary(&mut self, s: &PlanSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_plan_summary(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Returns `true` if events reach a sink.
    ///
    /// Lets callers skip building event payloads nobody will see.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        #[cfg(feature = "trace")]
        {
            self.sink.is_some()
        }
        #[cfg(not(feature = "trace"))]
        {
            false
        }
    }

    /// Emits per-layer decisions (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn layer_decisions(&mut self, frame_index: u64, decisions: &[LayerDecision]) {
        if let Some(s) = &mut self.sink {
            s.on_layer_decisions(frame_index, decisions);
        }
    }
}

/// Clamps a count into the `u32` fields of trace events.
pub(crate) fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
