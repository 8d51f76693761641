// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use layerplane_core::layer::CompositionKind;
use layerplane_core::trace::{
    CommitTestEvent, FallbackEvent, LayerDecision, PlanBeginEvent, PlanState, PlanSummary,
    RangeEvent, RangeStage, StateEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn state_name(state: PlanState) -> &'static str {
    match state {
        PlanState::Start => "start",
        PlanState::Flattened => "flattened",
        PlanState::RangeComputed => "range-computed",
        PlanState::BudgetResolved => "budget-resolved",
        PlanState::Stamped => "stamped",
    }
}

fn stage_name(stage: RangeStage) -> &'static str {
    match stage {
        RangeStage::Mandatory => "mandatory",
        RangeStage::Resolved => "resolved",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        let _ = writeln!(
            self.writer,
            "[begin] frame={} {} layers={} planes={} flatten={}",
            e.frame_index, e.display, e.layer_count, e.usable_planes, e.flattening_eligible,
        );
    }

    fn on_state(&mut self, e: &StateEvent) {
        let _ = writeln!(
            self.writer,
            "[state] frame={} {}",
            e.frame_index,
            state_name(e.state),
        );
    }

    fn on_range(&mut self, e: &RangeEvent) {
        let _ = writeln!(
            self.writer,
            "[range] frame={} {} {:?}",
            e.frame_index,
            stage_name(e.stage),
            e.range,
        );
    }

    fn on_fallback(&mut self, e: &FallbackEvent) {
        let _ = writeln!(
            self.writer,
            "[fallback] frame={} reason={}",
            e.frame_index, e.reason,
        );
    }

    fn on_commit_test(&mut self, e: &CommitTestEvent) {
        let verdict = if e.accepted { "ok" } else { "REJECTED" };
        let _ = writeln!(
            self.writer,
            "[commit-test] frame={} {verdict}",
            e.frame_index,
        );
    }

    fn on_plan_summary(&mut self, s: &PlanSummary) {
        let flattened = if s.flattened { " flattened" } else { "" };
        let _ = writeln!(
            self.writer,
            "[summary] frame={} {} result={} client={:?} layers={} gpu={}/{}{flattened}",
            s.frame_index,
            s.display,
            s.result.as_str(),
            s.client,
            s.layer_count,
            s.gpu_pixel_ops,
            s.total_pixel_ops,
        );
    }

    fn on_layer_decisions(&mut self, frame_index: u64, decisions: &[LayerDecision]) {
        let marks: String = decisions
            .iter()
            .map(|d| match d.kind {
                CompositionKind::Client => 'C',
                _ => 'D',
            })
            .collect();
        let _ = writeln!(self.writer, "[layers] frame={frame_index} {marks}");
    }
}
