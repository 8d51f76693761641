// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Per-layer decisions ([`on_layer_decisions`](TraceSink::on_layer_decisions))
//! store only the number of client and device layers.

use layerplane_core::layer::CompositionKind;
use layerplane_core::output::DisplayId;
use layerplane_core::planner::ValidationResult;
use layerplane_core::range::ClientRange;
use layerplane_core::resolve::FallbackReason;
use layerplane_core::trace::{
    CommitTestEvent, FallbackEvent, LayerDecision, PlanBeginEvent, PlanState, PlanSummary,
    RangeEvent, RangeStage, StateEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PLAN_BEGIN: u8 = 1;
const TAG_STATE: u8 = 2;
const TAG_RANGE: u8 = 3;
const TAG_FALLBACK: u8 = 4;
const TAG_COMMIT_TEST: u8 = 5;
const TAG_PLAN_SUMMARY: u8 = 6;
const TAG_LAYER_DECISIONS_COUNT: u8 = 7;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_range(&mut self, r: ClientRange) {
        self.write_u64(r.start as u64);
        self.write_u64(r.size as u64);
    }

    fn write_state(&mut self, s: PlanState) {
        self.write_u8(match s {
            PlanState::Start => 0,
            PlanState::Flattened => 1,
            PlanState::RangeComputed => 2,
            PlanState::BudgetResolved => 3,
            PlanState::Stamped => 4,
        });
    }

    fn write_reason(&mut self, r: FallbackReason) {
        self.write_u8(match r {
            FallbackReason::VideoOverBudget => 0,
            FallbackReason::VideoNotAtEdge => 1,
            FallbackReason::SideOverReservation => 2,
            FallbackReason::ClientOverlapsVideo => 3,
            FallbackReason::DeviceRangeOutOfBounds => 4,
        });
    }

    fn write_result(&mut self, r: ValidationResult) {
        self.write_u8(match r {
            ValidationResult::None => 0,
            ValidationResult::HasChanges => 1,
            ValidationResult::Unsupported => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        self.write_u8(TAG_PLAN_BEGIN);
        self.write_u64(e.frame_index);
        self.write_u32(e.display.0);
        self.write_u32(e.layer_count);
        self.write_u32(e.usable_planes);
        self.write_bool(e.flattening_eligible);
    }

    fn on_state(&mut self, e: &StateEvent) {
        self.write_u8(TAG_STATE);
        self.write_u64(e.frame_index);
        self.write_state(e.state);
    }

    fn on_range(&mut self, e: &RangeEvent) {
        self.write_u8(TAG_RANGE);
        self.write_u64(e.frame_index);
        self.write_u8(match e.stage {
            RangeStage::Mandatory => 0,
            RangeStage::Resolved => 1,
        });
        self.write_range(e.range);
    }

    fn on_fallback(&mut self, e: &FallbackEvent) {
        self.write_u8(TAG_FALLBACK);
        self.write_u64(e.frame_index);
        self.write_reason(e.reason);
    }

    fn on_commit_test(&mut self, e: &CommitTestEvent) {
        self.write_u8(TAG_COMMIT_TEST);
        self.write_u64(e.frame_index);
        self.write_bool(e.accepted);
    }

    fn on_plan_summary(&mut self, s: &PlanSummary) {
        self.write_u8(TAG_PLAN_SUMMARY);
        self.write_u64(s.frame_index);
        self.write_u32(s.display.0);
        self.write_result(s.result);
        self.write_range(s.client);
        self.write_u32(s.layer_count);
        self.write_bool(s.flattened);
        self.write_u64(s.gpu_pixel_ops);
        self.write_u64(s.total_pixel_ops);
    }

    fn on_layer_decisions(&mut self, frame_index: u64, decisions: &[LayerDecision]) {
        let client = decisions
            .iter()
            .filter(|d| d.kind == CompositionKind::Client)
            .count();
        self.write_u8(TAG_LAYER_DECISIONS_COUNT);
        self.write_u64(frame_index);
        self.write_u32(capped(client));
        self.write_u32(capped(decisions.len() - client));
    }
}

fn capped(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PlanBeginEvent`].
    PlanBegin(PlanBeginEvent),
    /// A [`StateEvent`].
    State(StateEvent),
    /// A [`RangeEvent`].
    Range(RangeEvent),
    /// A [`FallbackEvent`].
    Fallback(FallbackEvent),
    /// A [`CommitTestEvent`].
    CommitTest(CommitTestEvent),
    /// A [`PlanSummary`].
    PlanSummary(PlanSummary),
    /// Decision counts for a pass.
    LayerDecisionsCount {
        /// Pass counter.
        frame_index: u64,
        /// Layers stamped client.
        client: u32,
        /// Layers stamped device.
        device: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_usize(&mut self) -> Option<usize> {
        usize::try_from(self.read_u64()?).ok()
    }

    fn read_range(&mut self) -> Option<ClientRange> {
        let start = self.read_usize()?;
        let size = self.read_usize()?;
        Some(ClientRange::new(start, size))
    }

    fn read_state(&mut self) -> Option<PlanState> {
        Some(match self.read_u8()? {
            0 => PlanState::Start,
            1 => PlanState::Flattened,
            2 => PlanState::RangeComputed,
            3 => PlanState::BudgetResolved,
            4 => PlanState::Stamped,
            _ => return None,
        })
    }

    fn read_reason(&mut self) -> Option<FallbackReason> {
        Some(match self.read_u8()? {
            0 => FallbackReason::VideoOverBudget,
            1 => FallbackReason::VideoNotAtEdge,
            2 => FallbackReason::SideOverReservation,
            3 => FallbackReason::ClientOverlapsVideo,
            4 => FallbackReason::DeviceRangeOutOfBounds,
            _ => return None,
        })
    }

    fn read_result(&mut self) -> Option<ValidationResult> {
        Some(match self.read_u8()? {
            0 => ValidationResult::None,
            1 => ValidationResult::HasChanges,
            2 => ValidationResult::Unsupported,
            _ => return None,
        })
    }

    fn decode_plan_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PlanBegin(PlanBeginEvent {
            frame_index: self.read_u64()?,
            display: DisplayId(self.read_u32()?),
            layer_count: self.read_u32()?,
            usable_planes: self.read_u32()?,
            flattening_eligible: self.read_bool()?,
        }))
    }

    fn decode_state(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::State(StateEvent {
            frame_index: self.read_u64()?,
            state: self.read_state()?,
        }))
    }

    fn decode_range(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let stage = match self.read_u8()? {
            0 => RangeStage::Mandatory,
            1 => RangeStage::Resolved,
            _ => return None,
        };
        Some(RecordedEvent::Range(RangeEvent {
            frame_index,
            stage,
            range: self.read_range()?,
        }))
    }

    fn decode_fallback(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Fallback(FallbackEvent {
            frame_index: self.read_u64()?,
            reason: self.read_reason()?,
        }))
    }

    fn decode_commit_test(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CommitTest(CommitTestEvent {
            frame_index: self.read_u64()?,
            accepted: self.read_bool()?,
        }))
    }

    fn decode_plan_summary(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PlanSummary(PlanSummary {
            frame_index: self.read_u64()?,
            display: DisplayId(self.read_u32()?),
            result: self.read_result()?,
            client: self.read_range()?,
            layer_count: self.read_u32()?,
            flattened: self.read_bool()?,
            gpu_pixel_ops: self.read_u64()?,
            total_pixel_ops: self.read_u64()?,
        }))
    }

    fn decode_layer_decisions_count(&mut self) -> Option<RecordedEvent> {
        let frame_index = self.read_u64()?;
        let client = self.read_u32()?;
        let device = self.read_u32()?;
        Some(RecordedEvent::LayerDecisionsCount {
            frame_index,
            client,
            device,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PLAN_BEGIN => self.decode_plan_begin(),
            TAG_STATE => self.decode_state(),
            TAG_RANGE => self.decode_range(),
            TAG_FALLBACK => self.decode_fallback(),
            TAG_COMMIT_TEST => self.decode_commit_test(),
            TAG_PLAN_SUMMARY => self.decode_plan_summary(),
            TAG_LAYER_DECISIONS_COUNT => self.decode_layer_decisions_count(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
