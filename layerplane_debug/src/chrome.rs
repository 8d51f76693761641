// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Planning events carry no wall-clock time, so each pass is placed at
//! `frame_index * frame_interval_us` and the events inside it one
//! microsecond apart.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Each pass becomes a `Plan` slice on the display's process track.
pub fn export(bytes: &[u8], frame_interval_us: f64, writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut clock = PassClock::new(frame_interval_us);
    let mut pid = 0;

    for recorded in decode(bytes) {
        match recorded {
            RecordedEvent::PlanBegin(e) => {
                pid = e.display.0;
                events.push(json!({
                    "ph": "B",
                    "name": "Plan",
                    "cat": "Planner",
                    "ts": clock.begin(e.frame_index),
                    "pid": pid,
                    "tid": 0,
                    "args": {
                        "frame_index": e.frame_index,
                        "layer_count": e.layer_count,
                        "usable_planes": e.usable_planes,
                        "flattening_eligible": e.flattening_eligible,
                    }
                }));
            }
            RecordedEvent::State(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}", e.state),
                    "cat": "State",
                    "ts": clock.step(e.frame_index),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                    }
                }));
            }
            RecordedEvent::Range(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": format!("{:?}Range", e.stage),
                    "cat": "Range",
                    "ts": clock.step(e.frame_index),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "start": e.range.start,
                        "size": e.range.size,
                    }
                }));
            }
            RecordedEvent::Fallback(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Fallback",
                    "cat": "Range",
                    "ts": clock.step(e.frame_index),
                    "pid": pid,
                    "tid": 0,
                    "s": "p",
                    "args": {
                        "frame_index": e.frame_index,
                        "reason": e.reason.as_str(),
                    }
                }));
            }
            RecordedEvent::CommitTest(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "CommitTest",
                    "cat": "Backend",
                    "ts": clock.step(e.frame_index),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": e.frame_index,
                        "accepted": e.accepted,
                    }
                }));
            }
            RecordedEvent::PlanSummary(s) => {
                events.push(json!({
                    "ph": "E",
                    "name": "Plan",
                    "cat": "Planner",
                    "ts": clock.step(s.frame_index),
                    "pid": s.display.0,
                    "tid": 0,
                    "args": {
                        "frame_index": s.frame_index,
                        "result": s.result.as_str(),
                        "client_start": s.client.start,
                        "client_size": s.client.size,
                        "layer_count": s.layer_count,
                        "flattened": s.flattened,
                        "gpu_pixel_ops": s.gpu_pixel_ops,
                        "total_pixel_ops": s.total_pixel_ops,
                    }
                }));
            }
            RecordedEvent::LayerDecisionsCount {
                frame_index,
                client,
                device,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerDecisions",
                    "cat": "Rich",
                    "ts": clock.step(frame_index),
                    "pid": pid,
                    "tid": 0,
                    "s": "t",
                    "args": {
                        "frame_index": frame_index,
                        "client": client,
                        "device": device,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

/// Synthesizes timestamps for events that carry none.
struct PassClock {
    frame_interval_us: f64,
    frame_index: u64,
    offset_us: f64,
}

impl PassClock {
    fn new(frame_interval_us: f64) -> Self {
        Self {
            frame_interval_us,
            frame_index: 0,
            offset_us: 0.0,
        }
    }

    fn base(&self) -> f64 {
        self.frame_index as f64 * self.frame_interval_us
    }

    fn begin(&mut self, frame_index: u64) -> f64 {
        self.frame_index = frame_index;
        self.offset_us = 0.0;
        self.base()
    }

    fn step(&mut self, frame_index: u64) -> f64 {
        if frame_index != self.frame_index {
            self.begin(frame_index);
        }
        self.offset_us += 1.0;
        self.base() + self.offset_us
    }
}
