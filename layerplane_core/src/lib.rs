// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame planning of hardware composition planes.
//!
//! `layerplane_core` decides, once per refresh cycle and per display, which
//! layers of a z-ordered stack are scanned out by dedicated hardware planes
//! ("device" composition) and which are merged by the GPU into a single
//! client target. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   DisplaySnapshot (layers, plane budget, color state)
//!       │
//!       ▼
//!   Display::prepare() ──► flattening_eligible
//!       │
//!       ▼
//!   Planner::validate()
//!       │   LayerClassifier ──► mandatory ClientRange
//!       │   PixelCost ──► grow_for_budget[_with_video]()
//!       │   CommitTester (optional) ──► full-client fallback
//!       ▼
//!   stamped layers + ValidationResult + DisplayStats
//! ```
//!
//! **[`layer`]**: The [`Layer`](layer::Layer) record, its
//! [`CompositionKind`](layer::CompositionKind) hint and verdict, and the
//! integer destination rectangle.
//!
//! **[`range`]**: [`ClientRange`](range::ClientRange), the contiguous span
//! sent to the client target, and [`DeviceRange`](range::DeviceRange), a
//! block of video layers reserved for planes.
//!
//! **[`classify`]**: The per-layer client predicate.
//!
//! **[`pixops`]**: Pixel-operation cost of layer windows, backed by prefix
//! sums.
//!
//! **[`resolve`]**: Mandatory range construction and the two plane-budget
//! resolvers.
//!
//! **[`planner`]**: The pass orchestrator and
//! [`ValidationResult`](planner::ValidationResult).
//!
//! **[`config`]**: [`Strategy`](config::Strategy) selection and
//! [`PlannerConfig`](config::PlannerConfig) presets.
//!
//! **[`display`]**: Per-frame snapshots and the long-lived display record.
//!
//! **[`flatten`]**: Content-signature tracking that detects static frames.
//!
//! **[`stats`]**: Per-display counters and their text dump.
//!
//! **[`backend`]**: Traits for the collaborators around the planner: commit
//! testing, buffer allocation, and content protection.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! planning-pass instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-layer
//!   decision events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod classify;
pub mod config;
pub mod display;
pub mod flatten;
pub mod layer;
pub mod output;
pub mod pixops;
pub mod planner;
pub mod range;
pub mod resolve;
pub mod stats;
pub mod trace;
