// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scan-out plans for layerplane.
//!
//! This crate turns a stack stamped by
//! [`Planner`](layerplane_core::planner::Planner) into the list of plane
//! assignments a display backend commits:
//!
//! - [`PlanItem`]: one hardware plane, scanning a layer or the client target
//! - [`CompositionPlan`]: the ordered items for one frame on one display
//! - [`PlanError`]: why a stack could not be turned into a plan

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

extern crate alloc;

mod plan;

pub use plan::{CompositionPlan, PlanError, PlanItem};
