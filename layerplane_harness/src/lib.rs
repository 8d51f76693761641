// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixtures, plan checks, and collaborator doubles for exercising the
//! planner outside a real display stack.
//!
//! - [`fixtures`]: [`StackBuilder`](fixtures::StackBuilder) for layer stacks
//!   laid out with `kurbo` rectangles.
//! - [`check`]: [`check_plan`](check::check_plan) reports every way a
//!   stamped stack breaks the planner's guarantees.
//! - [`load`]: rolling GPU-load tracker with a letter grade.
//! - [`doubles`]: in-memory [`BufferProvider`], [`ControlService`], and
//!   [`CommitTester`] implementations.
//!
//! [`BufferProvider`]: layerplane_core::backend::BufferProvider
//! [`ControlService`]: layerplane_core::backend::ControlService
//! [`CommitTester`]: layerplane_core::backend::CommitTester

#![no_std]

extern crate alloc;

pub mod check;
pub mod doubles;
pub mod fixtures;
pub mod load;
