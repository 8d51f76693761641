// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer data model.
//!
//! A *layer* is one visual element in a display's back-to-front stack for a
//! single frame. The stack is a plain vector: a layer's z-index is its
//! position, index 0 being the bottom-most layer. Each layer has:
//!
//! - A composition **hint** ([`CompositionKind`]) set by the upper composition
//!   stack, telling the planner whether it believes the layer could go on a
//!   dedicated plane.
//! - A **display frame** ([`IntRect`]) in integer display coordinates. Its area
//!   is the layer's pixel cost.
//! - Capability **flags**: scaling/phasing requirements, video content, and the
//!   upstream device-usability verdict.
//! - **Decision fields** written only by the
//!   [`Planner`](crate::planner::Planner): the validated composition kind and
//!   whether the alternate hardware compose path is enabled.

mod kind;
mod model;
mod rect;

pub use kind::CompositionKind;
pub use model::Layer;
pub use rect::IntRect;
