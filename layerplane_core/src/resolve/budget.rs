// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane-budget resolution without a video reservation.

use crate::pixops::CostModel;
use crate::range::ClientRange;

/// Grows `client` until the layers outside it fit in `usable_planes`.
///
/// When the stack has more layers than planes, one plane is held back for
/// the client target itself (a client range takes exactly one plane however
/// many layers it merges). If the device layers then still outnumber the
/// remaining planes, the range grows by exactly the excess. Every placement
/// of the grown range that still covers `client` is a candidate, and the one
/// with the smallest `cost` wins; ties go to the lowest z.
///
/// A display with no usable planes sends the whole stack to the client path.
/// If `client` already fits it is returned unchanged.
pub fn grow_for_budget<M>(
    layer_count: usize,
    usable_planes: usize,
    client: ClientRange,
    cost: &M,
) -> ClientRange
where
    M: CostModel + ?Sized,
{
    debug_assert!(
        client.end() <= layer_count,
        "{client:?} exceeds a stack of {layer_count}"
    );

    let mut avail_planes = usable_planes;
    if layer_count > avail_planes {
        avail_planes = avail_planes.saturating_sub(1);
    }

    let device_layers = layer_count - client.size;
    let excess = match device_layers.checked_sub(avail_planes) {
        Some(excess) if excess > 0 => excess,
        _ => return client,
    };

    let (first, size, steps) = if client.is_empty() {
        (0, excess, layer_count - excess + 1)
    } else {
        let prepend = client.start.min(excess);
        let append = (layer_count - client.end()).min(excess);
        let first = client.start - prepend;
        let size = client.size + excess;
        let steps = 1 + append.min(prepend).min(layer_count - (first + size));
        (first, size, steps)
    };

    cheapest_window(cost, first, size, steps)
}

/// Picks the cheapest of `steps` windows of `size` layers starting at
/// `first`, `first + 1`, and so on.
pub(super) fn cheapest_window<M>(cost: &M, first: usize, size: usize, steps: usize) -> ClientRange
where
    M: CostModel + ?Sized,
{
    let mut best = ClientRange::new(first, size);
    let mut best_cost = u64::MAX;
    for start in first..first + steps {
        let c = cost.window_cost(start, size);
        if c < best_cost {
            best_cost = c;
            best = ClientRange::new(start, size);
        }
    }
    best
}
