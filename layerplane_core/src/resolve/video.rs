// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane-budget resolution with a reserved block of video layers.
//!
//! Video layers stay on hardware planes and take two planes each. The
//! resolver first charges the extra plane per video layer against the
//! budget, then holds one plane back for the client target when the stack
//! outnumbers the planes, and then looks the case up in a small table keyed
//! by remaining [`Capacity`] and the client range's [`Placement`] relative to
//! the video block.
//!
//! Rows that describe geometry no single client range can satisfy fall back
//! to [`grow_for_budget`], which ignores the reservation but always yields a
//! plan that fits.

use crate::pixops::CostModel;
use crate::range::{ClientRange, DeviceRange};

use super::budget::grow_for_budget;
use super::{FallbackReason, Resolution};

/// How the remaining planes compare to the video block's size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Capacity {
    /// Video alone exceeds the budget.
    Short,
    /// Video consumes every remaining plane.
    Exact,
    /// This many planes remain for non-video device layers.
    Spare(usize),
}

impl Capacity {
    fn of(layer_count: usize, usable_planes: usize, device: DeviceRange) -> Self {
        let Some(mut avail) = usable_planes.checked_sub(device.size) else {
            return Self::Short;
        };
        if layer_count > usable_planes {
            avail = avail.saturating_sub(1);
        }
        match avail.checked_sub(device.size) {
            None => Self::Short,
            Some(0) => Self::Exact,
            Some(left) => Self::Spare(left),
        }
    }
}

/// Where the mandatory client range sits relative to the video block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Placement {
    NoClient,
    BeforeVideo,
    AfterVideo,
    Overlapping,
}

impl Placement {
    fn of(client: ClientRange, device: DeviceRange) -> Self {
        if client.is_empty() {
            Self::NoClient
        } else if device.overlaps(&client) {
            Self::Overlapping
        } else if client.end() <= device.start {
            Self::BeforeVideo
        } else {
            Self::AfterVideo
        }
    }
}

/// Geometry shared by the table rows.
#[derive(Clone, Copy, Debug)]
struct Stack {
    layer_count: usize,
    client: ClientRange,
    device: DeviceRange,
}

impl Stack {
    /// Layers below the video block.
    fn prepend(&self) -> usize {
        self.device.start
    }

    /// Layers above the video block.
    fn append(&self) -> usize {
        self.layer_count - self.device.end()
    }

    /// Non-video layers that may stay on device planes, or `None` when every
    /// layer outside the client range already fits.
    fn extra_device(&self, planes_left: usize) -> Option<usize> {
        let free = self.layer_count - self.device.size - self.client.size;
        let extra = free.min(planes_left);
        (extra < free).then_some(extra)
    }
}

/// Grows `client` so that the non-video device layers plus the reserved
/// video block fit in `usable_planes`.
///
/// `device` marks the video layers; each costs two planes. Layers kept on
/// device planes are taken closest to the video block first. When the
/// reservation cannot be honoured, the plain resolver runs instead and the
/// reason is returned in [`Resolution::fallback`].
pub fn grow_for_budget_with_video<M>(
    layer_count: usize,
    usable_planes: usize,
    client: ClientRange,
    device: DeviceRange,
    cost: &M,
) -> Resolution
where
    M: CostModel + ?Sized,
{
    let plain = || grow_for_budget(layer_count, usable_planes, client, cost);

    if device.is_empty() {
        return Resolution::direct(plain());
    }
    if device.end() > layer_count {
        return Resolution {
            range: plain(),
            fallback: Some(FallbackReason::DeviceRangeOutOfBounds),
        };
    }

    let stack = Stack {
        layer_count,
        client,
        device,
    };
    let row = match (
        Capacity::of(layer_count, usable_planes, device),
        Placement::of(client, device),
    ) {
        (Capacity::Short, _) => Err(FallbackReason::VideoOverBudget),
        (_, Placement::Overlapping) => Err(FallbackReason::ClientOverlapsVideo),
        (Capacity::Exact, _) => exact(stack),
        (Capacity::Spare(left), Placement::NoClient) => no_client(stack, left, cost),
        (Capacity::Spare(left), Placement::BeforeVideo) => before_video(stack, left),
        (Capacity::Spare(left), Placement::AfterVideo) => after_video(stack, left),
    };

    match row {
        Ok(range) => Resolution::direct(range),
        Err(reason) => Resolution {
            range: plain(),
            fallback: Some(reason),
        },
    }
}

/// Video takes every plane left: every other layer goes to the client
/// target, which must then sit on one side of the video block.
fn exact(stack: Stack) -> Result<ClientRange, FallbackReason> {
    let Stack {
        layer_count,
        device,
        ..
    } = stack;
    if device.start == 0 {
        Ok(ClientRange::from_bounds(device.end(), layer_count))
    } else if device.end() == layer_count {
        Ok(ClientRange::from_bounds(0, device.start))
    } else {
        Err(FallbackReason::VideoNotAtEdge)
    }
}

/// The client range lies below the video block. Everything above the block
/// stays on planes; the rest of the spare planes keep the layers just below
/// the block, then the bottom-most layers.
fn before_video(stack: Stack, planes_left: usize) -> Result<ClientRange, FallbackReason> {
    let Stack { client, device, .. } = stack;
    let Some(extra_device) = stack.extra_device(planes_left) else {
        return Ok(client);
    };
    let append = stack.append();
    if append > extra_device {
        return Err(FallbackReason::SideOverReservation);
    }
    let rest = extra_device - append;
    let midpend = device.start - client.end();
    if rest <= midpend {
        Ok(ClientRange::from_bounds(0, device.start - rest))
    } else {
        Ok(ClientRange::from_bounds(rest - midpend, client.end()))
    }
}

/// Mirror image of [`before_video`].
fn after_video(stack: Stack, planes_left: usize) -> Result<ClientRange, FallbackReason> {
    let Stack {
        layer_count,
        client,
        device,
    } = stack;
    let Some(extra_device) = stack.extra_device(planes_left) else {
        return Ok(client);
    };
    let prepend = stack.prepend();
    if prepend > extra_device {
        return Err(FallbackReason::SideOverReservation);
    }
    let rest = extra_device - prepend;
    let midpend = client.start - device.end();
    if rest <= midpend {
        Ok(ClientRange::from_bounds(device.end() + rest, layer_count))
    } else {
        Ok(ClientRange::from_bounds(
            client.start,
            layer_count - (rest - midpend),
        ))
    }
}

/// No layer is mandatory: the client target goes above or below the video
/// block, whichever side can be filled and costs less.
fn no_client<M>(stack: Stack, planes_left: usize, cost: &M) -> Result<ClientRange, FallbackReason>
where
    M: CostModel + ?Sized,
{
    let Stack {
        layer_count,
        client,
        device,
    } = stack;
    let Some(extra_device) = stack.extra_device(planes_left) else {
        return Ok(client);
    };
    let prepend = stack.prepend();
    let append = stack.append();

    // Everything below the video stays on planes; the client covers the top.
    let above = (prepend <= extra_device).then(|| {
        ClientRange::from_bounds(device.end() + (extra_device - prepend), layer_count)
    });
    // Everything above the video stays on planes; the client covers the bottom.
    let below = (append <= extra_device)
        .then(|| ClientRange::from_bounds(0, device.start - (extra_device - append)));

    match (above, below) {
        (Some(a), Some(b)) => {
            if cost.window_cost(b.start, b.size) < cost.window_cost(a.start, a.size) {
                Ok(b)
            } else {
                Ok(a)
            }
        }
        (Some(r), None) | (None, Some(r)) => Ok(r),
        (None, None) => Err(FallbackReason::SideOverReservation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{IntRect, Layer};
    use crate::pixops::PixelCost;
    use alloc::vec::Vec;

    fn uniform(n: usize) -> Vec<Layer> {
        (0..n).map(|_| Layer::new(IntRect::new(0, 0, 10, 10))).collect()
    }

    fn resolve(
        layers: &[Layer],
        planes: usize,
        client: ClientRange,
        device: DeviceRange,
    ) -> Resolution {
        grow_for_budget_with_video(layers.len(), planes, client, device, &PixelCost::new(layers))
    }

    #[test]
    fn video_at_bottom_takes_every_plane() {
        // 5 planes, minus 2 for the video pair, minus 1 client target = 2,
        // exactly the video block: every non-video layer goes client.
        let r = resolve(&uniform(6), 5, ClientRange::EMPTY, DeviceRange::new(0, 2));
        assert_eq!(r, Resolution::direct(ClientRange::new(2, 4)));
    }

    #[test]
    fn video_at_top_takes_every_plane() {
        let r = resolve(&uniform(6), 5, ClientRange::EMPTY, DeviceRange::new(4, 2));
        assert_eq!(r, Resolution::direct(ClientRange::new(0, 4)));
    }

    #[test]
    fn exact_budget_with_mid_stack_video_falls_back() {
        let layers = uniform(6);
        let r = resolve(&layers, 5, ClientRange::EMPTY, DeviceRange::new(2, 2));
        assert_eq!(r.fallback, Some(FallbackReason::VideoNotAtEdge));
        let plain = grow_for_budget(6, 5, ClientRange::EMPTY, &PixelCost::new(&layers));
        assert_eq!(r.range, plain);
    }

    #[test]
    fn video_over_budget_falls_back() {
        let r = resolve(&uniform(5), 3, ClientRange::EMPTY, DeviceRange::new(0, 2));
        assert_eq!(r.fallback, Some(FallbackReason::VideoOverBudget));
        let r = resolve(&uniform(5), 1, ClientRange::EMPTY, DeviceRange::new(0, 2));
        assert_eq!(r.fallback, Some(FallbackReason::VideoOverBudget));
        assert_eq!(r.range, ClientRange::full(5));
    }

    #[test]
    fn spare_planes_without_pressure_keep_range() {
        let r = resolve(&uniform(4), 8, ClientRange::EMPTY, DeviceRange::new(1, 1));
        assert_eq!(r, Resolution::direct(ClientRange::EMPTY));
        let r = resolve(&uniform(4), 8, ClientRange::new(3, 1), DeviceRange::new(1, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(3, 1)));
    }

    #[test]
    fn no_client_keeps_layers_next_to_video() {
        // Two spare planes: layers 1 and 2 stay on planes above the video.
        let r = resolve(&uniform(6), 5, ClientRange::EMPTY, DeviceRange::new(0, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(3, 3)));
    }

    #[test]
    fn no_client_picks_cheaper_side() {
        let areas = [50, 50, 50, 10, 1, 1, 1];
        let layers: Vec<Layer> = areas
            .iter()
            .map(|&a| Layer::new(IntRect::new(0, 0, a, 1)))
            .collect();
        let r = resolve(&layers, 6, ClientRange::EMPTY, DeviceRange::new(3, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(4, 3)));

        let flipped: Vec<Layer> = layers.iter().rev().cloned().collect();
        let r = resolve(&flipped, 6, ClientRange::EMPTY, DeviceRange::new(3, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(0, 3)));
    }

    #[test]
    fn no_client_equal_cost_prefers_top() {
        let r = resolve(&uniform(7), 6, ClientRange::EMPTY, DeviceRange::new(3, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(4, 3)));
    }

    #[test]
    fn no_client_with_both_sides_too_large_falls_back() {
        let r = resolve(&uniform(9), 6, ClientRange::EMPTY, DeviceRange::new(4, 1));
        assert_eq!(r.fallback, Some(FallbackReason::SideOverReservation));
        assert_eq!(r.range.size, 9 - 5);
    }

    #[test]
    fn client_below_video_absorbs_gap_first() {
        let r = resolve(&uniform(8), 6, ClientRange::new(1, 1), DeviceRange::new(5, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(0, 4)));
    }

    #[test]
    fn client_below_video_keeps_bottom_layers() {
        let r = resolve(&uniform(8), 7, ClientRange::new(3, 1), DeviceRange::new(4, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(1, 3)));
    }

    #[test]
    fn client_above_video_absorbs_gap_first() {
        let r = resolve(&uniform(8), 6, ClientRange::new(6, 1), DeviceRange::new(1, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(4, 4)));
    }

    #[test]
    fn client_above_video_keeps_top_layers() {
        let r = resolve(&uniform(8), 7, ClientRange::new(4, 1), DeviceRange::new(3, 1));
        assert_eq!(r, Resolution::direct(ClientRange::new(4, 3)));
    }

    #[test]
    fn far_side_over_reservation_falls_back() {
        let r = resolve(&uniform(8), 6, ClientRange::new(0, 1), DeviceRange::new(2, 1));
        assert_eq!(r.fallback, Some(FallbackReason::SideOverReservation));
        assert!(r.range.covers(&ClientRange::new(0, 1)));
    }

    #[test]
    fn overlapping_client_falls_back() {
        let r = resolve(&uniform(6), 5, ClientRange::new(1, 2), DeviceRange::new(2, 2));
        assert_eq!(r.fallback, Some(FallbackReason::ClientOverlapsVideo));
    }

    #[test]
    fn out_of_bounds_device_falls_back() {
        let r = resolve(&uniform(4), 8, ClientRange::EMPTY, DeviceRange::new(3, 2));
        assert_eq!(r.fallback, Some(FallbackReason::DeviceRangeOutOfBounds));
    }

    #[test]
    fn overflowing_device_range_falls_back() {
        let layers = uniform(4);
        let r = resolve(&layers, 3, ClientRange::EMPTY, DeviceRange::new(usize::MAX, 1));
        assert_eq!(r.fallback, Some(FallbackReason::DeviceRangeOutOfBounds));
        let plain = grow_for_budget(4, 3, ClientRange::EMPTY, &PixelCost::new(&layers));
        assert_eq!(r.range, plain);
    }

    #[test]
    fn empty_device_is_plain_resolution() {
        let layers = uniform(5);
        let r = resolve(&layers, 3, ClientRange::EMPTY, DeviceRange::new(2, 0));
        let plain = grow_for_budget(5, 3, ClientRange::EMPTY, &PixelCost::new(&layers));
        assert_eq!(r, Resolution::direct(plain));
    }

    /// Every direct resolution keeps the client range clear of the video
    /// block and fits video (two planes each) plus the remaining device
    /// layers in the budget. Fallbacks must satisfy the plain budget.
    #[test]
    fn sweep_respects_budget_or_reports_fallback() {
        for n in 1..=7 {
            let layers = uniform(n);
            let cost = PixelCost::new(&layers);
            for planes in 0..=n + 2 {
                for ds in 0..n {
                    for dn in 1..=n - ds {
                        let device = DeviceRange::new(ds, dn);
                        let mut clients = Vec::new();
                        clients.push(ClientRange::EMPTY);
                        for cs in 0..n {
                            for cn in 1..=n - cs {
                                clients.push(ClientRange::new(cs, cn));
                            }
                        }
                        for client in clients {
                            let r = grow_for_budget_with_video(n, planes, client, device, &cost);
                            let ctx = alloc::format!(
                                "n={n} planes={planes} client={client:?} device={device:?}"
                            );
                            assert!(r.range.end() <= n, "out of bounds {ctx}");
                            assert!(r.range.covers(&client), "lost mandatory {ctx}");
                            let reserve = usize::from(n > planes);
                            match r.fallback {
                                None => {
                                    assert!(!device.overlaps(&r.range), "client over video {ctx}");
                                    let other = n - dn - r.range.size;
                                    assert!(
                                        other + 2 * dn + reserve <= planes,
                                        "over budget {:?} {ctx}",
                                        r.range
                                    );
                                }
                                Some(_) => {
                                    let avail = planes.saturating_sub(reserve);
                                    assert!(
                                        n - r.range.size <= avail,
                                        "fallback over budget {ctx}"
                                    );
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
