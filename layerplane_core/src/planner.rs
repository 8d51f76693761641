// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-frame composition planner.
//!
//! [`Planner::validate`] runs one planning pass over a [`DisplaySnapshot`]:
//!
//! ```text
//!   Start ──► Flattened ─────────────────────────────────► Stamped
//!     │                                                      ▲
//!     └──► RangeComputed ──► BudgetResolved ─────────────────┘
//! ```
//!
//! A snapshot containing a layer the planner cannot reason about is rejected
//! at `Start` with [`ValidationResult::Unsupported`] and nothing is stamped.
//! Otherwise every layer leaves the pass marked client or device, the
//! display's [`DisplayStats`](crate::stats::DisplayStats) are updated, and
//! the result says whether any layer needs GPU composition.

use crate::backend::CommitTester;
use crate::classify::{CapabilityPolicy, LayerClassifier};
use crate::config::{PlannerConfig, Strategy};
use crate::display::{Display, DisplaySnapshot};
use crate::layer::Layer;
use crate::pixops::{CostModel, PixelCost};
use crate::range::{ClientRange, DeviceRange};
use crate::resolve::{
    Resolution, grow_for_budget, grow_for_budget_with_video, mandatory_client_range,
};
use crate::trace::{
    CommitTestEvent, FallbackEvent, PlanBeginEvent, PlanState, PlanSummary, RangeEvent,
    RangeStage, StateEvent, Tracer, count_u32,
};

/// Outcome of a planning pass, as reported to the composition stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    /// Every layer is on a hardware plane; nothing to composite.
    None,
    /// At least one layer was moved to the client target.
    HasChanges,
    /// The stack contains a layer kind the planner cannot handle.
    Unsupported,
}

impl ValidationResult {
    /// Short label for logs and traces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::HasChanges => "has-changes",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Decides, per frame, which layers get hardware planes.
///
/// The planner holds only configuration; all per-display state lives in the
/// [`Display`] passed to each call, so one planner can serve several
/// displays.
#[derive(Clone, Debug)]
pub struct Planner<C = CapabilityPolicy> {
    strategy: Strategy,
    classifier: C,
}

impl Planner<CapabilityPolicy> {
    /// Creates a planner with the stock classifier.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            strategy: config.strategy,
            classifier: config.capability,
        }
    }
}

impl Default for Planner<CapabilityPolicy> {
    fn default() -> Self {
        Self::new(PlannerConfig::default())
    }
}

impl<C: LayerClassifier> Planner<C> {
    /// Creates a planner with a custom classifier.
    #[must_use]
    pub fn with_classifier(strategy: Strategy, classifier: C) -> Self {
        Self {
            strategy,
            classifier,
        }
    }

    /// The configured strategy.
    #[must_use]
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The layer classifier.
    #[must_use]
    pub fn classifier(&self) -> &C {
        &self.classifier
    }

    /// Runs one planning pass.
    ///
    /// `video` reserves a block of video layers for hardware planes; pass
    /// `None` to treat every layer alike.
    pub fn validate(
        &self,
        display: &mut Display,
        snapshot: &mut DisplaySnapshot,
        video: Option<DeviceRange>,
        tracer: &mut Tracer<'_>,
    ) -> ValidationResult {
        self.run(display, snapshot, video, None, tracer)
    }

    /// Runs one planning pass and checks the resulting plan with `tester`.
    ///
    /// If the tester rejects a plan that keeps some layers on planes, the
    /// whole stack is re-stamped as client and
    /// [`failed_commit_tests`](crate::stats::DisplayStats::failed_commit_tests)
    /// is incremented.
    pub fn validate_with_test(
        &self,
        display: &mut Display,
        snapshot: &mut DisplaySnapshot,
        video: Option<DeviceRange>,
        tester: &mut dyn CommitTester,
        tracer: &mut Tracer<'_>,
    ) -> ValidationResult {
        self.run(display, snapshot, video, Some(tester), tracer)
    }

    fn run(
        &self,
        display: &mut Display,
        snapshot: &mut DisplaySnapshot,
        video: Option<DeviceRange>,
        tester: Option<&mut dyn CommitTester>,
        tracer: &mut Tracer<'_>,
    ) -> ValidationResult {
        let frame_index = display.next_frame_index();
        let layer_count = snapshot.layers.len();

        tracer.plan_begin(&PlanBeginEvent {
            frame_index,
            display: display.id,
            layer_count: count_u32(layer_count),
            usable_planes: count_u32(snapshot.usable_planes),
            flattening_eligible: snapshot.flattening_eligible,
        });
        enter(tracer, frame_index, PlanState::Start);

        if snapshot.layers.iter().any(|l| l.hint.is_unsupported()) {
            tracer.plan_summary(&PlanSummary {
                frame_index,
                display: display.id,
                result: ValidationResult::Unsupported,
                client: ClientRange::EMPTY,
                layer_count: count_u32(layer_count),
                flattened: false,
                gpu_pixel_ops: 0,
                total_pixel_ops: 0,
            });
            return ValidationResult::Unsupported;
        }

        let cost = PixelCost::new(&snapshot.layers);
        let mut flattened = false;
        let mut client = match self.strategy {
            Strategy::ClientOnly => ClientRange::full(layer_count),
            Strategy::Generic if snapshot.flattening_eligible => {
                flattened = true;
                display.stats.frames_flattened = display.stats.frames_flattened.saturating_add(1);
                enter(tracer, frame_index, PlanState::Flattened);
                ClientRange::full(layer_count)
            }
            Strategy::Generic => self.resolve(display, snapshot, video, &cost, frame_index, tracer),
        };

        stamp(&mut snapshot.layers, client);

        if let Some(tester) = tester
            && !client.is_full(layer_count)
        {
            let accepted = tester.test_commit(snapshot, client);
            tracer.commit_test(&CommitTestEvent {
                frame_index,
                accepted,
            });
            if !accepted {
                display.stats.failed_commit_tests =
                    display.stats.failed_commit_tests.saturating_add(1);
                client = ClientRange::full(layer_count);
                stamp(&mut snapshot.layers, client);
            }
        }

        enter(tracer, frame_index, PlanState::Stamped);
        #[cfg(feature = "trace-rich")]
        trace_decisions(tracer, frame_index, &snapshot.layers);

        let gpu_pixel_ops = cost.window_cost(client.start, client.size);
        let total_pixel_ops = cost.total();
        display.stats.record_pixels(gpu_pixel_ops, total_pixel_ops);

        let result = if client.is_empty() {
            ValidationResult::None
        } else {
            ValidationResult::HasChanges
        };
        tracer.plan_summary(&PlanSummary {
            frame_index,
            display: display.id,
            result,
            client,
            layer_count: count_u32(layer_count),
            flattened,
            gpu_pixel_ops,
            total_pixel_ops,
        });
        result
    }

    /// Builds the mandatory range and grows it for the plane budget.
    fn resolve(
        &self,
        display: &mut Display,
        snapshot: &DisplaySnapshot,
        video: Option<DeviceRange>,
        cost: &PixelCost,
        frame_index: u64,
        tracer: &mut Tracer<'_>,
    ) -> ClientRange {
        let layer_count = snapshot.layers.len();
        let mandatory = mandatory_client_range(&snapshot.layers, |layer| {
            self.classifier.is_client_layer(snapshot, layer)
        });
        enter(tracer, frame_index, PlanState::RangeComputed);
        tracer.range(&RangeEvent {
            frame_index,
            stage: RangeStage::Mandatory,
            range: mandatory,
        });

        let resolution = match video {
            Some(device) => grow_for_budget_with_video(
                layer_count,
                snapshot.usable_planes,
                mandatory,
                device,
                cost,
            ),
            None => Resolution::direct(grow_for_budget(
                layer_count,
                snapshot.usable_planes,
                mandatory,
                cost,
            )),
        };
        if let Some(reason) = resolution.fallback {
            display.stats.budget_fallbacks = display.stats.budget_fallbacks.saturating_add(1);
            tracer.fallback(&FallbackEvent {
                frame_index,
                reason,
            });
        }
        debug_assert!(
            resolution.range.covers(&mandatory),
            "{:?} dropped mandatory {mandatory:?}",
            resolution.range
        );

        enter(tracer, frame_index, PlanState::BudgetResolved);
        tracer.range(&RangeEvent {
            frame_index,
            stage: RangeStage::Resolved,
            range: resolution.range,
        });
        resolution.range
    }
}

fn enter(tracer: &mut Tracer<'_>, frame_index: u64, state: PlanState) {
    tracer.state(&StateEvent { frame_index, state });
}

/// Marks layers inside `client` as client composited and the rest as device.
fn stamp(layers: &mut [Layer], client: ClientRange) {
    for (z, layer) in layers.iter_mut().enumerate() {
        layer.stamp(client.contains(z));
    }
}

#[cfg(feature = "trace-rich")]
fn trace_decisions(tracer: &mut Tracer<'_>, frame_index: u64, layers: &[Layer]) {
    use crate::trace::LayerDecision;
    use alloc::vec::Vec;

    if !tracer.is_active() {
        return;
    }
    let decisions: Vec<LayerDecision> = layers
        .iter()
        .enumerate()
        .filter_map(|(z, l)| {
            l.validated().map(|kind| LayerDecision {
                z: count_u32(z),
                kind,
            })
        })
        .collect();
    tracer.layer_decisions(frame_index, &decisions);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{CompositionKind, IntRect};
    use crate::output::DisplayId;
    use alloc::vec;
    use alloc::vec::Vec;

    fn square(side: i32) -> Layer {
        Layer::new(IntRect::new(0, 0, side, side))
    }

    fn uniform(n: usize) -> Vec<Layer> {
        (0..n).map(|_| square(10)).collect()
    }

    fn client_mask(snapshot: &DisplaySnapshot) -> Vec<bool> {
        snapshot.layers.iter().map(Layer::is_client).collect()
    }

    fn plan(planner: &Planner, snapshot: &mut DisplaySnapshot) -> (ValidationResult, Display) {
        let mut display = Display::new(DisplayId(0));
        let result = planner.validate(&mut display, snapshot, None, &mut Tracer::none());
        (result, display)
    }

    struct Verdict {
        accept: bool,
        calls: usize,
        last: Option<ClientRange>,
    }

    impl Verdict {
        fn new(accept: bool) -> Self {
            Self {
                accept,
                calls: 0,
                last: None,
            }
        }
    }

    impl CommitTester for Verdict {
        fn test_commit(&mut self, _: &DisplaySnapshot, client: ClientRange) -> bool {
            self.calls += 1;
            self.last = Some(client);
            self.accept
        }
    }

    #[test]
    fn single_layer_is_flattened() {
        let planner = Planner::default();
        let mut display = Display::new(DisplayId(1));
        let mut snapshot = DisplaySnapshot::new(vec![square(32)], 4);
        display.prepare(&mut snapshot);
        assert!(snapshot.flattening_eligible);

        let result = planner.validate(&mut display, &mut snapshot, None, &mut Tracer::none());
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(client_mask(&snapshot), [true]);
        assert_eq!(display.stats.frames_flattened, 1);
        assert_eq!(display.stats.gpu_pixel_ops, 32 * 32);
    }

    #[test]
    fn unchanged_stack_flattens_every_repeat() {
        let mut layers = uniform(4);
        layers[1].hint = CompositionKind::SolidColor;
        let planner = Planner::default();
        let mut display = Display::new(DisplayId(2));
        let mut snapshot = DisplaySnapshot::new(layers, 8);

        let mut masks = Vec::new();
        let mut flattened = Vec::new();
        for _ in 0..3 {
            display.prepare(&mut snapshot);
            let result = planner.validate(&mut display, &mut snapshot, None, &mut Tracer::none());
            assert_eq!(result, ValidationResult::HasChanges);
            masks.push(client_mask(&snapshot));
            flattened.push(display.stats.frames_flattened);
        }

        assert_eq!(masks[0], [false, true, false, false]);
        assert_eq!(masks[1], [true; 4]);
        assert_eq!(masks[2], [true; 4]);
        assert_eq!(flattened, [0, 1, 2]);
    }

    #[test]
    fn flattened_empty_stack_has_no_changes() {
        let planner = Planner::default();
        let mut display = Display::new(DisplayId(0));
        let mut snapshot = DisplaySnapshot::new(Vec::new(), 4);
        display.prepare(&mut snapshot);
        assert!(snapshot.flattening_eligible);

        let result = planner.validate(&mut display, &mut snapshot, None, &mut Tracer::none());
        assert_eq!(result, ValidationResult::None);
        assert_eq!(display.stats.frames_flattened, 1);
        assert_eq!(display.stats.gpu_pixel_ops, 0);
    }

    #[test]
    fn stack_within_budget_needs_no_client() {
        let mut snapshot = DisplaySnapshot::new(uniform(4), 4);
        let (result, display) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::None);
        assert_eq!(client_mask(&snapshot), [false; 4]);
        for layer in &snapshot.layers {
            assert_eq!(layer.validated(), Some(CompositionKind::Device));
            assert!(layer.use_alternate_compose_path());
        }
        assert_eq!(display.stats.gpu_pixel_ops, 0);
        assert_eq!(display.stats.total_pixel_ops, 400);
        assert_eq!(display.stats.total_frames, 1);
    }

    #[test]
    fn over_budget_stack_merges_cheapest_window() {
        let layers = vec![square(10), square(1), square(1), square(1), square(10)];
        let mut snapshot = DisplaySnapshot::new(layers, 3);
        let (result, display) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(client_mask(&snapshot), [false, true, true, true, false]);
        assert_eq!(display.stats.gpu_pixel_ops, 3);
        for layer in snapshot.layers.iter().filter(|l| l.is_client()) {
            assert!(!layer.use_alternate_compose_path());
        }
    }

    #[test]
    fn single_unusable_layer_stays_alone() {
        let mut layers = uniform(5);
        layers[2].usable_as_device = false;
        let mut snapshot = DisplaySnapshot::new(layers, 8);
        let (result, _) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(client_mask(&snapshot), [false, false, true, false, false]);
    }

    #[test]
    fn scattered_client_layers_pull_in_the_gap() {
        let mut layers = uniform(6);
        layers[1].hint = CompositionKind::SolidColor;
        layers[4].hint = CompositionKind::Client;
        let mut snapshot = DisplaySnapshot::new(layers, 8);
        plan(&Planner::default(), &mut snapshot);
        assert_eq!(
            client_mask(&snapshot),
            [false, true, true, true, true, false]
        );
    }

    #[test]
    fn video_reservation_sends_the_rest_to_client() {
        let mut layers = uniform(6);
        layers[0].is_video = true;
        layers[1].is_video = true;
        let video = DeviceRange::from_video_layers(&layers);
        assert_eq!(video, Some(DeviceRange::new(0, 2)));

        let mut snapshot = DisplaySnapshot::new(layers, 5);
        let mut display = Display::new(DisplayId(0));
        let result = Planner::default().validate(
            &mut display,
            &mut snapshot,
            video,
            &mut Tracer::none(),
        );
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(
            client_mask(&snapshot),
            [false, false, true, true, true, true]
        );
        assert_eq!(display.stats.budget_fallbacks, 0);
    }

    #[test]
    fn video_fallback_is_counted() {
        let mut snapshot = DisplaySnapshot::new(uniform(6), 5);
        let mut display = Display::new(DisplayId(0));
        Planner::default().validate(
            &mut display,
            &mut snapshot,
            Some(DeviceRange::new(2, 2)),
            &mut Tracer::none(),
        );
        assert_eq!(display.stats.budget_fallbacks, 1);
        let device = snapshot.layers.iter().filter(|l| !l.is_client()).count();
        assert!(device <= 4);
    }

    #[test]
    fn overflowing_video_range_falls_back() {
        let mut snapshot = DisplaySnapshot::new(uniform(4), 3);
        let mut display = Display::new(DisplayId(0));
        let result = Planner::default().validate(
            &mut display,
            &mut snapshot,
            Some(DeviceRange::new(usize::MAX, 1)),
            &mut Tracer::none(),
        );
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(display.stats.budget_fallbacks, 1);
        let device = snapshot.layers.iter().filter(|l| !l.is_client()).count();
        assert!(device <= 2, "device={device}");
    }

    #[test]
    fn non_identity_color_transform_sends_everything_to_client() {
        let mut snapshot = DisplaySnapshot::new(uniform(3), 8);
        snapshot.color_transform_is_identity = false;
        let (result, display) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(client_mask(&snapshot), [true; 3]);
        assert_eq!(display.stats.frames_flattened, 0);
    }

    #[test]
    fn zero_planes_sends_everything_to_client() {
        let mut snapshot = DisplaySnapshot::new(uniform(3), 0);
        plan(&Planner::default(), &mut snapshot);
        assert_eq!(client_mask(&snapshot), [true; 3]);
    }

    #[test]
    fn empty_stack_has_no_changes() {
        let mut snapshot = DisplaySnapshot::new(vec![], 3);
        let (result, display) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::None);
        assert_eq!(display.stats.total_frames, 1);
    }

    #[test]
    fn client_only_strategy_ignores_budget() {
        let planner = Planner::new(PlannerConfig::client_only());
        let mut snapshot = DisplaySnapshot::new(uniform(2), 8);
        let (result, display) = plan(&planner, &mut snapshot);
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(client_mask(&snapshot), [true, true]);
        assert_eq!(display.stats.frames_flattened, 0);
    }

    #[test]
    fn scaling_goes_to_gpu_only_when_forced() {
        let mut layers = uniform(3);
        layers[0].requires_scaling_or_phasing = true;

        let mut snapshot = DisplaySnapshot::new(layers.clone(), 8);
        plan(&Planner::default(), &mut snapshot);
        assert_eq!(client_mask(&snapshot), [false; 3]);

        let forced = Planner::new(PlannerConfig::generic().with_forced_gpu_scaling(true));
        let mut snapshot = DisplaySnapshot::new(layers, 8);
        plan(&forced, &mut snapshot);
        assert_eq!(client_mask(&snapshot), [true, false, false]);
    }

    #[test]
    fn unsupported_layer_rejects_the_pass() {
        let mut layers = uniform(3);
        layers[1].hint = CompositionKind::DisplayDecoration;
        let mut snapshot = DisplaySnapshot::new(layers, 8);
        let (result, display) = plan(&Planner::default(), &mut snapshot);
        assert_eq!(result, ValidationResult::Unsupported);
        assert!(snapshot.layers.iter().all(|l| l.validated().is_none()));
        assert_eq!(display.stats.total_frames, 0);
        assert_eq!(display.passes(), 1);
    }

    #[test]
    fn rejected_commit_falls_back_to_full_client() {
        let mut snapshot = DisplaySnapshot::new(uniform(4), 4);
        let mut display = Display::new(DisplayId(0));
        let mut tester = Verdict::new(false);
        let result = Planner::default().validate_with_test(
            &mut display,
            &mut snapshot,
            None,
            &mut tester,
            &mut Tracer::none(),
        );
        assert_eq!(result, ValidationResult::HasChanges);
        assert_eq!(tester.calls, 1);
        assert_eq!(tester.last, Some(ClientRange::EMPTY));
        assert_eq!(client_mask(&snapshot), [true; 4]);
        assert_eq!(display.stats.failed_commit_tests, 1);
        assert_eq!(display.stats.gpu_pixel_ops, 400);
    }

    #[test]
    fn accepted_commit_keeps_plan() {
        let mut snapshot = DisplaySnapshot::new(uniform(5), 3);
        let mut display = Display::new(DisplayId(0));
        let mut tester = Verdict::new(true);
        Planner::default().validate_with_test(
            &mut display,
            &mut snapshot,
            None,
            &mut tester,
            &mut Tracer::none(),
        );
        assert_eq!(tester.calls, 1);
        assert_eq!(display.stats.failed_commit_tests, 0);
        assert_eq!(snapshot.layers.iter().filter(|l| l.is_client()).count(), 3);
    }

    #[test]
    fn full_client_plan_is_not_tested() {
        let planner = Planner::new(PlannerConfig::client_only());
        let mut snapshot = DisplaySnapshot::new(uniform(3), 3);
        let mut display = Display::new(DisplayId(0));
        let mut tester = Verdict::new(false);
        planner.validate_with_test(
            &mut display,
            &mut snapshot,
            None,
            &mut tester,
            &mut Tracer::none(),
        );
        assert_eq!(tester.calls, 0);
        assert_eq!(display.stats.failed_commit_tests, 0);
    }

    #[test]
    fn device_layers_never_exceed_planes() {
        let planner = Planner::default();
        for n in 0..9_usize {
            for planes in 0..7_usize {
                for mandatory in 0..n {
                    let mut layers: Vec<Layer> =
                        (0..n).map(|z| square(1 + (z as i32 * 7) % 5)).collect();
                    layers[mandatory].usable_as_device = false;
                    let mut snapshot = DisplaySnapshot::new(layers, planes);
                    plan(&planner, &mut snapshot);

                    let mask = client_mask(&snapshot);
                    let clients = mask.iter().filter(|c| **c).count();
                    let first = mask.iter().position(|c| *c);
                    let last = mask.iter().rposition(|c| *c);
                    if let (Some(first), Some(last)) = (first, last) {
                        assert_eq!(last - first + 1, clients, "client span not contiguous");
                    }
                    assert!(mask[mandatory], "mandatory layer left on a plane");
                    let device = n - clients;
                    let budget = if planes == 0 { 0 } else { planes - 1 };
                    assert!(
                        device <= budget,
                        "n={n} planes={planes} device={device}"
                    );
                }
            }
        }
    }

    #[test]
    fn passes_are_counted_per_display() {
        let planner = Planner::default();
        let mut display = Display::new(DisplayId(0));
        for _ in 0..3 {
            let mut snapshot = DisplaySnapshot::new(uniform(2), 4);
            planner.validate(&mut display, &mut snapshot, None, &mut Tracer::none());
        }
        assert_eq!(display.passes(), 3);
        assert_eq!(display.stats.total_frames, 3);
    }

    #[cfg(feature = "trace")]
    mod traced {
        use super::*;
        use crate::trace::TraceSink;

        #[derive(Default)]
        struct States {
            states: Vec<PlanState>,
            ranges: Vec<(RangeStage, ClientRange)>,
            summaries: Vec<PlanSummary>,
        }

        impl TraceSink for States {
            fn on_state(&mut self, e: &StateEvent) {
                self.states.push(e.state);
            }

            fn on_range(&mut self, e: &RangeEvent) {
                self.ranges.push((e.stage, e.range));
            }

            fn on_plan_summary(&mut self, s: &PlanSummary) {
                self.summaries.push(*s);
            }
        }

        #[test]
        fn generic_pass_walks_every_state() {
            let mut sink = States::default();
            let mut display = Display::new(DisplayId(2));
            let mut snapshot = DisplaySnapshot::new(uniform(5), 3);
            Planner::default().validate(
                &mut display,
                &mut snapshot,
                None,
                &mut Tracer::new(&mut sink),
            );
            assert_eq!(
                sink.states,
                [
                    PlanState::Start,
                    PlanState::RangeComputed,
                    PlanState::BudgetResolved,
                    PlanState::Stamped,
                ]
            );
            assert_eq!(sink.ranges[0], (RangeStage::Mandatory, ClientRange::EMPTY));
            assert_eq!(sink.ranges[1].1.size, 3);
            assert_eq!(sink.summaries.len(), 1);
            assert_eq!(sink.summaries[0].display, DisplayId(2));
            assert_eq!(sink.summaries[0].result, ValidationResult::HasChanges);
        }

        #[test]
        fn flattened_pass_skips_range_states() {
            let mut sink = States::default();
            let mut display = Display::new(DisplayId(0));
            let mut snapshot = DisplaySnapshot::new(uniform(1), 3);
            display.prepare(&mut snapshot);
            Planner::default().validate(
                &mut display,
                &mut snapshot,
                None,
                &mut Tracer::new(&mut sink),
            );
            assert_eq!(
                sink.states,
                [PlanState::Start, PlanState::Flattened, PlanState::Stamped]
            );
            assert!(sink.summaries[0].flattened);
        }
    }
}
