// Copyright 2026 the Layerplane Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated display that exercises the planner and the diagnostics pipeline.
//!
//! Runs 120 synthetic frames of a media-player screen through the
//! [`Planner`], recording events to both a
//! [`PrettyPrintSink`](layerplane_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](layerplane_debug::recorder::RecorderSink), then exports a
//! Chrome trace JSON file.
//!
//! Usage: `plan_demo [driver] [strategy]`, e.g. `plan_demo kirin` or
//! `plan_demo msm client`.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Rect, Vec2};
use layerplane_core::config::PlannerConfig;
use layerplane_core::display::Display;
use layerplane_core::output::DisplayId;
use layerplane_core::planner::{Planner, ValidationResult};
use layerplane_core::range::DeviceRange;
use layerplane_core::trace::{
    CommitTestEvent, FallbackEvent, LayerDecision, PlanBeginEvent, PlanSummary, RangeEvent,
    StateEvent, TraceSink, Tracer,
};
use layerplane_debug::pretty::PrettyPrintSink;
use layerplane_debug::recorder::RecorderSink;
use layerplane_harness::check::check_plan;
use layerplane_harness::doubles::PlaneLimit;
use layerplane_harness::fixtures::StackBuilder;
use layerplane_harness::load::{LoadSample, LoadTracker};
use layerplane_render::CompositionPlan;

const FRAME_COUNT: u64 = 120;
/// 16.6ms refresh interval in microseconds (≈60 Hz).
const FRAME_INTERVAL_US: f64 = 16_666.7;
const USABLE_PLANES: usize = 6;
/// Planes the simulated controller really drives while the on-screen
/// keyboard is up.
const KEYBOARD_PLANE_LIMIT: usize = 4;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_plan_begin(&mut self, e: &PlanBeginEvent) {
        self.a.on_plan_begin(e);
        self.b.on_plan_begin(e);
    }

    fn on_state(&mut self, e: &StateEvent) {
        self.a.on_state(e);
        self.b.on_state(e);
    }

    fn on_range(&mut self, e: &RangeEvent) {
        self.a.on_range(e);
        self.b.on_range(e);
    }

    fn on_fallback(&mut self, e: &FallbackEvent) {
        self.a.on_fallback(e);
        self.b.on_fallback(e);
    }

    fn on_commit_test(&mut self, e: &CommitTestEvent) {
        self.a.on_commit_test(e);
        self.b.on_commit_test(e);
    }

    fn on_plan_summary(&mut self, s: &PlanSummary) {
        self.a.on_plan_summary(s);
        self.b.on_plan_summary(s);
    }

    fn on_layer_decisions(&mut self, frame_index: u64, decisions: &[LayerDecision]) {
        self.a.on_layer_decisions(frame_index, decisions);
        self.b.on_layer_decisions(frame_index, decisions);
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let driver = args.next().unwrap_or_else(|| "msm".to_owned());
    let strategy = args.next();
    let config = PlannerConfig::for_driver(&driver, strategy.as_deref())
        .unwrap_or_else(|err| panic!("bad strategy: {err}"));
    println!("driver={driver} strategy={}", config.strategy);

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- planner -----------------------------------------------------------
    let planner = Planner::new(config);
    let mut display = Display::new(DisplayId(0));
    let mut plan = CompositionPlan::new(display.id);
    let mut load = LoadTracker::<30>::new();

    // -- simulated loop ----------------------------------------------------
    for frame_index in 0..FRAME_COUNT {
        let scene = Scene::at(frame_index);
        let mut snapshot = scene.build().snapshot(USABLE_PLANES);
        display.prepare(&mut snapshot);
        let video = DeviceRange::from_video_layers(&snapshot.layers);

        let before = display.stats;
        let mut tester = PlaneLimit::new(if scene.keyboard {
            KEYBOARD_PLANE_LIMIT
        } else {
            USABLE_PLANES
        });
        let result = {
            let mut tee = Tee {
                a: &mut pretty,
                b: &mut recorder,
            };
            planner.validate_with_test(
                &mut display,
                &mut snapshot,
                video,
                &mut tester,
                &mut Tracer::new(&mut tee),
            )
        };
        if result == ValidationResult::Unsupported {
            continue;
        }

        let violations = check_plan(&snapshot, planner.classifier());
        for v in &violations {
            println!("  ! {v}");
        }

        match plan.rebuild(&snapshot) {
            Ok(()) => println!(
                "  plan: {} items, {} planes, client {:?}",
                plan.items.len(),
                plan.planes_required(),
                plan.client_range(),
            ),
            Err(err) => println!("  plan: {err}"),
        }

        let report = load.observe(LoadSample::from_delta(&display.stats.delta(&before)));
        if (frame_index + 1) % 30 == 0 {
            println!(
                "  load: grade={} mean={:.1}% degraded={:.0}/1000 [{}]",
                report.grade.as_str(),
                report.mean_gpu_share,
                report.degraded_per_1000,
                load.sparkline_ascii(),
            );
        }
    }

    println!("{}", display.stats);

    // -- export Chrome trace -----------------------------------------------
    let path = "plan_trace.json";
    let file = File::create(path).expect("failed to create plan_trace.json");
    let mut writer = BufWriter::new(file);
    layerplane_debug::chrome::export(recorder.as_bytes(), FRAME_INTERVAL_US, &mut writer)
        .expect("failed to write Chrome trace");

    println!("Wrote {path} ({FRAME_COUNT} frames)");
}

/// What is on screen in a given frame.
#[derive(Clone, Copy, Debug)]
struct Scene {
    /// Notification toast offset; `None` when no toast is shown.
    toast: Option<f64>,
    /// The on-screen keyboard is up.
    keyboard: bool,
    /// The video is playing.
    video: bool,
    /// Cursor position.
    cursor: Vec2,
}

impl Scene {
    fn at(frame_index: u64) -> Self {
        let t = frame_index as f64;
        Self {
            // Toast slides in over frames 20..50, then sits still.
            toast: (20..80).contains(&frame_index).then(|| (t - 20.0).min(30.0) * 8.0),
            keyboard: (60..90).contains(&frame_index),
            video: frame_index < 100,
            // Cursor moves for the first 40 frames only, so later frames can
            // flatten once everything else settles.
            cursor: Vec2::new(t.min(40.0) * 20.0, 300.0),
        }
    }

    fn build(&self) -> StackBuilder {
        let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let mut stack = StackBuilder::new(screen.width(), screen.height()).fullscreen();
        if self.video {
            let video = Rect::new(160.0, 90.0, 1760.0, 990.0);
            stack = stack.video(video).video(video);
        }
        stack = stack.layer(Rect::new(0.0, 980.0, 1920.0, 1080.0));
        if let Some(offset) = self.toast {
            stack = stack.layer(Rect::new(1520.0, offset - 120.0, 1900.0, offset));
        }
        if self.keyboard {
            stack = stack.scaled(Rect::new(0.0, 640.0, 1920.0, 1080.0));
        }
        let cursor = Rect::from_origin_size(self.cursor.to_point(), (32.0, 32.0));
        stack.layer(cursor)
    }
}
