// hpui-interaction/tests/gesture_logic.rs

use hpui_core::{InteractionConfig, SurfaceRect, Vec2, Vec3};
use hpui_interaction::{
    CandidateSet, DispatchContext, GestureEventArgs, GestureKind, GestureLogic, GesturePhase, InteractionContext,
    InteractionData, Interactor, InteractorId, ManualClock, PlanarRegion, Region, RegionHandle, RegionRegistry,
    TapEventArgs,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing() {
    let _ = fmt::Subscriber::builder()
        .with_env_filter(EnvFilter::from_default_env().add_directive("hpui_interaction=trace".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

fn touching(entries: &[(RegionHandle, f32, Vec3)]) -> CandidateSet {
    entries
        .iter()
        .map(|(handle, distance, point)| (*handle, InteractionData::from_distance(*distance, *point)))
        .collect()
}

fn square(center: Vec3, half: f32) -> SurfaceRect {
    SurfaceRect::axis_aligned(center, Vec2::splat(half))
}

/// Slider that ends its own contact when a swipe starts, and records who
/// the interactor was on each event.
struct SnapSlider {
    z_order: i32,
    seen: Rc<RefCell<Vec<(GesturePhase, InteractorId)>>>,
}

impl Region for SnapSlider {
    fn z_order(&self) -> i32 {
        self.z_order
    }

    fn surface_coordinates(&self, point: Vec3) -> Vec2 {
        Vec2::new(point.x, point.z)
    }

    fn handles_gesture(&self, kind: GestureKind) -> bool {
        kind == GestureKind::Swipe
    }

    fn on_tap(&mut self, _args: TapEventArgs, _ctx: &mut DispatchContext<'_>) {}

    fn on_gesture(&mut self, args: GestureEventArgs, ctx: &mut DispatchContext<'_>) {
        self.seen.borrow_mut().push((args.phase, ctx.interactor()));
        if args.phase == GesturePhase::Start {
            ctx.request_release(args.origin);
            assert_eq!(ctx.pending().len(), 1);
        }
    }

    fn name(&self) -> &str {
        "snap_slider"
    }
}

#[test]
fn planar_region_receives_tap_in_surface_coordinates() {
    init_tracing();
    let mut button = PlanarRegion::new("button", square(Vec3::ZERO, 0.01));
    let taps = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&taps);
    button.subscribe_tap(move |args| sink.borrow_mut().push(args.position));

    let mut regions = RegionRegistry::new();
    let handle = regions.insert(Box::new(button));
    let clock = ManualClock::new();
    let mut logic = GestureLogic::new(InteractionContext::new(clock.clone()), InteractionConfig::default()).unwrap();

    logic.update(&mut regions, &touching(&[(handle, 0.002, Vec3::new(0.005, 0.0, 0.0))]));
    clock.advance(0.12);
    logic.update(&mut regions, &CandidateSet::new());

    let taps = taps.borrow();
    assert_eq!(taps.len(), 1);
    assert!((taps[0] - Vec2::new(0.75, 0.5)).length() < 1e-5);
}

#[test]
fn region_release_request_is_deferred_and_blocks_reengagement() {
    init_tracing();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut regions = RegionRegistry::new();
    let slider = regions.insert(Box::new(SnapSlider { z_order: 0, seen: Rc::clone(&seen) }));

    let interactor = InteractorId::new();
    let clock = ManualClock::new();
    let context = InteractionContext::new(clock.clone()).with_interactor(interactor);
    let mut logic = GestureLogic::new(context, InteractionConfig::default()).unwrap();

    logic.update(&mut regions, &touching(&[(slider, 0.001, Vec3::ZERO)]));
    clock.advance(0.05);
    logic.update(&mut regions, &touching(&[(slider, 0.001, Vec3::new(0.02, 0.0, 0.0))]));
    assert!(logic.is_engaged(slider));

    clock.advance(0.05);
    logic.update(&mut regions, &touching(&[(slider, 0.001, Vec3::new(0.03, 0.0, 0.0))]));
    assert!(!logic.is_engaged(slider));
    assert_eq!(*seen.borrow(), vec![(GesturePhase::Start, interactor), (GesturePhase::End, interactor)]);

    clock.advance(0.05);
    logic.update(&mut regions, &touching(&[(slider, 0.001, Vec3::new(0.04, 0.0, 0.0))]));
    assert!(!logic.is_engaged(slider));
    assert_eq!(seen.borrow().len(), 2);
}

#[rstest]
#[case::button_first(0, 1, "button")]
#[case::panel_first(1, 0, "panel")]
fn priority_follows_z_order(#[case] button_z: i32, #[case] panel_z: i32, #[case] expected: &str) {
    let mut regions = RegionRegistry::new();
    let button = regions.insert(Box::new(PlanarRegion::new("button", square(Vec3::ZERO, 0.01)).with_z_order(button_z)));
    let panel = regions.insert(Box::new(PlanarRegion::new("panel", square(Vec3::ZERO, 0.05)).with_z_order(panel_z)));
    let mut logic = GestureLogic::new(InteractionContext::new(ManualClock::new()), InteractionConfig::default()).unwrap();

    logic.update(&mut regions, &touching(&[(button, 0.010, Vec3::ZERO), (panel, 0.002, Vec3::ZERO)]));

    let winner = logic.priority_target().and_then(|handle| regions.get(handle)).map(|region| region.name().to_string());
    assert_eq!(winner.as_deref(), Some(expected));
    assert_eq!(logic.engaged().len(), 1);
}

#[rstest]
#[case(0.0149, true)]
#[case(0.015, false)]
#[case(0.02, false)]
fn selection_radius_is_exclusive(#[case] distance: f32, #[case] engaged: bool) {
    let mut regions = RegionRegistry::new();
    let key = regions.insert(Box::new(PlanarRegion::new("key", square(Vec3::ZERO, 0.01))));
    let mut logic = GestureLogic::new(InteractionContext::new(ManualClock::new()), InteractionConfig::default()).unwrap();

    logic.update(&mut regions, &touching(&[(key, distance, Vec3::ZERO)]));
    assert_eq!(logic.is_engaged(key), engaged);
    assert!(logic.is_hovered(key));
}

fn enabled_only(_: RegionHandle, region: &dyn Region, _: &InteractionData) -> bool {
    region.name() != "disabled"
}

#[test]
fn interactor_with_function_filter_and_fallback() {
    init_tracing();
    let mut regions = RegionRegistry::new();
    let disabled = regions.insert(Box::new(PlanarRegion::new("disabled", square(Vec3::ZERO, 0.01))));
    let mut list = PlanarRegion::new("list", square(Vec3::ZERO, 0.05))
        .with_z_order(1)
        .with_gestures(&[GestureKind::Swipe]);
    let swipes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&swipes);
    list.subscribe_gesture(move |args| sink.borrow_mut().push((args.phase, args.origin)));
    let list = regions.insert(Box::new(list));

    let finger = Rc::new(RefCell::new(Vec3::ZERO));
    let source = {
        let finger = Rc::clone(&finger);
        move |_: &RegionRegistry| {
            let point = *finger.borrow();
            touching(&[(disabled, 0.002, point), (list, 0.004, point)])
        }
    };
    let clock = ManualClock::new();
    let config = InteractionConfig { select_only_priority_target: false, ..Default::default() };
    let mut interactor = Interactor::new(source, InteractionContext::new(clock.clone()), config).unwrap();
    interactor
        .logic_mut()
        .add_select_filter(enabled_only);

    interactor.process(&mut regions);
    assert_eq!(interactor.logic().engaged(), vec![list]);
    assert!(!interactor.can_select(&regions, disabled));

    clock.advance(0.1);
    *finger.borrow_mut() = Vec3::new(0.0, 0.0, 0.02);
    interactor.process(&mut regions);

    assert_eq!(*swipes.borrow(), vec![(GesturePhase::Start, list)]);
    assert_eq!(interactor.collision_point(list), Vec3::new(0.0, 0.0, 0.02));
}

#[test]
fn drop_disposes_without_emitting() {
    let mut regions = RegionRegistry::new();
    let mut panel = PlanarRegion::new("panel", square(Vec3::ZERO, 0.05)).with_gestures(&[GestureKind::Swipe]);
    let ends = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&ends);
    panel.subscribe_gesture(move |args| {
        if args.phase == GesturePhase::End {
            *counter.borrow_mut() += 1;
        }
    });
    let panel = regions.insert(Box::new(panel));

    let clock = ManualClock::new();
    let mut logic = GestureLogic::new(InteractionContext::new(clock.clone()), InteractionConfig::default()).unwrap();
    logic.update(&mut regions, &touching(&[(panel, 0.001, Vec3::ZERO)]));
    clock.advance(0.1);
    logic.update(&mut regions, &touching(&[(panel, 0.001, Vec3::new(0.02, 0.0, 0.0))]));
    drop(logic);

    assert_eq!(*ends.borrow(), 0);
    assert_eq!(regions.len(), 1);
}
