use std::cell::RefCell;
use std::rc::Rc;

use kiosk_carousel::animation::Transition;
use kiosk_carousel::carousel::{scale_for_distance, Carousel, CarouselEvent, Motion};
use kiosk_carousel::config::CarouselConfig;
use kiosk_carousel::geometry::Rect;
use kiosk_carousel::input::{Event, ScriptedInput};
use kiosk_carousel::layout::{LayoutProvider, ScrollSurface, StripConfig, StripLayout};
use kiosk_carousel::scheduler::{FrameScheduler, VirtualScheduler};
use kiosk_carousel::scroll::frames_to_settle;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 5 items, 1000px viewport; item `i` is centered at offset `50 + 225 * i`,
/// so item 2 sits centered at offset 500.
fn launcher_strip(offset: f32) -> StripLayout {
    let config = StripConfig::new(1000.0, 400.0)
        .item_size(100.0, 150.0)
        .gap(125.0);
    let mut layout = StripLayout::new(config, 5);
    layout.set_scroll_offset(offset);
    layout
}

fn mounted_at(offset: f32) -> Carousel<StripLayout, VirtualScheduler> {
    init_logger();
    let mut carousel = Carousel::new(
        launcher_strip(offset),
        VirtualScheduler::new(16.0),
        CarouselConfig::default(),
    );
    carousel.mount(0.0);
    carousel
}

fn tick<S: ScrollSurface>(carousel: &mut Carousel<S, VirtualScheduler>) -> bool {
    match carousel.scheduler_mut().tick() {
        Some(frame) => {
            carousel.on_frame(frame);
            true
        }
        None => false,
    }
}

fn run_until_idle<S: ScrollSurface>(carousel: &mut Carousel<S, VirtualScheduler>) -> usize {
    let mut frames = 0;
    while tick(carousel) {
        frames += 1;
        assert!(
            carousel.scheduler().pending_count() <= 1,
            "more than one frame loop is running"
        );
        assert!(frames < 10_000, "frame loop never settled");
    }
    frames
}

#[test]
fn left_press_decays_then_snaps_back_to_center() {
    let mut carousel = mounted_at(500.0);
    assert_eq!(carousel.scheduler().pending_count(), 0);

    let mut input = ScriptedInput::new();
    input.type_keys("ja");
    carousel.pump_input(&mut input);
    assert_eq!(carousel.velocity(), -10.0);

    // Expected travel: every frame decays first, then moves
    let mut velocity = -10.0f32;
    let mut travel = 0.0f32;
    while velocity.abs() >= 1.5 {
        velocity *= 0.92;
        travel += velocity;
    }

    let mut momentum_frames = 0;
    while carousel.is_animating() {
        assert!(tick(&mut carousel));
        momentum_frames += 1;
    }
    // The last frame is the one that notices the threshold
    assert_eq!(momentum_frames, frames_to_settle(-10.0, 0.92, 1.5) + 1);
    assert!((carousel.scroll_offset() - (500.0 + travel)).abs() < 1e-2);
    assert!(carousel.scroll_offset() < 410.0);
    assert!(carousel.is_snapping());

    run_until_idle(&mut carousel);
    let center = carousel.center_item().unwrap();
    assert_eq!(center.index, 2);
    assert!(center.distance <= 1.0);
    assert!((carousel.scroll_offset() - 500.0).abs() <= 1.0);
    assert_eq!(*carousel.motion(), Motion::Idle);
}

#[test]
fn directional_keys_do_nothing_without_press_mode() {
    let mut carousel = mounted_at(500.0);
    let mut input = ScriptedInput::new();
    input.type_keys("adADad");
    assert_eq!(carousel.pump_input(&mut input), 0);

    assert_eq!(carousel.velocity(), 0.0);
    assert_eq!(carousel.scheduler().scheduled_count(), 0);
    assert_eq!(run_until_idle(&mut carousel), 0);
    assert_eq!(carousel.scroll_offset(), 500.0);
}

#[test]
fn new_input_preempts_snap_and_resumes_from_current_offset() {
    // Mounting off-center starts a snap towards item 2 at offset 500
    let mut carousel = mounted_at(430.0);
    assert!(carousel.is_snapping());

    for _ in 0..6 {
        assert!(tick(&mut carousel));
    }
    let snap_frame = carousel.pending_frame().unwrap();
    let offset_at_cancel = carousel.scroll_offset();
    assert!(offset_at_cancel > 430.0 && offset_at_cancel < 500.0);

    let cancelled_before = carousel.scheduler().cancelled_count();
    carousel.handle_event(&Event::char('j'));
    carousel.handle_event(&Event::char('d'));

    assert!(!carousel.scheduler().is_pending(snap_frame));
    assert_eq!(carousel.scheduler().cancelled_count(), cancelled_before + 1);
    assert_eq!(carousel.scheduler().pending_count(), 1);
    assert_eq!(*carousel.motion(), Motion::Momentum);
    assert_eq!(carousel.velocity(), 10.0);

    assert!(tick(&mut carousel));
    assert!((carousel.scroll_offset() - (offset_at_cancel + 9.2)).abs() < 1e-3);
}

#[test]
fn stale_frames_are_ignored() {
    let mut carousel = mounted_at(430.0);
    let stale = carousel.pending_frame().unwrap();
    carousel.handle_event(&Event::char('j'));
    carousel.handle_event(&Event::char('d'));
    let offset = carousel.scroll_offset();

    carousel.on_frame(kiosk_carousel::scheduler::Frame {
        handle: stale,
        timestamp_ms: 999.0,
    });
    assert_eq!(carousel.scroll_offset(), offset);
    assert_eq!(carousel.velocity(), 10.0);
}

#[test]
fn snapping_again_when_centered_is_a_noop() {
    let mut carousel = mounted_at(460.0);
    run_until_idle(&mut carousel);
    let offset = carousel.scroll_offset();
    let scheduled = carousel.scheduler().scheduled_count();

    assert!(!carousel.snap_to_center());
    assert_eq!(carousel.scroll_offset(), offset);
    assert_eq!(carousel.scheduler().scheduled_count(), scheduled);
}

#[test]
fn unmount_cancels_pending_frame() {
    let mut carousel = mounted_at(430.0);
    assert_eq!(carousel.scheduler().pending_count(), 1);
    carousel.unmount();
    assert_eq!(carousel.scheduler().pending_count(), 0);
    assert_eq!(carousel.pending_frame(), None);
}

#[test]
fn settling_on_a_new_item_reports_center_change() {
    init_logger();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let mut carousel = Carousel::new(
        launcher_strip(500.0),
        VirtualScheduler::new(16.0),
        CarouselConfig::default(),
    )
    .on_event(move |event| sink.borrow_mut().push(event));
    carousel.mount(0.0);

    let mut input = ScriptedInput::new();
    input.type_keys("jddd");
    carousel.pump_input(&mut input);
    run_until_idle(&mut carousel);

    assert_eq!(carousel.center_item().unwrap().index, 3);
    assert!((carousel.scroll_offset() - 725.0).abs() <= 1.0);
    assert_eq!(
        *events.borrow(),
        vec![
            CarouselEvent::CenterChanged { index: 2 },
            CarouselEvent::PressModeChanged(true),
            CarouselEvent::CenterChanged { index: 3 },
        ]
    );
}

#[test]
fn held_key_accumulates_and_stays_in_bounds() {
    let mut carousel = mounted_at(500.0);
    carousel.handle_event(&Event::char('j'));
    for _ in 0..100 {
        carousel.handle_event(&Event::char('a'));
    }
    assert_eq!(carousel.velocity(), -1000.0);

    run_until_idle(&mut carousel);
    // Pinned against the start, then centered on the first item
    assert_eq!(carousel.center_item().unwrap().index, 0);
    assert!((carousel.scroll_offset() - 50.0).abs() <= 1.0);
}

#[test]
fn empty_carousel_is_inert() {
    init_logger();
    let layout = StripLayout::new(StripConfig::new(1000.0, 400.0), 0);
    let mut carousel = Carousel::new(layout, VirtualScheduler::new(16.0), CarouselConfig::default());
    carousel.mount(0.0);

    assert_eq!(carousel.center_item(), None);
    assert!(!carousel.snap_to_center());
    assert_eq!(carousel.scheduler().pending_count(), 0);
}

/// Fixture surface without side padding: the outer items can never reach
/// the center, so snap targets must clamp.
struct PackedRow {
    viewport: Rect,
    offset: f32,
    item_width: f32,
    count: usize,
    scales: Vec<f32>,
}

impl PackedRow {
    /// 4 items of 300px in a 1000px viewport: max offset 200
    fn new(offset: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, 1000.0, 200.0),
            offset,
            item_width: 300.0,
            count: 4,
            scales: vec![1.0; 4],
        }
    }
}

impl LayoutProvider for PackedRow {
    fn item_count(&self) -> usize {
        self.count
    }

    fn item_bounds(&self, index: usize) -> Option<Rect> {
        (index < self.count).then(|| {
            Rect::new(
                index as f32 * self.item_width - self.offset,
                0.0,
                self.item_width,
                200.0,
            )
        })
    }

    fn viewport_bounds(&self) -> Option<Rect> {
        Some(self.viewport)
    }
}

impl ScrollSurface for PackedRow {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> f32 {
        (self.count as f32 * self.item_width - self.viewport.width).max(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn set_item_scale(&mut self, index: usize, scale: f32, _now_ms: f64, _transition: &Transition) {
        self.scales[index] = scale;
    }
}

#[test]
fn snap_target_clamps_to_scroll_range() {
    init_logger();
    // Item 1 is nearest at offset 30 but would need offset -50
    let mut carousel = Carousel::new(
        PackedRow::new(30.0),
        VirtualScheduler::new(16.0),
        CarouselConfig::default(),
    );
    carousel.mount(0.0);
    assert!(carousel.is_snapping());
    run_until_idle(&mut carousel);

    assert_eq!(carousel.scroll_offset(), 0.0);
    let center = carousel.center_item().unwrap();
    assert_eq!(center.index, 1);
    assert_eq!(center.distance, 50.0);

    // Already at the clamped target: nothing left to do
    assert!(!carousel.snap_to_center());

    let scales = &carousel.surface().scales;
    let expected = scale_for_distance(50.0, 1000.0 / 3.0, 1.8);
    assert!((scales[1] - expected).abs() < 1e-5);
    assert_eq!(scales[3], 1.0);
}

#[test]
fn snap_never_leaves_valid_range() {
    init_logger();
    for start in [0.0f32, 15.0, 90.0, 140.0, 170.0, 199.0, 200.0] {
        let mut carousel = Carousel::new(
            PackedRow::new(start),
            VirtualScheduler::new(16.0),
            CarouselConfig::default(),
        );
        carousel.mount(0.0);
        while tick(&mut carousel) {
            let offset = carousel.scroll_offset();
            assert!((0.0..=200.0).contains(&offset), "offset {} from {}", offset, start);
        }
        assert!(carousel.center_item().is_some());
    }
}

#[test]
fn scheduler_refusal_degrades_to_idle() {
    struct Refusing;

    impl FrameScheduler for Refusing {
        fn schedule(&mut self) -> Option<kiosk_carousel::scheduler::FrameHandle> {
            None
        }

        fn cancel(&mut self, _handle: kiosk_carousel::scheduler::FrameHandle) {}
    }

    init_logger();
    let mut carousel = Carousel::new(launcher_strip(430.0), Refusing, CarouselConfig::default());
    carousel.mount(0.0);
    assert_eq!(*carousel.motion(), Motion::Idle);

    carousel.handle_event(&Event::char('j'));
    carousel.handle_event(&Event::char('d'));
    assert!(!carousel.is_animating());
    assert_eq!(carousel.velocity(), 0.0);
    assert_eq!(carousel.scroll_offset(), 430.0);
}

#[test]
fn native_scroll_rescales_items() {
    let mut carousel = mounted_at(500.0);
    // Item 3 centered, moved by the host rather than the frame loop
    carousel.surface_mut().set_scroll_offset(725.0);
    carousel.on_scroll(1000.0);
    assert_eq!(*carousel.motion(), Motion::Idle);

    let strip = carousel.surface();
    let viewport = strip.viewport_bounds().unwrap();
    for index in 0..strip.item_count() {
        let bounds = strip.item_bounds(index).unwrap();
        let expected = scale_for_distance(
            (bounds.center_x() - viewport.center_x()).abs(),
            viewport.width / 3.0,
            1.8,
        );
        let rendered = strip.rendered_scale(index, 2000.0).unwrap();
        assert!(
            (rendered - expected).abs() < 1e-5,
            "item {}: {} vs {}",
            index,
            rendered,
            expected
        );
    }
    assert!((strip.rendered_scale(3, 2000.0).unwrap() - 1.8).abs() < 1e-5);
}

#[test]
fn mount_before_layout_snaps_once_measurable() {
    init_logger();
    let mut strip = launcher_strip(430.0);
    strip.set_viewport(Rect::new(0.0, 0.0, 0.0, 400.0));
    let mut carousel = Carousel::new(
        strip,
        VirtualScheduler::new(16.0),
        CarouselConfig::default(),
    );
    carousel.mount(0.0);
    assert_eq!(*carousel.motion(), Motion::Idle);
    assert_eq!(carousel.scheduler().pending_count(), 0);

    carousel
        .surface_mut()
        .set_viewport(Rect::new(0.0, 0.0, 1000.0, 400.0));
    carousel.on_scroll(16.0);
    assert!(carousel.is_snapping());

    run_until_idle(&mut carousel);
    assert!((carousel.scroll_offset() - 500.0).abs() <= 1.0);
    assert_eq!(carousel.center_item().map(|c| c.index), Some(2));
}

#[test]
fn non_decaying_deceleration_still_settles() {
    init_logger();
    let mut config = CarouselConfig::default();
    config.deceleration = 1.0;
    let mut carousel = Carousel::new(launcher_strip(500.0), VirtualScheduler::new(16.0), config);
    carousel.mount(0.0);

    let mut input = ScriptedInput::new();
    input.type_keys("jd");
    carousel.pump_input(&mut input);

    run_until_idle(&mut carousel);
    assert_eq!(carousel.velocity(), 0.0);
    assert_eq!(*carousel.motion(), Motion::Idle);
    assert!(carousel.center_item().unwrap().distance <= 1.0);
}
