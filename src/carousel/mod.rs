//! Momentum-scroll carousel controller.
//!
//! Data flow is keyboard -> velocity -> per-frame integration and rescaling
//! -> threshold reached -> snap animation -> idle. The controller owns at
//! most one pending frame at a time; every phase change cancels or reuses it
//! so two loops never fight over the offset.
//!
//! - `input`: press-mode toggle and directional impulses
//! - `momentum`: per-frame velocity integration
//! - `scale`: distance-to-center item scaling
//! - `snap`: eased center-snap animation

mod input;
mod momentum;
mod scale;
mod snap;

pub use scale::scale_for_distance;
pub use snap::{find_center_item, snap_target, CenterItem, SnapAnimation};

use crate::config::CarouselConfig;
use crate::layout::ScrollSurface;
use crate::scheduler::{Frame, FrameHandle, FrameScheduler};
use crate::scroll::ScrollState;

/// Hint shown while press mode is active
pub const PRESS_MODE_HINT: &str = "Press mode enabled (A/D to scroll)";

/// Notifications for the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    /// Press mode was toggled
    PressModeChanged(bool),
    /// The carousel came to rest on a different item
    CenterChanged { index: usize },
}

/// What the pending frame is for
#[derive(Debug, Clone, PartialEq)]
pub enum Motion {
    Idle,
    Momentum,
    Snapping(SnapAnimation),
}

type Listener = Box<dyn FnMut(CarouselEvent)>;

pub struct Carousel<S, F> {
    surface: S,
    scheduler: F,
    config: CarouselConfig,
    scroll: ScrollState,
    motion: Motion,
    /// The single outstanding frame request, if any
    pending: Option<FrameHandle>,
    mounted: bool,
    /// Timestamp of the latest frame or layout notification
    last_frame_ms: f64,
    reported_center: Option<usize>,
    listener: Option<Listener>,
}

impl<S: ScrollSurface, F: FrameScheduler> Carousel<S, F> {
    pub fn new(surface: S, scheduler: F, config: CarouselConfig) -> Self {
        Self {
            surface,
            scheduler,
            config,
            scroll: ScrollState::default(),
            motion: Motion::Idle,
            pending: None,
            mounted: false,
            last_frame_ms: 0.0,
            reported_center: None,
            listener: None,
        }
    }

    /// Register a callback for [`CarouselEvent`]s
    pub fn on_event<L: FnMut(CarouselEvent) + 'static>(mut self, listener: L) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub fn set_listener(&mut self, listener: Box<dyn FnMut(CarouselEvent)>) {
        self.listener = Some(listener);
    }

    /// Attach to the surface: reset state, scale every item once and center
    /// the nearest one.
    pub fn mount(&mut self, now_ms: f64) {
        self.cancel_pending();
        self.scroll.reset();
        self.motion = Motion::Idle;
        self.reported_center = None;
        self.mounted = true;
        log::debug!(
            "Carousel mounted with {} items at offset {}",
            self.surface.item_count(),
            self.surface.scroll_offset()
        );

        self.update_scaling(now_ms);
        self.snap_to_center();
    }

    /// Detach: cancel the pending frame and stop all motion.
    pub fn unmount(&mut self) {
        self.cancel_pending();
        self.scroll.stop();
        self.motion = Motion::Idle;
        self.mounted = false;
        log::debug!("Carousel unmounted");
    }

    /// Entry point for every frame the scheduler fires.
    ///
    /// Frames that are not the current pending request (cancelled or
    /// superseded) are dropped.
    pub fn on_frame(&mut self, frame: Frame) {
        if self.pending != Some(frame.handle) {
            log::trace!("Ignoring stale frame {:?}", frame.handle);
            return;
        }
        self.pending = None;
        self.last_frame_ms = frame.timestamp_ms;

        match self.motion {
            Motion::Idle => {}
            Motion::Momentum => self.momentum_frame(frame.timestamp_ms),
            Motion::Snapping(_) => self.snap_frame(frame.timestamp_ms),
        }
    }

    /// Host notification that the offset or the layout changed outside the
    /// frame loop.
    ///
    /// Rescales every item. Motion that paused on an unmeasurable viewport
    /// gets its frame back, and an idle carousel left off-center snaps.
    pub fn on_scroll(&mut self, now_ms: f64) {
        self.update_scaling(now_ms);
        if !self.mounted {
            return;
        }

        match self.motion {
            Motion::Idle => {
                self.snap_to_center();
            }
            _ if self.pending.is_none() => {
                log::debug!("Resuming paused motion");
                self.request_frame();
            }
            _ => {}
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    pub fn velocity(&self) -> f32 {
        self.scroll.velocity
    }

    pub fn scroll_offset(&self) -> f32 {
        self.surface.scroll_offset()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_input_enabled(&self) -> bool {
        self.scroll.is_input_enabled()
    }

    /// Momentum integration is running
    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating()
    }

    pub fn is_snapping(&self) -> bool {
        matches!(self.motion, Motion::Snapping(_))
    }

    /// Handle of the outstanding frame request
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Overlay text while press mode is on
    pub fn press_mode_hint(&self) -> Option<&'static str> {
        self.is_input_enabled().then_some(PRESS_MODE_HINT)
    }

    /// Request the next frame unless one is already outstanding.
    fn request_frame(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.schedule();
        if self.pending.is_none() {
            log::warn!("Frame scheduler refused a frame, carousel goes idle");
            self.scroll.stop();
            self.motion = Motion::Idle;
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            log::trace!("Cancelling frame {:?}", handle);
            self.scheduler.cancel(handle);
        }
    }

    fn emit(&mut self, event: CarouselEvent) {
        if let Some(listener) = self.listener.as_mut() {
            listener(event);
        }
    }

    /// Report the resting item if it differs from the last one reported.
    fn report_center(&mut self, index: usize) {
        if self.reported_center == Some(index) {
            return;
        }
        self.reported_center = Some(index);
        log::debug!("Center item is now {}", index);
        self.emit(CarouselEvent::CenterChanged { index });
    }
}
