use super::{Carousel, Motion};
use crate::animation::TimingFunction;
use crate::geometry::Rect;
use crate::layout::{LayoutProvider, ScrollSurface};
use crate::scheduler::FrameScheduler;

/// The item whose center is nearest the viewport center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenterItem {
    pub index: usize,
    /// Absolute horizontal distance between the two centers
    pub distance: f32,
    pub bounds: Rect,
}

/// An in-flight snap. `start_ms` is taken from the first frame it runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapAnimation {
    pub index: usize,
    pub start_offset: f32,
    pub target_offset: f32,
    pub start_ms: Option<f64>,
    pub duration_ms: f32,
}

impl SnapAnimation {
    /// Progress in `[0, 1]` at `now_ms`, latching the start time on first use.
    pub fn progress(&mut self, now_ms: f64) -> f32 {
        let start = *self.start_ms.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (((now_ms - start) / self.duration_ms as f64).clamp(0.0, 1.0)) as f32
    }

    /// Offset for an eased progress value
    pub fn offset_at(&self, eased: f32) -> f32 {
        self.start_offset + (self.target_offset - self.start_offset) * eased
    }
}

/// Argmin of `|item center - viewport center|` over all measurable items.
///
/// `None` with no items or an unmeasurable viewport.
pub fn find_center_item<L: LayoutProvider + ?Sized>(layout: &L) -> Option<CenterItem> {
    let viewport = layout.viewport_bounds()?;
    let center = viewport.center_x();

    let mut closest: Option<CenterItem> = None;
    for index in 0..layout.item_count() {
        let Some(bounds) = layout.item_bounds(index) else {
            continue;
        };
        let distance = (bounds.center_x() - center).abs();
        if closest.map_or(true, |c| distance < c.distance) {
            closest = Some(CenterItem {
                index,
                distance,
                bounds,
            });
        }
    }
    closest
}

/// Offset that puts `item_center` on `viewport_center`, clamped to
/// `[0, max_offset]`.
pub fn snap_target(current: f32, item_center: f32, viewport_center: f32, max_offset: f32) -> f32 {
    (current + (item_center - viewport_center)).clamp(0.0, max_offset.max(0.0))
}

impl<S: ScrollSurface, F: FrameScheduler> Carousel<S, F> {
    /// Nearest item to the viewport center, from live geometry
    pub fn center_item(&self) -> Option<CenterItem> {
        find_center_item(&self.surface)
    }

    /// Animate the nearest item onto the viewport center.
    ///
    /// A started snap owns the offset: the pending frame and any momentum
    /// are dropped. Returns whether an animation started; a carousel that is
    /// already centered within tolerance, unmeasurable, or empty is left
    /// untouched.
    pub fn snap_to_center(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let Some(viewport) = self.surface.viewport_bounds() else {
            return false;
        };
        let Some(center) = self.center_item() else {
            return false;
        };

        let current = self.surface.scroll_offset();
        let target = snap_target(
            current,
            center.bounds.center_x(),
            viewport.center_x(),
            self.surface.max_scroll_offset(),
        );

        if (target - current).abs() < self.config.center_tolerance {
            if self.is_snapping() {
                self.cancel_pending();
                self.motion = Motion::Idle;
            }
            self.report_center(center.index);
            return false;
        }

        self.cancel_pending();
        self.scroll.stop();
        log::debug!(
            "Snapping item {} from {} to {}",
            center.index,
            current,
            target
        );
        self.motion = Motion::Snapping(SnapAnimation {
            index: center.index,
            start_offset: current,
            target_offset: target,
            start_ms: None,
            duration_ms: self.config.snap_duration_ms,
        });
        self.request_frame();
        true
    }

    pub(super) fn snap_frame(&mut self, now_ms: f64) {
        let Motion::Snapping(snap) = &mut self.motion else {
            return;
        };
        let progress = snap.progress(now_ms);
        let eased = ease(&self.config.snap_timing, progress);
        let offset = snap.offset_at(eased);
        let index = snap.index;

        self.surface.set_scroll_offset(offset);
        self.update_scaling(now_ms);

        if progress < 1.0 {
            self.request_frame();
        } else {
            log::debug!("Snap finished at offset {}", self.surface.scroll_offset());
            self.motion = Motion::Idle;
            self.report_center(index);
        }
    }
}

fn ease(timing: &TimingFunction, progress: f32) -> f32 {
    // Exact endpoints regardless of the curve's rounding
    if progress >= 1.0 {
        1.0
    } else {
        timing.evaluate(progress)
    }
}
