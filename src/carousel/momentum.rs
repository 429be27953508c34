use super::{Carousel, Motion};
use crate::layout::ScrollSurface;
use crate::scheduler::FrameScheduler;
use crate::scroll::MomentumStep;

impl<S: ScrollSurface, F: FrameScheduler> Carousel<S, F> {
    /// One integrator frame: threshold check, decay, move, rescale, reschedule.
    pub(super) fn momentum_frame(&mut self, now_ms: f64) {
        if self.surface.viewport_bounds().is_none() {
            log::debug!("Viewport not measurable, momentum paused");
            return;
        }

        let step = self
            .scroll
            .advance_momentum(self.config.deceleration, self.config.snap_threshold);

        match step {
            MomentumStep::Settled => {
                log::debug!(
                    "Momentum settled at offset {}",
                    self.surface.scroll_offset()
                );
                self.motion = Motion::Idle;
                self.snap_to_center();
            }
            MomentumStep::Moved(velocity) => {
                // The surface clamps; velocity keeps decaying at the edges
                let offset = self.surface.scroll_offset() + velocity;
                self.surface.set_scroll_offset(offset);
                log::trace!(
                    "Momentum frame: velocity {} offset {}",
                    velocity,
                    self.surface.scroll_offset()
                );
                self.update_scaling(now_ms);
                self.request_frame();
            }
        }
    }
}
