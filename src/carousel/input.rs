use super::{Carousel, CarouselEvent, Motion};
use crate::config::{Direction, KeyAction};
use crate::input::{Event, EventResponse, InputSource};
use crate::layout::ScrollSurface;
use crate::scheduler::FrameScheduler;

impl<S: ScrollSurface, F: FrameScheduler> Carousel<S, F> {
    /// Feed one input event.
    ///
    /// The toggle key flips press mode; while it is on, each directional
    /// key-down (OS repeats included) adds one scroll step of velocity.
    pub fn handle_event(&mut self, event: &Event) -> EventResponse {
        if !self.mounted {
            return EventResponse::Ignored;
        }

        match event {
            Event::KeyDown { key, .. } => match self.config.keys.action_for(key) {
                Some(KeyAction::TogglePressMode) => {
                    let enabled = self.scroll.toggle_input();
                    log::debug!("Press mode {}", if enabled { "on" } else { "off" });
                    self.emit(CarouselEvent::PressModeChanged(enabled));
                    EventResponse::Handled
                }
                Some(KeyAction::Nudge(direction)) if self.scroll.is_input_enabled() => {
                    self.nudge(direction);
                    EventResponse::Handled
                }
                _ => EventResponse::Ignored,
            },
            // Pointer scrolling is disabled on the launcher
            Event::Scroll { .. } => EventResponse::Handled,
            Event::KeyUp { .. } => EventResponse::Ignored,
        }
    }

    /// Drain `source`, returning how many events were handled.
    pub fn pump_input<I: InputSource>(&mut self, mut source: I) -> usize {
        let mut handled = 0;
        while let Some(event) = source.poll_event() {
            if self.handle_event(&event) == EventResponse::Handled {
                handled += 1;
            }
        }
        handled
    }

    fn nudge(&mut self, direction: Direction) {
        if self.is_snapping() {
            // Take the offset back from the snap; momentum resumes from here
            self.cancel_pending();
            log::debug!(
                "Snap preempted at offset {}",
                self.surface.scroll_offset()
            );
        }

        self.scroll.push(direction.sign() * self.config.scroll_step);
        log::trace!("Velocity now {}", self.scroll.velocity);

        if self.motion != Motion::Momentum {
            self.motion = Motion::Momentum;
            let now = self.last_frame_ms;
            self.update_scaling(now);
        }
        self.request_frame();
    }
}
