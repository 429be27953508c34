use super::Carousel;
use crate::layout::ScrollSurface;
use crate::scheduler::FrameScheduler;

/// Scale for an item `distance` away from the viewport center.
///
/// Quadratic falloff: `max_scale` on the center, 1 at `max_distance` and
/// beyond.
pub fn scale_for_distance(distance: f32, max_distance: f32, max_scale: f32) -> f32 {
    if !(max_distance > 0.0) {
        return 1.0;
    }
    let t = (distance.abs() / max_distance).min(1.0);
    let falloff = 1.0 - t;
    1.0 + (max_scale - 1.0) * falloff * falloff
}

impl<S: ScrollSurface, F: FrameScheduler> Carousel<S, F> {
    /// Recompute every item's scale from live geometry.
    pub fn update_scaling(&mut self, now_ms: f64) {
        let Some(viewport) = self.surface.viewport_bounds() else {
            return;
        };
        self.last_frame_ms = now_ms;

        let center = viewport.center_x();
        let max_distance = viewport.width * self.config.scale_window;
        for index in 0..self.surface.item_count() {
            let Some(bounds) = self.surface.item_bounds(index) else {
                continue;
            };
            let distance = (bounds.center_x() - center).abs();
            let scale = scale_for_distance(distance, max_distance, self.config.max_scale);
            self.surface
                .set_item_scale(index, scale, now_ms, &self.config.scale_transition);
        }
    }
}
