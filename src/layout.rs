//! Layout queries and the scrollable strip the carousel drives.

use crate::animation::{AnimationState, Transition};
use crate::geometry::Rect;
use crate::transform::Transform;

/// Live layout geometry, in viewport (screen) coordinates.
///
/// Bounds are queried every time they are needed and never cached by the
/// carousel; `None` means the element is not measurable yet.
pub trait LayoutProvider {
    fn item_count(&self) -> usize;
    fn item_bounds(&self, index: usize) -> Option<Rect>;
    fn viewport_bounds(&self) -> Option<Rect>;
}

/// A horizontally scrollable container the carousel can write to.
pub trait ScrollSurface: LayoutProvider {
    fn scroll_offset(&self) -> f32;

    /// `total content width - viewport width`, never negative
    fn max_scroll_offset(&self) -> f32;

    /// Assign the scroll offset. Out-of-range values are clamped by the
    /// container, never rejected.
    fn set_scroll_offset(&mut self, offset: f32);

    /// Apply a visual scale to an item, smoothed by `transition`.
    fn set_item_scale(&mut self, index: usize, scale: f32, now_ms: f64, transition: &Transition);
}

/// Geometry of a [`StripLayout`]
#[derive(Debug, Clone)]
pub struct StripConfig {
    /// Viewport rectangle on screen
    pub viewport: Rect,
    /// Fixed item width
    pub item_width: f32,
    /// Fixed item height (icon plus label)
    pub item_height: f32,
    /// Space between consecutive items
    pub gap: f32,
}

impl StripConfig {
    /// Full-screen strip of `width` x `height`, with the launcher's default
    /// spacing (gap of 11% of the viewport width).
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            item_width: 128.0,
            item_height: 184.0,
            gap: width * 0.11,
        }
    }

    pub fn viewport(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn item_size(mut self, width: f32, height: f32) -> Self {
        self.item_width = width;
        self.item_height = height;
        self
    }

    pub fn gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Side padding on both ends; half the viewport so the first and last
    /// items can reach the center.
    pub fn side_padding(&self) -> f32 {
        self.viewport.width / 2.0
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new(1920.0, 1080.0)
    }
}

/// Headless horizontal strip of fixed-size items.
///
/// Owns the scroll offset and the per-item scale transitions; a renderer
/// reads [`rendered_bounds`](Self::rendered_bounds) when painting.
#[derive(Debug)]
pub struct StripLayout {
    config: StripConfig,
    offset: f32,
    scales: Vec<AnimationState<f32>>,
}

impl StripLayout {
    pub fn new(config: StripConfig, item_count: usize) -> Self {
        let scales = (0..item_count)
            .map(|_| AnimationState::new(1.0, Transition::default()))
            .collect();
        Self {
            config,
            offset: 0.0,
            scales,
        }
    }

    pub fn config(&self) -> &StripConfig {
        &self.config
    }

    /// Total scrollable content width including side padding
    pub fn content_width(&self) -> f32 {
        let n = self.scales.len();
        let items = if n == 0 {
            0.0
        } else {
            n as f32 * self.config.item_width + (n - 1) as f32 * self.config.gap
        };
        items + self.config.side_padding() * 2.0
    }

    /// Resize the viewport; the offset is re-clamped to the new range.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.config.viewport = viewport;
        self.offset = self.offset.clamp(0.0, self.max_scroll_offset());
    }

    /// Scale the renderer should draw item `index` with at `now_ms`
    pub fn rendered_scale(&self, index: usize, now_ms: f64) -> Option<f32> {
        self.scales.get(index).map(|s| s.sample(now_ms))
    }

    /// Item bounds with its scale transform applied around its center
    pub fn rendered_bounds(&self, index: usize, now_ms: f64) -> Option<Rect> {
        let bounds = self.item_bounds(index)?;
        let scale = self.rendered_scale(index, now_ms)?;
        let transform = Transform::scale_about(bounds.center_x(), bounds.center_y(), scale);
        Some(transform.transform_rect(&bounds))
    }

    /// Whether any scale transition is still running at `now_ms`
    pub fn is_transitioning(&self, now_ms: f64) -> bool {
        self.scales.iter().any(|s| s.is_animating(now_ms))
    }
}

impl LayoutProvider for StripLayout {
    fn item_count(&self) -> usize {
        self.scales.len()
    }

    fn item_bounds(&self, index: usize) -> Option<Rect> {
        if index >= self.scales.len() {
            return None;
        }
        let viewport = self.config.viewport;
        let stride = self.config.item_width + self.config.gap;
        let x = viewport.x + self.config.side_padding() + index as f32 * stride - self.offset;
        let y = viewport.center_y() - self.config.item_height / 2.0;
        Some(Rect::new(
            x,
            y,
            self.config.item_width,
            self.config.item_height,
        ))
    }

    fn viewport_bounds(&self) -> Option<Rect> {
        let viewport = self.config.viewport;
        viewport.is_measurable().then_some(viewport)
    }
}

impl ScrollSurface for StripLayout {
    fn scroll_offset(&self) -> f32 {
        self.offset
    }

    fn max_scroll_offset(&self) -> f32 {
        (self.content_width() - self.config.viewport.width).max(0.0)
    }

    fn set_scroll_offset(&mut self, offset: f32) {
        if offset.is_nan() {
            return;
        }
        self.offset = offset.clamp(0.0, self.max_scroll_offset());
    }

    fn set_item_scale(&mut self, index: usize, scale: f32, now_ms: f64, transition: &Transition) {
        if let Some(state) = self.scales.get_mut(index) {
            state.animate_to_with(scale, now_ms, transition);
        }
    }
}
