//! Basic geometry shared by the layout and the carousel.

/// An axis-aligned rectangle in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal center of the rectangle
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical center of the rectangle
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// A rect is measurable once it has a non-zero, finite width.
    pub fn is_measurable(&self) -> bool {
        self.width.is_finite() && self.width > 0.0
    }
}
