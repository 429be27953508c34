use crate::geometry::Rect;

/// A 4x4 transformation matrix stored in row-major order.
///
/// Carousel items only ever need translate and scale, but the matrix form
/// keeps the layout compatible with renderers that upload it as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Matrix data in row-major order: [row0, row1, row2, row3]
    pub data: [f32; 16],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, 0.0, // row 1
            0.0, 0.0, 1.0, 0.0, // row 2
            0.0, 0.0, 0.0, 1.0, // row 3
        ],
    };

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, x, // row 0
                0.0, 1.0, 0.0, y, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Create a uniform scale transform around the origin
    pub fn scale(s: f32) -> Self {
        Self {
            data: [
                s, 0.0, 0.0, 0.0, // row 0
                0.0, s, 0.0, 0.0, // row 1
                0.0, 0.0, 1.0, 0.0, // row 2
                0.0, 0.0, 0.0, 1.0, // row 3
            ],
        }
    }

    /// Uniform scale pivoting on `(cx, cy)`, the equivalent of a centered
    /// CSS `transform-origin`.
    pub fn scale_about(cx: f32, cy: f32, s: f32) -> Self {
        Self::translate(cx, cy)
            .then(&Self::scale(s))
            .then(&Self::translate(-cx, -cy))
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let a = &self.data;
        let b = &other.data;

        let mut result = [0.0f32; 16];
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[i * 4 + k] * b[k * 4 + j];
                }
                result[i * 4 + j] = sum;
            }
        }

        Transform { data: result }
    }

    /// Transform a 2D point by this matrix
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let new_x = self.data[0] * x + self.data[1] * y + self.data[3];
        let new_y = self.data[4] * x + self.data[5] * y + self.data[7];
        (new_x, new_y)
    }

    /// Axis-aligned bounds of `rect` after this transform.
    /// Exact for translate/scale; rotation is never produced here.
    pub fn transform_rect(&self, rect: &Rect) -> Rect {
        let (x0, y0) = self.transform_point(rect.x, rect.y);
        let (x1, y1) = self.transform_point(rect.x + rect.width, rect.y + rect.height);
        Rect::new(x0.min(x1), y0.min(y1), (x1 - x0).abs(), (y1 - y0).abs())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_identity() {
        assert_eq!(Transform::default(), Transform::IDENTITY);
        assert_eq!(Transform::scale(1.0), Transform::IDENTITY);
    }

    #[test]
    fn test_translate_then_scale_order() {
        // Scale first, then translate
        let t = Transform::translate(10.0, 0.0).then(&Transform::scale(2.0));
        let (x, y) = t.transform_point(5.0, 5.0);
        assert!(approx_eq(x, 20.0));
        assert!(approx_eq(y, 10.0));
    }

    #[test]
    fn test_scale_about_keeps_pivot_fixed() {
        let t = Transform::scale_about(50.0, 20.0, 1.8);
        let (x, y) = t.transform_point(50.0, 20.0);
        assert!(approx_eq(x, 50.0));
        assert!(approx_eq(y, 20.0));
    }

    #[test]
    fn test_transform_rect_grows_around_center() {
        let rect = Rect::new(100.0, 0.0, 100.0, 40.0);
        let scaled = Transform::scale_about(rect.center_x(), rect.center_y(), 2.0)
            .transform_rect(&rect);
        assert!(approx_eq(scaled.width, 200.0));
        assert!(approx_eq(scaled.height, 80.0));
        assert!(approx_eq(scaled.center_x(), rect.center_x()));
        assert!(approx_eq(scaled.center_y(), rect.center_y()));
    }

    #[test]
    fn test_translate_moves_point() {
        let (x, y) = Transform::translate(3.0, 4.0).transform_point(1.0, 1.0);
        assert!(approx_eq(x, 4.0));
        assert!(approx_eq(y, 5.0));
    }
}
