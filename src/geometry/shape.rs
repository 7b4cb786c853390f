use nalgebra::{Point2, Vector2};
use std::fmt::Debug;

/// A 2D region with a center, extent and rotation that can answer point
/// containment queries. Used by callers as stencil masks over the screen.
pub trait Shape: Debug + Send + Sync {
    fn center(&self) -> Point2<f32>;

    /// Full extent (width, height), not the semi-axes.
    fn size(&self) -> Vector2<f32>;

    /// Rotation about the center, in degrees.
    fn rotation(&self) -> f32;

    fn is_in_shape(&self, point: &Point2<f32>) -> bool;
}

/// Rotated ellipse defined by center, full size and rotation in degrees.
#[derive(Debug, Clone)]
pub struct Ellipse {
    center: Point2<f32>,
    semi_axes: Vector2<f32>,
    rotation: f32,
}

impl Ellipse {
    pub fn new(center: Point2<f32>, size: Vector2<f32>, rotation: f32) -> Self {
        Ellipse {
            center,
            semi_axes: size / 2.0,
            rotation,
        }
    }
}

impl Shape for Ellipse {
    fn center(&self) -> Point2<f32> {
        self.center
    }

    fn size(&self) -> Vector2<f32> {
        self.semi_axes * 2.0
    }

    fn rotation(&self) -> f32 {
        self.rotation
    }

    fn is_in_shape(&self, point: &Point2<f32>) -> bool {
        let x = point.x - self.center.x;
        let y = point.y - self.center.y;

        let (sin_r, cos_r) = self.rotation.to_radians().sin_cos();

        // Rotate the query point into the ellipse's local frame.
        let xp = x * cos_r - y * sin_r;
        let yp = y * cos_r + x * sin_r;

        let x_quot = xp * xp / (self.semi_axes.x * self.semi_axes.x);
        let y_quot = yp * yp / (self.semi_axes.y * self.semi_axes.y);

        x_quot + y_quot < 1.0
    }
}
