use crate::geometry::transform::Transform;
use nalgebra::UnitQuaternion;

/// Camera state consumed by the projector: a transform plus an extra
/// look-direction rotation composed on top of the transform's own rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub transform: Transform,
    pub look_rotation: UnitQuaternion<f32>,
}

impl Camera {
    pub fn new(transform: Transform, look_rotation: UnitQuaternion<f32>) -> Self {
        Camera {
            transform,
            look_rotation,
        }
    }

    pub fn identity() -> Self {
        Camera {
            transform: Transform::identity(),
            look_rotation: UnitQuaternion::identity(),
        }
    }

    /// Inverse camera rotation used for projection.
    ///
    /// The composition order is fixed: camera rotation, then look rotation,
    /// then conjugate. Reversing it silently changes projected coordinates.
    pub fn inverse_rotation(&self) -> UnitQuaternion<f32> {
        (self.transform.rotation * self.look_rotation).conjugate()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    #[test]
    fn inverse_rotation_composition_order() {
        // Two non-commuting rotations; the inverse must undo look-then-camera.
        let cam_rot = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 0.7);
        let look_rot = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -1.1);

        let camera = Camera::new(
            Transform::new(
                nalgebra::Point3::origin(),
                cam_rot,
                Vector3::new(1.0, 1.0, 1.0),
            ),
            look_rot,
        );

        let expected = (cam_rot * look_rot).conjugate();
        let reversed = (look_rot * cam_rot).conjugate();
        let got = camera.inverse_rotation();

        assert!((got.coords - expected.coords).norm() < 1e-6);
        assert!((got.coords - reversed.coords).norm() > 1e-3);
    }

    #[test]
    fn identity_camera_does_not_rotate() {
        let camera = Camera::identity();
        let v = Vector3::new(1.0, 2.0, 3.0);
        let rotated = camera.inverse_rotation() * v;
        assert!((rotated - v).norm() < 1e-6);
    }
}
