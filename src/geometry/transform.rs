use nalgebra::{Point3, UnitQuaternion, Vector3};

/// Rigid transform with per-axis scale, as carried by a camera.
///
/// Every scale component must be non-zero; projection divides by it.
/// This is a documented precondition of the hot path, checked only by a
/// debug assertion at projection time, never at runtime in release builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Point3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub scale: Vector3<f32>,
}

impl Transform {
    pub fn new(position: Point3<f32>, rotation: UnitQuaternion<f32>, scale: Vector3<f32>) -> Self {
        Transform {
            position,
            rotation,
            scale,
        }
    }

    pub fn identity() -> Self {
        Transform {
            position: Point3::origin(),
            rotation: UnitQuaternion::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::identity()
    }
}
