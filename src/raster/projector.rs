use crate::geometry::camera::Camera;
use crate::io::config::RasterConfig;
use crate::material_system::materials::Material;
use crate::raster::screen_triangle::ScreenTriangle;
use crate::raster::triangle3d::RasterTriangle3D;
use nalgebra::{Point2, Point3, Vector3};
use rayon::prelude::*;

/// Projects 3D source triangles into screen space.
///
/// Carries the degeneracy epsilon as explicit configuration instead of a
/// process-wide constant, so tests can run at different precision scales.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    epsilon: f32,
}

impl Projector {
    pub fn new(epsilon: f32) -> Self {
        Projector { epsilon }
    }

    pub fn from_config(config: &RasterConfig) -> Self {
        Projector {
            epsilon: config.raster.epsilon,
        }
    }

    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// Projects one source triangle through the camera.
    ///
    /// Screen point = `inverse_rotation * (vertex - position) / scale`,
    /// taking X,Y as the 2D coordinate and Z as camera-space depth.
    /// Precondition: every camera scale component is non-zero; violating
    /// it is undefined behavior of the caller, not a checked error.
    pub fn project<'a>(
        &self,
        camera: &Camera,
        source: &RasterTriangle3D<'a>,
        material: &'a dyn Material,
    ) -> ScreenTriangle<'a> {
        let scale = camera.transform.scale;
        debug_assert!(
            scale.x != 0.0 && scale.y != 0.0 && scale.z != 0.0,
            "camera scale must be non-zero"
        );

        let inverse_rotation = camera.inverse_rotation();
        let position = camera.transform.position;

        let view = |vertex: &Point3<f32>| -> Vector3<f32> {
            (inverse_rotation * (vertex - position)).component_div(&scale)
        };

        let view1 = view(source.p1);
        let view2 = view(source.p2);
        let view3 = view(source.p3);

        let average_depth = (view1.z + view2.z + view3.z) / 3.0;

        ScreenTriangle::new(
            Point2::new(view1.x, view1.y),
            Point2::new(view2.x, view2.y),
            Point2::new(view3.x, view3.y),
            average_depth,
            material,
            source.uv,
            source.p1,
            source.p2,
            source.p3,
            source.normal,
            self.epsilon,
        )
    }

    /// Parallel projection of a frozen batch.
    ///
    /// The caller guarantees the source geometry and camera state stay
    /// read-only for the duration of the batch; the borrows on the returned
    /// triangles enforce this for the mesh buffers.
    pub fn project_batch<'a>(
        &self,
        camera: &Camera,
        sources: &[RasterTriangle3D<'a>],
        material: &'a dyn Material,
    ) -> Vec<ScreenTriangle<'a>> {
        sources
            .par_iter()
            .map(|source| self.project(camera, source, material))
            .collect()
    }
}

impl Default for Projector {
    fn default() -> Self {
        Projector {
            epsilon: crate::io::config::DEFAULT_EPSILON,
        }
    }
}

/// Orders projected triangles back-to-front by average depth, for painter's
/// style drawing. Ordering is the caller's business; the core never sorts
/// the triangles it produces.
pub fn sort_back_to_front(triangles: &mut [ScreenTriangle<'_>]) {
    triangles.sort_by(|a, b| {
        b.average_depth()
            .partial_cmp(&a.average_depth())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
