use nalgebra::{Point3, Vector2, Vector3};

/// Borrowed view of one source triangle inside a mesh's buffers.
///
/// The references stay valid only while the owning buffers are unmodified;
/// the borrow checker enforces that a projection batch cannot outlive or
/// overlap a mutation of the source geometry.
#[derive(Debug, Clone, Copy)]
pub struct RasterTriangle3D<'a> {
    pub p1: &'a Point3<f32>,
    pub p2: &'a Point3<f32>,
    pub p3: &'a Point3<f32>,
    pub normal: &'a Vector3<f32>,
    /// Either absent or all three texture coordinates, never partial.
    pub uv: Option<[&'a Vector2<f32>; 3]>,
}

impl<'a> RasterTriangle3D<'a> {
    pub fn new(
        p1: &'a Point3<f32>,
        p2: &'a Point3<f32>,
        p3: &'a Point3<f32>,
        normal: &'a Vector3<f32>,
    ) -> Self {
        RasterTriangle3D {
            p1,
            p2,
            p3,
            normal,
            uv: None,
        }
    }

    pub fn with_uvs(mut self, uv: [&'a Vector2<f32>; 3]) -> Self {
        self.uv = Some(uv);
        self
    }

    pub fn has_uv(&self) -> bool {
        self.uv.is_some()
    }
}
