use crate::raster::triangle3d::RasterTriangle3D;
use log::warn;
use nalgebra::{Point3, Vector2, Vector3};

/// Owner of the persistent source geometry: vertex positions, per-face
/// normals, optional per-face UV triples and the face index list.
///
/// Projection borrows from these buffers; the borrows returned by
/// [`Mesh::triangles`] pin the mesh immutable for the batch's duration.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Point3<f32>>,
    pub face_normals: Vec<Vector3<f32>>,
    pub uvs: Option<Vec<[Vector2<f32>; 3]>>,
    pub faces: Vec<[usize; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<Point3<f32>>, faces: Vec<[usize; 3]>) -> Self {
        let mut mesh = Mesh {
            vertices,
            face_normals: Vec::new(),
            uvs: None,
            faces,
        };
        mesh.recompute_normals();
        mesh
    }

    /// Attaches one UV triple per face. Ignored with a warning when the
    /// count does not match the face list.
    pub fn with_uvs(mut self, uvs: Vec<[Vector2<f32>; 3]>) -> Self {
        if uvs.len() == self.faces.len() {
            self.uvs = Some(uvs);
        } else {
            warn!(
                "UV count {} does not match face count {}, ignoring UVs",
                uvs.len(),
                self.faces.len()
            );
        }
        self
    }

    /// Recomputes every face normal from the current vertex positions.
    /// Call after mutating `vertices` (e.g. a blendshape pass).
    pub fn recompute_normals(&mut self) {
        self.face_normals = self
            .faces
            .iter()
            .map(|face| {
                match (
                    self.vertices.get(face[0]),
                    self.vertices.get(face[1]),
                    self.vertices.get(face[2]),
                ) {
                    (Some(p1), Some(p2), Some(p3)) => (p2 - p1)
                        .cross(&(p3 - p1))
                        .try_normalize(1e-12)
                        .unwrap_or_else(Vector3::zeros),
                    _ => Vector3::zeros(),
                }
            })
            .collect();
    }

    /// Borrowed triangle views over the buffers. Faces with out-of-range
    /// indexes are skipped with a warning, matching the index validity
    /// checks done before rasterization.
    pub fn triangles(&self) -> Vec<RasterTriangle3D<'_>> {
        self.faces
            .iter()
            .enumerate()
            .filter_map(|(face_idx, face)| {
                let (Some(p1), Some(p2), Some(p3)) = (
                    self.vertices.get(face[0]),
                    self.vertices.get(face[1]),
                    self.vertices.get(face[2]),
                ) else {
                    warn!("face {face_idx} references missing vertices, skipping");
                    return None;
                };
                let mut triangle =
                    RasterTriangle3D::new(p1, p2, p3, &self.face_normals[face_idx]);
                if let Some(uvs) = &self.uvs {
                    let uv = &uvs[face_idx];
                    triangle = triangle.with_uvs([&uv[0], &uv[1], &uv[2]]);
                }
                Some(triangle)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        Mesh::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn normals_are_unit_length_and_consistent() {
        let mesh = unit_quad();
        assert_eq!(mesh.face_normals.len(), 2);
        for normal in &mesh.face_normals {
            assert!((normal.norm() - 1.0).abs() < 1e-6);
            // Counter-clockwise in XY gives +Z.
            assert!((normal.z - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn triangles_borrow_the_buffers() {
        let mesh = unit_quad();
        let triangles = mesh.triangles();
        assert_eq!(triangles.len(), 2);
        assert!(std::ptr::eq(triangles[0].p1, &mesh.vertices[0]));
        assert!(!triangles[0].has_uv());
    }

    #[test]
    fn invalid_faces_are_skipped() {
        let mesh = Mesh::new(
            vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            vec![[0, 1, 9]],
        );
        assert!(mesh.triangles().is_empty());
        assert_eq!(mesh.face_normals[0], Vector3::zeros());
    }

    #[test]
    fn uvs_attach_per_face() {
        let mesh = unit_quad().with_uvs(vec![
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 0.0),
                Vector2::new(1.0, 1.0),
            ],
            [
                Vector2::new(0.0, 0.0),
                Vector2::new(1.0, 1.0),
                Vector2::new(0.0, 1.0),
            ],
        ]);
        let triangles = mesh.triangles();
        assert!(triangles.iter().all(|t| t.has_uv()));
    }

    #[test]
    fn mismatched_uv_count_is_ignored() {
        let mesh = unit_quad().with_uvs(vec![[
            Vector2::new(0.0, 0.0),
            Vector2::new(1.0, 0.0),
            Vector2::new(1.0, 1.0),
        ]]);
        assert!(mesh.uvs.is_none());
    }
}
