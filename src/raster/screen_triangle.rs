use crate::geometry::rect::Rect;
use crate::material_system::materials::{Material, SurfacePoint};
use nalgebra::{Point2, Point3, Vector2, Vector3};
use std::fmt;

/// Pre-inverted barycentric denominator, or the degenerate marker.
///
/// `Valid` holds `1 / (v0.x * v1.y - v1.x * v0.y)`. A triangle whose raw
/// denominator magnitude falls at or below the epsilon threshold is
/// `Degenerate` and never reports any point as inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Denominator {
    Degenerate,
    Valid(f32),
}

impl Denominator {
    /// Computes the denominator from the edge-vector basis, applying the
    /// epsilon degeneracy guard.
    pub fn from_edges(v0: &Vector2<f32>, v1: &Vector2<f32>, epsilon: f32) -> Self {
        let denominator = v0.x * v1.y - v1.x * v0.y;
        if denominator.abs() > epsilon {
            Denominator::Valid(1.0 / denominator)
        } else {
            Denominator::Degenerate
        }
    }

    pub fn inverse(&self) -> Option<f32> {
        match self {
            Denominator::Valid(inv) => Some(*inv),
            Denominator::Degenerate => None,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, Denominator::Degenerate)
    }
}

/// Affine weights of a point with respect to a triangle's vertices,
/// in the fixed order `u` for p1, `v` for p2, `w` for p3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Barycentric {
    pub u: f32,
    pub v: f32,
    pub w: f32,
}

impl Barycentric {
    /// Closed inclusive containment: points exactly on an edge count as
    /// inside. A pixel on a shared edge may therefore be claimed by both
    /// adjacent triangles; callers needing watertight tiling must break
    /// the tie themselves.
    pub fn is_inside(&self) -> bool {
        self.u >= 0.0 && self.v >= 0.0 && self.w >= 0.0
    }

    /// Affine blend of one scalar attribute per vertex.
    pub fn interpolate(&self, a: f32, b: f32, c: f32) -> f32 {
        self.u * a + self.v * b + self.w * c
    }

    /// Affine blend of one 2D attribute per vertex (UVs).
    pub fn interpolate_vec2(
        &self,
        a: &Vector2<f32>,
        b: &Vector2<f32>,
        c: &Vector2<f32>,
    ) -> Vector2<f32> {
        a * self.u + b * self.v + c * self.w
    }
}

/// A 3D triangle projected into screen space, with the derived data needed
/// for fast containment and interpolation queries.
///
/// Ephemeral: built once per frame (or visibility pass) from a persistent
/// source triangle and camera state, both of which it borrows. Vertex order
/// is insertion order and is never resorted; the sign conventions of the
/// barycentric basis depend on it.
#[derive(Debug, Clone, Copy)]
pub struct ScreenTriangle<'a> {
    pub p1: Point2<f32>,
    pub p2: Point2<f32>,
    pub p3: Point2<f32>,
    v0: Vector2<f32>,
    v1: Vector2<f32>,
    denominator: Denominator,
    bounds: Rect,
    average_depth: f32,
    material: &'a dyn Material,
    uv: Option<[&'a Vector2<f32>; 3]>,
    world_p1: &'a Point3<f32>,
    world_p2: &'a Point3<f32>,
    world_p3: &'a Point3<f32>,
    world_normal: &'a Vector3<f32>,
}

impl<'a> ScreenTriangle<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        p1: Point2<f32>,
        p2: Point2<f32>,
        p3: Point2<f32>,
        average_depth: f32,
        material: &'a dyn Material,
        uv: Option<[&'a Vector2<f32>; 3]>,
        world_p1: &'a Point3<f32>,
        world_p2: &'a Point3<f32>,
        world_p3: &'a Point3<f32>,
        world_normal: &'a Vector3<f32>,
        epsilon: f32,
    ) -> Self {
        let mut triangle = ScreenTriangle {
            p1,
            p2,
            p3,
            v0: Vector2::zeros(),
            v1: Vector2::zeros(),
            denominator: Denominator::Degenerate,
            bounds: Rect::new(p1, p1),
            average_depth,
            material,
            uv,
            world_p1,
            world_p2,
            world_p3,
            world_normal,
        };
        triangle.recalculate(epsilon);
        triangle
    }

    /// Recomputes the edge-vector basis, denominator and bounds wholesale
    /// from the current vertices. Must be called after mutating `p1..p3`;
    /// a pure function of the vertex values, idempotent bit-for-bit.
    pub fn recalculate(&mut self, epsilon: f32) {
        self.v0 = self.p2 - self.p1;
        self.v1 = self.p3 - self.p1;
        self.denominator = Denominator::from_edges(&self.v0, &self.v1, epsilon);
        self.bounds = Rect::enclosing(&self.p1, &self.p2, &self.p3);
    }

    /// Evaluates barycentric coordinates at `(x, y)`.
    ///
    /// Returns `None` iff the triangle is degenerate. The weights satisfy
    /// `u + v + w == 1` in exact arithmetic; floating-point rounding is
    /// tolerated and never renormalized.
    pub fn barycentric(&self, x: f32, y: f32) -> Option<Barycentric> {
        let inv = self.denominator.inverse()?;

        let q = Vector2::new(x - self.p1.x, y - self.p1.y);
        let v = (q.x * self.v1.y - self.v1.x * q.y) * inv;
        let w = (self.v0.x * q.y - q.x * self.v0.y) * inv;
        let u = 1.0 - v - w;

        Some(Barycentric { u, v, w })
    }

    /// Containment query. Degenerate triangles report false for every point.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.barycentric(x, y).is_some_and(|bary| bary.is_inside())
    }

    /// Broad-phase bounding-box test against a spatial-index query region.
    /// Conservative: never a false negative, false positives expected.
    pub fn overlaps(&self, query: &Rect) -> bool {
        self.bounds.overlaps(query)
    }

    /// Samples everything a material needs at `(x, y)`, or `None` when the
    /// point is outside (or the triangle is degenerate).
    pub fn surface_point(&self, x: f32, y: f32) -> Option<SurfacePoint> {
        let bary = self.barycentric(x, y)?;
        if !bary.is_inside() {
            return None;
        }
        let uv = self
            .uv
            .map(|[a, b, c]| bary.interpolate_vec2(a, b, c));
        Some(SurfacePoint {
            barycentric: bary,
            uv,
            depth: self.average_depth,
        })
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Mean camera-space depth of the three source vertices, for
    /// back-to-front ordering by the caller. The core never sorts.
    pub fn average_depth(&self) -> f32 {
        self.average_depth
    }

    pub fn denominator(&self) -> Denominator {
        self.denominator
    }

    pub fn material(&self) -> &'a dyn Material {
        self.material
    }

    pub fn uv(&self) -> Option<[&'a Vector2<f32>; 3]> {
        self.uv
    }

    pub fn has_uv(&self) -> bool {
        self.uv.is_some()
    }

    pub fn world_points(&self) -> [&'a Point3<f32>; 3] {
        [self.world_p1, self.world_p2, self.world_p3]
    }

    pub fn world_normal(&self) -> &'a Vector3<f32> {
        self.world_normal
    }
}

/// Diagnostic rendering: three space-separated vertex coordinates.
/// Informational only, not a stable machine-readable format.
impl fmt::Display for ScreenTriangle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] [{}, {}] [{}, {}]",
            self.p1.x, self.p1.y, self.p2.x, self.p2.y, self.p3.x, self.p3.y
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material_system::color::RGBColor;
    use crate::material_system::materials::SolidMaterial;

    const EPSILON: f32 = 1e-5;

    static WORLD_P1: Point3<f32> = Point3::new(0.0, 0.0, 5.0);
    static WORLD_P2: Point3<f32> = Point3::new(1.0, 0.0, 5.0);
    static WORLD_P3: Point3<f32> = Point3::new(0.0, 1.0, 5.0);
    static WORLD_NORMAL: Vector3<f32> = Vector3::new(0.0, 0.0, -1.0);
    static MATERIAL: SolidMaterial = SolidMaterial {
        color: RGBColor::new(255, 255, 255),
    };

    fn triangle(p1: Point2<f32>, p2: Point2<f32>, p3: Point2<f32>) -> ScreenTriangle<'static> {
        ScreenTriangle::new(
            p1,
            p2,
            p3,
            5.0,
            &MATERIAL,
            None,
            &WORLD_P1,
            &WORLD_P2,
            &WORLD_P3,
            &WORLD_NORMAL,
            EPSILON,
        )
    }

    #[test]
    fn affine_partition_sums_to_one() {
        let tri = triangle(
            Point2::new(-1.3, 0.2),
            Point2::new(4.1, -2.0),
            Point2::new(0.7, 3.9),
        );
        for (x, y) in [(0.0, 0.0), (1.5, 0.5), (-3.0, 7.0), (100.0, -50.0)] {
            let bary = tri.barycentric(x, y).unwrap();
            assert!((bary.u + bary.v + bary.w - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn vertices_map_to_unit_weights() {
        let p1 = Point2::new(0.5, -0.5);
        let p2 = Point2::new(3.0, 1.0);
        let p3 = Point2::new(-1.0, 2.5);
        let tri = triangle(p1, p2, p3);

        let at_p1 = tri.barycentric(p1.x, p1.y).unwrap();
        assert!((at_p1.u - 1.0).abs() < 1e-5 && at_p1.v.abs() < 1e-5 && at_p1.w.abs() < 1e-5);

        let at_p2 = tri.barycentric(p2.x, p2.y).unwrap();
        assert!((at_p2.v - 1.0).abs() < 1e-5 && at_p2.u.abs() < 1e-5 && at_p2.w.abs() < 1e-5);

        let at_p3 = tri.barycentric(p3.x, p3.y).unwrap();
        assert!((at_p3.w - 1.0).abs() < 1e-5 && at_p3.u.abs() < 1e-5 && at_p3.v.abs() < 1e-5);
    }

    #[test]
    fn collinear_triangle_is_degenerate_everywhere() {
        let tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        );
        assert!(tri.denominator().is_degenerate());
        assert_eq!(tri.denominator().inverse(), None);

        for (x, y) in [(0.0, 0.0), (1.0, 1.0), (0.5, 0.5), (10.0, -3.0)] {
            assert!(!tri.contains(x, y));
            assert!(tri.barycentric(x, y).is_none());
        }
    }

    #[test]
    fn interpolation_example() {
        let tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let bary = tri.barycentric(1.0, 1.0).unwrap();
        assert!((bary.u - 0.5).abs() < 1e-6);
        assert!((bary.v - 0.25).abs() < 1e-6);
        assert!((bary.w - 0.25).abs() < 1e-6);
        assert!(bary.is_inside());
        assert!(tri.contains(1.0, 1.0));
    }

    #[test]
    fn boundary_points_count_as_inside() {
        let tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        // Edge midpoint, vertex, and hypotenuse point.
        assert!(tri.contains(2.0, 0.0));
        assert!(tri.contains(0.0, 0.0));
        assert!(tri.contains(2.0, 2.0));
        assert!(!tri.contains(2.1, 2.1));
    }

    #[test]
    fn bounds_are_tight() {
        let tri = triangle(
            Point2::new(3.0, -1.0),
            Point2::new(-2.0, 4.0),
            Point2::new(0.5, 0.5),
        );
        assert_eq!(tri.bounds().min, Point2::new(-2.0, -1.0));
        assert_eq!(tri.bounds().max, Point2::new(3.0, 4.0));
    }

    #[test]
    fn overlap_has_no_false_negatives() {
        let tri = triangle(
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(1.0, 2.0),
        );
        // Strictly containing rect must overlap.
        let query = Rect::new(Point2::new(0.0, 0.0), Point2::new(3.0, 3.0));
        assert!(tri.overlaps(&query));
        // Touching rect counts too.
        let touching = Rect::new(Point2::new(2.0, 0.0), Point2::new(4.0, 1.0));
        assert!(tri.overlaps(&touching));
        let far = Rect::new(Point2::new(5.0, 5.0), Point2::new(6.0, 6.0));
        assert!(!tri.overlaps(&far));
    }

    #[test]
    fn recalculate_is_idempotent() {
        let mut tri = triangle(
            Point2::new(0.1, 0.2),
            Point2::new(2.3, -1.7),
            Point2::new(-0.9, 1.4),
        );
        let denom_once = tri.denominator();
        let bounds_once = *tri.bounds();

        tri.recalculate(EPSILON);
        assert_eq!(tri.denominator(), denom_once);
        assert_eq!(*tri.bounds(), bounds_once);
    }

    #[test]
    fn recalculate_tracks_mutated_vertices() {
        let mut tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert!(tri.contains(0.25, 0.25));

        tri.p2 = Point2::new(10.0, 0.0);
        tri.p3 = Point2::new(0.0, 10.0);
        tri.recalculate(EPSILON);

        assert!(tri.contains(4.0, 4.0));
        assert_eq!(tri.bounds().max, Point2::new(10.0, 10.0));
    }

    #[test]
    fn epsilon_threshold_controls_degeneracy() {
        // Area small but non-zero: degenerate under a coarse epsilon,
        // valid under a fine one.
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(1.0, 0.0);
        let p3 = Point2::new(0.0, 1e-4);

        let mut tri = triangle(p1, p2, p3);
        tri.recalculate(1e-3);
        assert!(tri.denominator().is_degenerate());

        tri.recalculate(1e-6);
        assert!(!tri.denominator().is_degenerate());
    }

    #[test]
    fn display_lists_three_points() {
        let tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_eq!(tri.to_string(), "[0, 0] [1, 0] [0, 1]");
    }

    #[test]
    fn surface_point_reports_uv_only_when_present() {
        let tri = triangle(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        );
        let sp = tri.surface_point(1.0, 1.0).unwrap();
        assert!(sp.uv.is_none());
        assert_eq!(sp.depth, 5.0);

        static UV1: Vector2<f32> = Vector2::new(0.0, 0.0);
        static UV2: Vector2<f32> = Vector2::new(1.0, 0.0);
        static UV3: Vector2<f32> = Vector2::new(0.0, 1.0);
        let textured = ScreenTriangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
            5.0,
            &MATERIAL,
            Some([&UV1, &UV2, &UV3]),
            &WORLD_P1,
            &WORLD_P2,
            &WORLD_P3,
            &WORLD_NORMAL,
            EPSILON,
        );
        let uv = textured.surface_point(1.0, 1.0).unwrap().uv.unwrap();
        assert!((uv.x - 0.25).abs() < 1e-6);
        assert!((uv.y - 0.25).abs() < 1e-6);

        assert!(textured.surface_point(5.0, 5.0).is_none());
    }
}
