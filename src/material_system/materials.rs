use crate::material_system::color::RGBColor;
use crate::raster::screen_triangle::Barycentric;
use nalgebra::Vector2;
use std::fmt::Debug;

/// Everything a material may sample for one covered point.
///
/// `uv` is present only when the source triangle carried texture
/// coordinates; UV-dependent materials must fall back when it is absent.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    pub barycentric: Barycentric,
    pub uv: Option<Vector2<f32>>,
    pub depth: f32,
}

/// Opaque shading boundary between the rasterization core and a renderer.
/// Materials are shared read-only across triangles and worker threads.
pub trait Material: Debug + Send + Sync {
    fn shade(&self, point: &SurfacePoint) -> RGBColor;
}

/// Flat color, ignores the surface point entirely.
#[derive(Debug, Clone, Copy)]
pub struct SolidMaterial {
    pub color: RGBColor,
}

impl SolidMaterial {
    pub fn new(color: RGBColor) -> Self {
        SolidMaterial { color }
    }
}

impl Material for SolidMaterial {
    fn shade(&self, _point: &SurfacePoint) -> RGBColor {
        self.color
    }
}

/// Blends three corner colors by the barycentric weights.
#[derive(Debug, Clone, Copy)]
pub struct BarycentricMaterial {
    pub c1: RGBColor,
    pub c2: RGBColor,
    pub c3: RGBColor,
}

impl BarycentricMaterial {
    pub fn new(c1: RGBColor, c2: RGBColor, c3: RGBColor) -> Self {
        BarycentricMaterial { c1, c2, c3 }
    }
}

impl Material for BarycentricMaterial {
    fn shade(&self, point: &SurfacePoint) -> RGBColor {
        let bary = &point.barycentric;
        let blend = |a: u8, b: u8, c: u8| {
            bary.interpolate(f32::from(a), f32::from(b), f32::from(c))
                .clamp(0.0, 255.0) as u8
        };
        RGBColor::new(
            blend(self.c1.r, self.c2.r, self.c3.r),
            blend(self.c1.g, self.c2.g, self.c3.g),
            blend(self.c1.b, self.c2.b, self.c3.b),
        )
    }
}

/// Fades between two colors by camera-space depth.
#[derive(Debug, Clone, Copy)]
pub struct DepthMaterial {
    pub near: f32,
    pub far: f32,
    pub near_color: RGBColor,
    pub far_color: RGBColor,
}

impl DepthMaterial {
    pub fn new(near: f32, far: f32, near_color: RGBColor, far_color: RGBColor) -> Self {
        DepthMaterial {
            near,
            far,
            near_color,
            far_color,
        }
    }
}

impl Material for DepthMaterial {
    fn shade(&self, point: &SurfacePoint) -> RGBColor {
        let span = self.far - self.near;
        let t = if span.abs() > f32::EPSILON {
            ((point.depth - self.near) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        RGBColor::interpolate(self.near_color, self.far_color, t)
    }
}

/// Checkerboard over UV space. Falls back to `base` when the triangle
/// carries no texture coordinates.
#[derive(Debug, Clone, Copy)]
pub struct CheckerMaterial {
    pub color1: RGBColor,
    pub color2: RGBColor,
    pub repeat: f32,
    pub base: RGBColor,
}

impl CheckerMaterial {
    pub fn new(color1: RGBColor, color2: RGBColor, repeat: f32) -> Self {
        CheckerMaterial {
            color1,
            color2,
            repeat,
            base: color1,
        }
    }
}

impl Material for CheckerMaterial {
    fn shade(&self, point: &SurfacePoint) -> RGBColor {
        match point.uv {
            Some(uv) => {
                let cell = (uv.x * self.repeat).floor() + (uv.y * self.repeat).floor();
                if cell.rem_euclid(2.0) < 1.0 {
                    self.color1
                } else {
                    self.color2
                }
            }
            None => self.base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(u: f32, v: f32, w: f32, uv: Option<Vector2<f32>>, depth: f32) -> SurfacePoint {
        SurfacePoint {
            barycentric: Barycentric { u, v, w },
            uv,
            depth,
        }
    }

    #[test]
    fn solid_ignores_inputs() {
        let m = SolidMaterial::new(RGBColor::RED);
        assert_eq!(m.shade(&point(0.2, 0.3, 0.5, None, 10.0)), RGBColor::RED);
    }

    #[test]
    fn barycentric_material_matches_weights() {
        let m = BarycentricMaterial::new(RGBColor::RED, RGBColor::GREEN, RGBColor::BLUE);

        let at_p1 = m.shade(&point(1.0, 0.0, 0.0, None, 0.0));
        assert_eq!(at_p1, RGBColor::RED);

        let mixed = m.shade(&point(0.5, 0.25, 0.25, None, 0.0));
        assert_eq!(mixed.r, 127);
        assert_eq!(mixed.g, 63);
        assert_eq!(mixed.b, 63);
    }

    #[test]
    fn depth_material_clamps_to_range() {
        let m = DepthMaterial::new(1.0, 11.0, RGBColor::WHITE, RGBColor::BLACK);
        assert_eq!(m.shade(&point(1.0, 0.0, 0.0, None, 0.0)), RGBColor::WHITE);
        assert_eq!(m.shade(&point(1.0, 0.0, 0.0, None, 50.0)), RGBColor::BLACK);
        let mid = m.shade(&point(1.0, 0.0, 0.0, None, 6.0));
        assert_eq!(mid.r, 127);
    }

    #[test]
    fn checker_requires_uv() {
        let m = CheckerMaterial::new(RGBColor::WHITE, RGBColor::BLACK, 2.0);

        let without_uv = m.shade(&point(1.0, 0.0, 0.0, None, 0.0));
        assert_eq!(without_uv, RGBColor::WHITE);

        let a = m.shade(&point(1.0, 0.0, 0.0, Some(Vector2::new(0.1, 0.1)), 0.0));
        let b = m.shade(&point(1.0, 0.0, 0.0, Some(Vector2::new(0.6, 0.1)), 0.0));
        assert_ne!(a, b);
    }
}
