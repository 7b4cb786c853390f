//! Screen-space triangle rasterization core.
//!
//! The pipeline: a 3D triangle plus camera state goes through the
//! [`raster::projector::Projector`] to become a
//! [`raster::screen_triangle::ScreenTriangle`] carrying vertices, depth,
//! bounds and a pre-inverted barycentric denominator. Per-pixel queries
//! then run through the barycentric kernel for containment and
//! interpolation weights, and the triangle's bounds feed a
//! [`spatial::quadtree::QuadTree`] for broad-phase culling before any
//! per-pixel work happens.
//!
//! Projection and barycentric evaluation are pure, non-allocating and
//! lock-free; batches over frozen inputs parallelize freely.

pub mod geometry;
pub mod io;
pub mod material_system;
pub mod raster;
pub mod scene;
pub mod spatial;

pub use geometry::camera::Camera;
pub use geometry::rect::Rect;
pub use geometry::shape::{Ellipse, Shape};
pub use geometry::transform::Transform;
pub use io::config::{DEFAULT_EPSILON, RasterConfig};
pub use material_system::color::RGBColor;
pub use material_system::materials::{Material, SurfacePoint};
pub use raster::projector::{Projector, sort_back_to_front};
pub use raster::screen_triangle::{Barycentric, Denominator, ScreenTriangle};
pub use raster::triangle3d::RasterTriangle3D;
pub use scene::blendshape::Blendshape;
pub use scene::mesh::Mesh;
pub use spatial::quadtree::QuadTree;
