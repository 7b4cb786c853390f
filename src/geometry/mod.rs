pub mod camera;
pub mod rect;
pub mod shape;
pub mod transform;
