pub mod projector;
pub mod screen_triangle;
pub mod triangle3d;
