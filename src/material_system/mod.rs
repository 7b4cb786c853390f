pub mod color;
pub mod materials;
