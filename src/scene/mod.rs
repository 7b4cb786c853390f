pub mod blendshape;
pub mod mesh;
