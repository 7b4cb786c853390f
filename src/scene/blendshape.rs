use log::warn;
use nalgebra::{Point3, Vector3};

/// Weight-scaled vertex morph target.
///
/// Applies `offset * weight` to a subset of a mutable vertex buffer.
/// Purely a geometric deform; scheduling the weight over time is the
/// caller's concern.
#[derive(Debug, Clone)]
pub struct Blendshape {
    indexes: Vec<usize>,
    offsets: Vec<Vector3<f32>>,
    pub weight: f32,
}

impl Blendshape {
    /// `indexes` and `offsets` must pair up; the shorter of the two wins
    /// if they do not, with a warning.
    pub fn new(indexes: Vec<usize>, offsets: Vec<Vector3<f32>>) -> Self {
        if indexes.len() != offsets.len() {
            warn!(
                "blendshape index count {} does not match offset count {}",
                indexes.len(),
                offsets.len()
            );
        }
        Blendshape {
            indexes,
            offsets,
            weight: 0.0,
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Adds the weighted offsets into `vertices`. Out-of-range indexes are
    /// skipped with a warning.
    pub fn apply(&self, vertices: &mut [Point3<f32>]) {
        for (&index, offset) in self.indexes.iter().zip(&self.offsets) {
            match vertices.get_mut(index) {
                Some(vertex) => *vertex += offset * self.weight,
                None => warn!("blendshape index {index} out of range, skipping"),
            }
        }
    }
}
