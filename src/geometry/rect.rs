use nalgebra::Point2;

/// Axis-aligned rectangle in screen space.
///
/// `min`/`max` are inclusive corners; a rectangle always satisfies
/// `min.x <= max.x` and `min.y <= max.y` when built through [`Rect::enclosing`]
/// or [`Rect::new`] with ordered corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Rect {
    pub fn new(min: Point2<f32>, max: Point2<f32>) -> Self {
        Rect { min, max }
    }

    /// Tight bounds of three points, for arbitrary vertex permutations.
    pub fn enclosing(a: &Point2<f32>, b: &Point2<f32>, c: &Point2<f32>) -> Self {
        let min_x = a.x.min(b.x).min(c.x);
        let min_y = a.y.min(b.y).min(c.y);
        let max_x = a.x.max(b.x).max(c.x);
        let max_y = a.y.max(b.y).max(c.y);
        Rect {
            min: Point2::new(min_x, min_y),
            max: Point2::new(max_x, max_y),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2<f32> {
        Point2::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    /// AABB intersection test, inclusive of touching edges.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// Closed containment test for a single point.
    pub fn contains(&self, point: &Point2<f32>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// True when `other` lies entirely within this rectangle.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(&other.min) && self.contains(&other.max)
    }

    /// One of the four quadrants obtained by splitting at the center.
    /// Quadrant order: 0 = min/min, 1 = max/min, 2 = min/max, 3 = max/max.
    pub fn quadrant(&self, index: usize) -> Rect {
        let c = self.center();
        match index {
            0 => Rect::new(self.min, c),
            1 => Rect::new(Point2::new(c.x, self.min.y), Point2::new(self.max.x, c.y)),
            2 => Rect::new(Point2::new(self.min.x, c.y), Point2::new(c.x, self.max.y)),
            _ => Rect::new(c, self.max),
        }
    }
}
