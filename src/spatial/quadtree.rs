use crate::geometry::rect::Rect;

const DEFAULT_CAPACITY: usize = 8;
const DEFAULT_MAX_DEPTH: usize = 8;

/// Region quadtree over item ids keyed by their bounding rectangles.
///
/// The broad-phase consumer of the triangle bounds: a renderer inserts
/// projected triangles by `ScreenTriangle::bounds()` and queries tile
/// rects to prune the set before any per-pixel barycentric work. Queries
/// are conservative like the underlying overlap test: no false negatives.
#[derive(Debug)]
pub struct QuadTree {
    root: Node,
    capacity: usize,
    max_depth: usize,
    len: usize,
}

#[derive(Debug)]
struct Node {
    bounds: Rect,
    depth: usize,
    items: Vec<(usize, Rect)>,
    children: Option<Box<[Node; 4]>>,
}

impl QuadTree {
    pub fn new(bounds: Rect) -> Self {
        Self::with_limits(bounds, DEFAULT_CAPACITY, DEFAULT_MAX_DEPTH)
    }

    pub fn with_limits(bounds: Rect, capacity: usize, max_depth: usize) -> Self {
        QuadTree {
            root: Node {
                bounds,
                depth: 0,
                items: Vec::new(),
                children: None,
            },
            capacity: capacity.max(1),
            max_depth,
            len: 0,
        }
    }

    /// Inserts an item. Bounds that spill outside the tree's region are
    /// kept at the root so they can never be missed by a query.
    pub fn insert(&mut self, id: usize, bounds: Rect) {
        self.root.insert(id, bounds, self.capacity, self.max_depth);
        self.len += 1;
    }

    /// Ids of all items whose bounds overlap `query`.
    pub fn query(&self, query: &Rect) -> Vec<usize> {
        let mut hits = Vec::new();
        self.root.query(query, &mut hits);
        hits
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl Node {
    fn insert(&mut self, id: usize, bounds: Rect, capacity: usize, max_depth: usize) {
        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                if child.bounds.contains_rect(&bounds) {
                    child.insert(id, bounds, capacity, max_depth);
                    return;
                }
            }
            // Straddles a split line; stays at this level.
            self.items.push((id, bounds));
            return;
        }

        self.items.push((id, bounds));
        if self.items.len() > capacity && self.depth < max_depth {
            self.split(capacity, max_depth);
        }
    }

    fn split(&mut self, capacity: usize, max_depth: usize) {
        let make_child = |index: usize| Node {
            bounds: self.bounds.quadrant(index),
            depth: self.depth + 1,
            items: Vec::new(),
            children: None,
        };
        self.children = Some(Box::new([
            make_child(0),
            make_child(1),
            make_child(2),
            make_child(3),
        ]));

        let items = std::mem::take(&mut self.items);
        for (id, bounds) in items {
            self.insert(id, bounds, capacity, max_depth);
        }
    }

    fn query(&self, query: &Rect, hits: &mut Vec<usize>) {
        // Root holds out-of-region spill, so only prune below the root.
        if self.depth > 0 && !self.bounds.overlaps(query) {
            return;
        }
        for (id, bounds) in &self.items {
            if bounds.overlaps(query) {
                hits.push(*id);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                child.query(query, hits);
            }
        }
    }
}
