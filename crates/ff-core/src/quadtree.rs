//! Quadtree spatial index over placed room rectangles.
//!
//! Built fresh for every generation pass to answer "does this candidate
//! overlap anything already placed" without scanning the whole room
//! list. The index is approximate on the storage side (objects that
//! straddle a quadrant midline stay in the parent) but exact on the
//! query side: `retrieve` never omits a stored rectangle that truly
//! intersects the range.

use crate::geom::Rect;

/// Objects a node holds before it splits
pub const MAX_OBJECTS: usize = 10;

/// Maximum subdivision depth
pub const MAX_DEPTH: u32 = 5;

/// A quadtree node over axis-aligned rectangles
#[derive(Debug, Clone)]
pub struct QuadTree {
    bounds: Rect,
    depth: u32,
    objects: Vec<Rect>,
    /// Children are stored as [top_left, top_right, bottom_left, bottom_right]
    children: Option<Box<[QuadTree; 4]>>,
}

impl QuadTree {
    /// Create a root node covering `bounds`
    pub fn new(bounds: Rect) -> Self {
        Self::with_depth(bounds, 0)
    }

    fn with_depth(bounds: Rect, depth: u32) -> Self {
        Self {
            bounds,
            depth,
            objects: Vec::new(),
            children: None,
        }
    }

    /// The region this node covers
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Check if this node is a leaf (has not split)
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Insert a rectangle.
    ///
    /// Returns false (and stores nothing) when `rect` is not fully
    /// contained in this node's bounds.
    pub fn insert(&mut self, rect: Rect) -> bool {
        if !self.bounds.contains_rect(&rect) {
            return false;
        }

        if let Some(children) = &mut self.children {
            for child in children.iter_mut() {
                if child.bounds.contains_rect(&rect) {
                    return child.insert(rect);
                }
            }
            // Straddles a midline: stays at this level
            self.objects.push(rect);
            return true;
        }

        self.objects.push(rect);
        if self.objects.len() > MAX_OBJECTS && self.depth < MAX_DEPTH {
            self.split();
        }
        true
    }

    /// Subdivide into four quadrants that exactly tile the bounds and
    /// push down every object a single quadrant fully contains.
    ///
    /// Floor division sizes the left/top quadrants; the remainder goes
    /// to the right/bottom ones, so odd extents leave no gap.
    fn split(&mut self) {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.bounds;

        let left_w = width / 2;
        let right_w = width - left_w;
        let top_h = height / 2;
        let bottom_h = height - top_h;

        let next_depth = self.depth + 1;
        let mut children = Box::new([
            QuadTree::with_depth(Rect::new(x, y, left_w, top_h), next_depth),
            QuadTree::with_depth(Rect::new(x + left_w, y, right_w, top_h), next_depth),
            QuadTree::with_depth(Rect::new(x, y + top_h, left_w, bottom_h), next_depth),
            QuadTree::with_depth(
                Rect::new(x + left_w, y + top_h, right_w, bottom_h),
                next_depth,
            ),
        ]);

        let mut kept = Vec::new();
        for obj in self.objects.drain(..) {
            let child = children
                .iter_mut()
                .find(|c| c.bounds.contains_rect(&obj));
            match child {
                Some(c) => {
                    c.insert(obj);
                }
                None => kept.push(obj),
            }
        }
        self.objects = kept;
        self.children = Some(children);
    }

    /// Collect every stored rectangle that intersects `range`.
    pub fn retrieve(&self, range: &Rect) -> Vec<Rect> {
        let mut found = Vec::new();
        self.retrieve_into(range, &mut found);
        found
    }

    fn retrieve_into(&self, range: &Rect, found: &mut Vec<Rect>) {
        for obj in &self.objects {
            if obj.intersects(range, 0) {
                found.push(*obj);
            }
        }
        if let Some(children) = &self.children {
            for child in children.iter() {
                // The recursion guard must never under-reach the
                // per-object filter above. The floored-centre test can
                // miss a child whose odd-width bounds merely touch the
                // range while a rect stored inside still intersects it,
                // so the guard uses the exact closed-interval test.
                if child.bounds.touches(range) {
                    child.retrieve_into(range, found);
                }
            }
        }
    }

    /// Discard all stored rectangles and children
    pub fn clear(&mut self) {
        self.objects.clear();
        self.children = None;
        self.depth = 0;
    }

    /// Total rectangles stored in this subtree
    pub fn len(&self) -> usize {
        let mut count = self.objects.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                count += child.len();
            }
        }
        count
    }

    /// True when the subtree stores nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
