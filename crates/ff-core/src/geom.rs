//! Geometry value types used across the floor builder.

use serde::{Deserialize, Serialize};

use crate::hash::GridKey;
use crate::rng::GameRng;

/// Integer coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by (dx, dy)
    pub const fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another point
    pub const fn manhattan(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl GridKey for Point {
    /// Packs both coordinates into one u32.
    ///
    /// Collision-free only while both coordinates fit in 16 bits;
    /// grids anywhere near that large are out of scope.
    fn key(&self) -> u32 {
        ((self.x as u32) << 16) | (self.y as u32 & 0xFFFF)
    }
}

/// Axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Horizontal extent, >= 0
    pub width: i32,
    /// Vertical extent, >= 0
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Centre point of the rectangle
    pub const fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Area of the rectangle
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// Check whether another rectangle comes within `spacing` of this one.
    ///
    /// Two rectangles intersect with spacing `s` when the distance between
    /// their centres on each axis is less than half the summed extents
    /// plus `s`. Kept in doubled integer form so the half-extent
    /// comparison stays exact for odd sums.
    pub fn intersects(&self, other: &Rect, spacing: i32) -> bool {
        let c = self.center();
        let oc = other.center();
        2 * (c.x - oc.x).abs() < self.width + other.width + 2 * spacing
            && 2 * (c.y - oc.y).abs() < self.height + other.height + 2 * spacing
    }

    /// Closed-interval overlap: true when the rectangles overlap or
    /// share an edge on both axes.
    ///
    /// Compares doubled centres computed as `2x + extent`, which stays
    /// exact for odd extents where [`Rect::center`] floors away half a
    /// tile. Anything [`Rect::intersects`] (spacing 0) accepts, this
    /// accepts too, so it is safe as a coarse reachability filter.
    pub fn touches(&self, other: &Rect) -> bool {
        (2 * self.x + self.width - 2 * other.x - other.width).abs() <= self.width + other.width
            && (2 * self.y + self.height - 2 * other.y - other.height).abs()
                <= self.height + other.height
    }

    /// Check if this rectangle fully contains another
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    /// Check if a point falls inside the rectangle (far edges exclusive)
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }

    /// This rectangle grown by `amount` on every side
    pub const fn expanded(&self, amount: i32) -> Rect {
        Rect::new(
            self.x - amount,
            self.y - amount,
            self.width + 2 * amount,
            self.height + 2 * amount,
        )
    }

    /// Pick a uniformly random point inside the rectangle
    ///
    /// Returns the anchor unchanged for degenerate extents.
    pub fn random_point(&self, rng: &mut GameRng) -> Point {
        Point::new(
            self.x + rng.rn2(self.width.max(0) as u32) as i32,
            self.y + rng.rn2(self.height.max(0) as u32) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_translation() {
        let p = Point::new(3, -2);
        assert_eq!(p.translated(1, 0), Point::new(4, -2));
        assert_eq!(p.translated(0, 5), Point::new(3, 3));
    }

    #[test]
    fn test_point_manhattan() {
        let a = Point::new(2, 3);
        let b = Point::new(5, 1);
        assert_eq!(a.manhattan(&b), 5);
        assert_eq!(b.manhattan(&a), 5);
        assert_eq!(a.manhattan(&a), 0);
    }

    #[test]
    fn test_point_key_packing() {
        assert_eq!(Point::new(1, 2).key(), (1 << 16) | 2);
        assert_eq!(Point::new(0, 0).key(), 0);
        // Distinct small coordinates never alias
        assert_ne!(Point::new(2, 1).key(), Point::new(1, 2).key());
    }

    #[test]
    fn test_rect_center() {
        assert_eq!(Rect::new(0, 0, 10, 10).center(), Point::new(5, 5));
        assert_eq!(Rect::new(2, 3, 5, 7).center(), Point::new(4, 6));
    }

    #[test]
    fn test_rect_intersects_no_spacing() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(20, 20, 5, 5);

        assert!(a.intersects(&b, 0));
        assert!(b.intersects(&a, 0));
        assert!(!a.intersects(&c, 0));
    }

    #[test]
    fn test_rect_intersects_spacing_expands_reach() {
        let a = Rect::new(0, 0, 5, 5);
        let b = Rect::new(6, 0, 5, 5);

        assert!(!a.intersects(&b, 0));
        assert!(a.intersects(&b, 2));
    }

    #[test]
    fn test_rect_edge_to_edge_is_not_intersecting() {
        // Touching borders, zero gap: half-extent sum equals the
        // centre distance exactly, so spacing 0 does not trigger.
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 4, 4);
        assert!(!a.intersects(&b, 0));
        assert!(a.intersects(&b, 1));
    }

    #[test]
    fn test_touches_includes_shared_edges() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 4, 4);
        let c = Rect::new(5, 0, 4, 4);

        assert!(a.touches(&b));
        assert!(!a.intersects(&b, 0));
        assert!(!a.touches(&c));
    }

    #[test]
    fn test_touches_is_exact_on_odd_extents() {
        // A 31-wide quadrant and a 3-wide strip hugging its right
        // edge: the floored-centre test rejects the pair, but a rect
        // inside the quadrant can still pass it against the strip.
        let quadrant = Rect::new(0, 0, 31, 31);
        let strip = Rect::new(31, 0, 3, 31);
        let inner = Rect::new(29, 5, 2, 2);

        assert!(quadrant.contains_rect(&inner));
        assert!(inner.intersects(&strip, 0));
        assert!(!quadrant.intersects(&strip, 0));
        assert!(quadrant.touches(&strip));
    }

    #[test]
    fn test_rect_contains_rect() {
        let outer = Rect::new(0, 0, 20, 20);
        let inner = Rect::new(5, 5, 5, 5);
        let straddling = Rect::new(18, 18, 5, 5);

        assert!(outer.contains_rect(&inner));
        assert!(outer.contains_rect(&outer));
        assert!(!outer.contains_rect(&straddling));
        assert!(!inner.contains_rect(&outer));
    }

    #[test]
    fn test_rect_contains_point() {
        let r = Rect::new(2, 2, 4, 4);
        assert!(r.contains_point(&Point::new(2, 2)));
        assert!(r.contains_point(&Point::new(5, 5)));
        assert!(!r.contains_point(&Point::new(6, 5)));
        assert!(!r.contains_point(&Point::new(1, 3)));
    }

    #[test]
    fn test_expanded_grows_symmetrically() {
        let r = Rect::new(5, 5, 4, 6);
        let e = r.expanded(2);
        assert_eq!(e, Rect::new(3, 3, 8, 10));
        assert_eq!(e.center(), r.center());
    }

    #[test]
    fn test_random_point_stays_inside() {
        let r = Rect::new(10, 20, 6, 3);
        let mut rng = GameRng::new(42);
        for _ in 0..200 {
            let p = r.random_point(&mut rng);
            assert!(r.contains_point(&p), "{:?} escaped {:?}", p, r);
        }
    }
}
