//! Tile storage and the A* pathfinding service.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::consts::DEFAULT_PATH_STEPS;
use crate::geom::{Point, Rect};
use crate::hash::{KeyMap, KeySet};
use crate::heap::Heap;

/// Walkability state of one grid cell
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Empty = 0,
    Wall = 1,
}

impl Tile {
    /// Display character for map dumps
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Empty => '.',
            Tile::Wall => '#',
        }
    }
}

/// One floor's tile storage plus its published room list.
///
/// Tiles live in a flat row-major array indexed as `x + y*width`.
/// The accessors named `*_at` do not bounds-check; callers validate
/// coordinates through [`Grid::is_valid`] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    /// Rooms carved by the most recent generation pass
    pub rooms: Vec<Rect>,
}

impl Grid {
    /// Create a grid of the given dimensions, all tiles `Empty`
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; (width * height) as usize],
            rooms: Vec::new(),
        }
    }

    /// Grid width in tiles
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in tiles
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Full grid footprint as a rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Tile at a position the caller has already validated
    pub fn tile_at(&self, x: i32, y: i32) -> Tile {
        self.tiles[self.idx(x, y)]
    }

    /// Overwrite a tile at a position the caller has already validated
    pub fn set_tile_at(&mut self, x: i32, y: i32, tile: Tile) {
        let idx = self.idx(x, y);
        self.tiles[idx] = tile;
    }

    /// Check if a coordinate is inside the grid
    pub const fn is_valid(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// In bounds and `Empty`
    pub fn is_empty(&self, x: i32, y: i32) -> bool {
        self.is_valid(x, y) && self.tile_at(x, y) == Tile::Empty
    }

    /// In bounds and not a `Wall`
    pub fn can_walk(&self, x: i32, y: i32) -> bool {
        self.is_valid(x, y) && self.tile_at(x, y) != Tile::Wall
    }

    /// In bounds and anything but `Empty`
    pub fn is_not_empty(&self, x: i32, y: i32) -> bool {
        self.is_valid(x, y) && self.tile_at(x, y) != Tile::Empty
    }

    /// Reset every cell to `tile`
    pub fn clear(&mut self, tile: Tile) {
        self.tiles.fill(tile);
    }

    /// Write a horizontal run of tiles, both ends inclusive
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, tile: Tile) {
        for x in x1.min(x2)..=x1.max(x2) {
            self.set_tile_at(x, y, tile);
        }
    }

    /// Write a vertical run of tiles, both ends inclusive
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, tile: Tile) {
        for y in y1.min(y2)..=y1.max(y2) {
            self.set_tile_at(x, y, tile);
        }
    }

    /// Fill a rectangle's cells, far edges exclusive
    pub fn fill(&mut self, rect: &Rect, tile: Tile) {
        for y in rect.y..rect.y + rect.height {
            for x in rect.x..rect.x + rect.width {
                self.set_tile_at(x, y, tile);
            }
        }
    }

    /// Draw a rectangle's four border lines, far edges inclusive:
    /// writes at `x..=x+width` and `y..=y+height`.
    pub fn outline(&mut self, rect: &Rect, tile: Tile) {
        self.hline(rect.x, rect.x + rect.width, rect.y, tile);
        self.hline(rect.x, rect.x + rect.width, rect.y + rect.height, tile);
        self.vline(rect.x, rect.y, rect.y + rect.height, tile);
        self.vline(rect.x + rect.width, rect.y, rect.y + rect.height, tile);
    }

    /// ASCII dump of the tile array, one row per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.tile_at(x, y).symbol());
            }
            out.push('\n');
        }
        out
    }

    /// [`Grid::find_path`] with the default step bound
    pub fn find_path_default(&self, start: Point, goal: Point) -> Vec<Point> {
        self.find_path(start, goal, DEFAULT_PATH_STEPS)
    }

    /// Shortest-ish path from `start` to `goal`, both inclusive.
    ///
    /// A* over the four orthogonal neighbors with a Manhattan heuristic
    /// and unit step cost. Returns an empty path when either endpoint
    /// is out of bounds, when `start == goal`, or when the search
    /// exhausts its frontier within `max_steps`.
    ///
    /// The search ends the moment a generated neighbor equals the
    /// goal, without draining cheaper frontier nodes first. That keeps
    /// repeated per-turn queries fast at the price of occasionally
    /// returning a slightly longer route; callers rely on the speed,
    /// so the shortcut stays.
    pub fn find_path(&self, start: Point, goal: Point, max_steps: i32) -> Vec<Point> {
        if !self.is_valid(start.x, start.y) || !self.is_valid(goal.x, goal.y) || start == goal {
            return Vec::new();
        }

        let mut open = Heap::new(|node: &PathNode| node.f);
        let mut open_coords: KeySet<Point> = KeySet::new();
        let mut closed: KeySet<Point> = KeySet::new();
        let mut parents: KeyMap<Point, Point> = KeyMap::new();

        open.push(PathNode {
            pos: start,
            g: 0,
            f: start.manhattan(&goal),
        });
        open_coords.insert(&start);

        while let Some(node) = open.pop() {
            open_coords.remove(&node.pos);
            closed.insert(&node.pos);

            for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
                let next = node.pos.translated(dx, dy);

                if next == goal {
                    parents.insert(&next, node.pos);
                    return Self::rebuild_path(&parents, next);
                }
                if !self.can_walk(next.x, next.y) {
                    continue;
                }
                let g = node.g + 1;
                if g >= max_steps {
                    continue;
                }
                if closed.contains(&next) || open_coords.contains(&next) {
                    continue;
                }

                parents.insert(&next, node.pos);
                open.push(PathNode {
                    pos: next,
                    g,
                    f: g + next.manhattan(&goal),
                });
                open_coords.insert(&next);
            }
        }

        Vec::new()
    }

    /// Walk the parent chain back from `last`; the start node has no
    /// parent entry, so the walk terminates there.
    fn rebuild_path(parents: &KeyMap<Point, Point>, last: Point) -> Vec<Point> {
        let mut path = vec![last];
        let mut current = last;
        while let Some(prev) = parents.get(&current) {
            current = *prev;
            path.push(current);
        }
        path.reverse();
        path
    }
}

/// One frontier entry in the A* search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PathNode {
    pos: Point,
    g: i32,
    f: i32,
}
