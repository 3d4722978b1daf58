//! Floor layout generation: room placement and corridor carving.

use serde::{Deserialize, Serialize};

use crate::consts::{
    CORRIDOR_WIDTH, EDGE_MARGIN, MAX_CORRIDORS, MIN_CORRIDORS, ROOM_MAX_SIZE, ROOM_MIN_SIZE,
    ROOM_SPACING, TARGET_ROOM_COUNT,
};
use crate::geom::{Point, Rect};
use crate::grid::{Grid, Tile};
use crate::quadtree::QuadTree;
use crate::rng::GameRng;

/// Tuning knobs for one generator, defaulted from [`crate::consts`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Smallest room side, walls included
    pub room_min_size: i32,
    /// Largest room side, walls included
    pub room_max_size: i32,
    /// Rooms attempted per floor; fewer may be placed
    pub target_rooms: usize,
    /// Minimum distance between a room border and the grid edge
    pub edge_margin: i32,
    /// Minimum gap enforced between two rooms
    pub room_spacing: i32,
    /// Corridors dug out of each room, lower bound
    pub min_corridors: u32,
    /// Corridors dug out of each room, upper bound
    pub max_corridors: u32,
    /// Carved corridor width in tiles
    pub corridor_width: i32,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            room_min_size: ROOM_MIN_SIZE,
            room_max_size: ROOM_MAX_SIZE,
            target_rooms: TARGET_ROOM_COUNT,
            edge_margin: EDGE_MARGIN,
            room_spacing: ROOM_SPACING,
            min_corridors: MIN_CORRIDORS,
            max_corridors: MAX_CORRIDORS,
            corridor_width: CORRIDOR_WIDTH,
        }
    }
}

/// Builds a dungeon floor in place on a [`Grid`].
///
/// A generation pass owns a fresh [`QuadTree`] for overlap rejection;
/// the tree is discarded when the pass ends. Rooms that cannot be
/// placed within the retry budget are dropped silently, so the floor
/// may hold fewer rooms than targeted.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    pub config: GenConfig,
}

impl Generator {
    /// Create a generator with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a generator with an explicit configuration
    pub fn with_config(config: GenConfig) -> Self {
        Self { config }
    }

    /// Regenerate the grid's contents: clear to `Wall`, place rooms,
    /// carve corridors, publish the room list.
    ///
    /// `num_attempts` is the per-room retry budget for random
    /// placement; it resets after every successful placement.
    pub fn generate(&self, grid: &mut Grid, rng: &mut GameRng, num_attempts: u32) {
        grid.clear(Tile::Wall);
        grid.rooms.clear();

        let mut index = QuadTree::new(grid.bounds());
        let rooms = self.place_rooms(grid, &mut index, rng, num_attempts);
        self.carve_corridors(grid, &rooms, rng);

        grid.rooms = rooms;
    }

    fn place_rooms(
        &self,
        grid: &mut Grid,
        index: &mut QuadTree,
        rng: &mut GameRng,
        num_attempts: u32,
    ) -> Vec<Rect> {
        let cfg = &self.config;
        let mut rooms = Vec::with_capacity(cfg.target_rooms);

        for _ in 0..cfg.target_rooms {
            let Some(room) = self.try_place(grid, index, rng, num_attempts) else {
                // Retry budget spent on this room; accept the shortfall
                continue;
            };

            grid.fill(&room, Tile::Empty);
            grid.outline(&room, Tile::Wall);
            index.insert(room);
            rooms.push(room);
        }

        rooms
    }

    /// Roll random candidates until one clears the spatial index or
    /// the attempt budget runs out.
    fn try_place(
        &self,
        grid: &Grid,
        index: &QuadTree,
        rng: &mut GameRng,
        num_attempts: u32,
    ) -> Option<Rect> {
        let cfg = &self.config;
        let size_span = (cfg.room_max_size - cfg.room_min_size + 1) as u32;

        for _ in 0..num_attempts {
            let width = rng.rn1(size_span, cfg.room_min_size);
            let height = rng.rn1(size_span, cfg.room_min_size);

            // Room borders (outline far edge included) stay at least
            // edge_margin tiles away from the grid edge.
            let x_span = grid.width() - width - 2 * cfg.edge_margin;
            let y_span = grid.height() - height - 2 * cfg.edge_margin;
            if x_span <= 0 || y_span <= 0 {
                continue;
            }
            let x = rng.rn1(x_span as u32, cfg.edge_margin);
            let y = rng.rn1(y_span as u32, cfg.edge_margin);

            let candidate = Rect::new(x, y, width, height);
            let probe = candidate.expanded(cfg.room_spacing);
            let too_close = index
                .retrieve(&probe)
                .iter()
                .any(|placed| placed.intersects(&candidate, cfg.room_spacing));
            if !too_close {
                return Some(candidate);
            }
        }

        None
    }

    /// Connect each room to a random number of subsequent rooms,
    /// wrapping around the list.
    fn carve_corridors(&self, grid: &mut Grid, rooms: &[Rect], rng: &mut GameRng) {
        let cfg = &self.config;
        if rooms.len() < 2 {
            return;
        }

        let span = cfg.max_corridors.saturating_sub(cfg.min_corridors) + 1;
        for (i, room) in rooms.iter().enumerate() {
            let count = rng.rn1(span, cfg.min_corridors as i32);
            for step in 1..=count {
                let target = &rooms[(i + step as usize) % rooms.len()];
                self.carve_l_corridor(grid, rng, room.center(), target.center());
            }
        }
    }

    /// Carve an L-shaped corridor between two centres, leg order
    /// chosen at a coin flip. The digging is unguarded: it may cut
    /// through other rooms' walls.
    fn carve_l_corridor(&self, grid: &mut Grid, rng: &mut GameRng, from: Point, to: Point) {
        if rng.one_in(2) {
            self.carve_h(grid, from.x, to.x, from.y);
            self.carve_v(grid, to.x, from.y, to.y);
        } else {
            self.carve_v(grid, from.x, from.y, to.y);
            self.carve_h(grid, from.x, to.x, to.y);
        }
    }

    fn carve_h(&self, grid: &mut Grid, x1: i32, x2: i32, y: i32) {
        for offset in 0..self.config.corridor_width {
            grid.hline(x1, x2, y + offset, Tile::Empty);
        }
    }

    fn carve_v(&self, grid: &mut Grid, x: i32, y1: i32, y2: i32) {
        for offset in 0..self.config.corridor_width {
            grid.vline(x + offset, y1, y2, Tile::Empty);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_room_config() -> GenConfig {
        GenConfig {
            target_rooms: 4,
            ..GenConfig::default()
        }
    }

    #[test]
    fn test_generate_places_some_rooms() {
        let generator = Generator::with_config(four_room_config());
        let mut grid = Grid::new(64, 64);
        let mut rng = GameRng::new(42);

        generator.generate(&mut grid, &mut rng, 20);

        assert!(
            (1..=4).contains(&grid.rooms.len()),
            "expected 1..=4 rooms, got {}",
            grid.rooms.len()
        );
    }

    #[test]
    fn test_rooms_respect_edge_margin() {
        let generator = Generator::with_config(four_room_config());
        let mut grid = Grid::new(64, 64);
        let mut rng = GameRng::new(7);

        generator.generate(&mut grid, &mut rng, 20);

        let margin = generator.config.edge_margin;
        for room in &grid.rooms {
            assert!(room.x >= margin, "{:?} hugs the left edge", room);
            assert!(room.y >= margin, "{:?} hugs the top edge", room);
            // Border lines sit at x+width / y+height and must keep
            // margin tiles between themselves and the last column/row
            assert!(room.x + room.width <= grid.width() - 1 - margin);
            assert!(room.y + room.height <= grid.height() - 1 - margin);
        }
    }

    #[test]
    fn test_single_origin_placements_at_span_boundary() {
        // On a 16-wide grid with margin 2, a 11-wide room leaves
        // exactly one origin (x = 2, border at column 13, two tiles
        // from the edge). One tile wider and no origin keeps the
        // margin, so the candidate must be dropped.
        let mut grid = Grid::new(16, 16);
        let mut rng = GameRng::new(42);

        let snug = Generator::with_config(GenConfig {
            room_min_size: 11,
            room_max_size: 11,
            target_rooms: 1,
            min_corridors: 0,
            max_corridors: 0,
            ..GenConfig::default()
        });
        snug.generate(&mut grid, &mut rng, 5);
        assert_eq!(grid.rooms, vec![Rect::new(2, 2, 11, 11)]);

        let too_wide = Generator::with_config(GenConfig {
            room_min_size: 12,
            room_max_size: 12,
            target_rooms: 1,
            ..GenConfig::default()
        });
        too_wide.generate(&mut grid, &mut rng, 5);
        assert!(grid.rooms.is_empty());
    }

    #[test]
    fn test_rooms_keep_their_spacing() {
        let generator = Generator::with_config(GenConfig {
            target_rooms: 12,
            ..GenConfig::default()
        });
        let mut grid = Grid::new(96, 96);

        for seed in 0..10 {
            let mut rng = GameRng::new(seed);
            generator.generate(&mut grid, &mut rng, 20);

            for (i, a) in grid.rooms.iter().enumerate() {
                for b in grid.rooms.iter().skip(i + 1) {
                    assert!(
                        !a.intersects(b, generator.config.room_spacing),
                        "seed {}: {:?} and {:?} violate spacing",
                        seed,
                        a,
                        b
                    );
                }
            }
        }
    }

    #[test]
    fn test_room_interiors_empty_borders_walled() {
        // No corridors, so borders must survive intact
        let generator = Generator::with_config(GenConfig {
            target_rooms: 4,
            min_corridors: 0,
            max_corridors: 0,
            ..GenConfig::default()
        });
        let mut grid = Grid::new(64, 64);
        let mut rng = GameRng::new(3);

        generator.generate(&mut grid, &mut rng, 20);
        assert!(!grid.rooms.is_empty());

        for room in grid.rooms.clone() {
            for y in room.y + 1..room.y + room.height {
                for x in room.x + 1..room.x + room.width {
                    assert_eq!(grid.tile_at(x, y), Tile::Empty, "interior ({}, {})", x, y);
                }
            }
            for x in room.x..=room.x + room.width {
                assert_eq!(grid.tile_at(x, room.y), Tile::Wall);
                assert_eq!(grid.tile_at(x, room.y + room.height), Tile::Wall);
            }
            for y in room.y..=room.y + room.height {
                assert_eq!(grid.tile_at(room.x, y), Tile::Wall);
                assert_eq!(grid.tile_at(room.x + room.width, y), Tile::Wall);
            }
        }
    }

    #[test]
    fn test_room_interiors_survive_corridors() {
        // Corridors only carve Empty, so interiors stay Empty even
        // when a corridor crosses a room.
        let generator = Generator::new();
        let mut grid = Grid::new(64, 64);
        let mut rng = GameRng::new(11);

        generator.generate(&mut grid, &mut rng, 20);

        for room in grid.rooms.clone() {
            for y in room.y + 1..room.y + room.height {
                for x in room.x + 1..room.x + room.width {
                    assert_eq!(grid.tile_at(x, y), Tile::Empty);
                }
            }
        }
    }

    #[test]
    fn test_regeneration_replaces_previous_floor() {
        let generator = Generator::new();
        let mut grid = Grid::new(64, 64);

        let mut rng = GameRng::new(1);
        generator.generate(&mut grid, &mut rng, 20);
        let first_rooms = grid.rooms.clone();
        let first_render = grid.render();

        let mut rng = GameRng::new(2);
        generator.generate(&mut grid, &mut rng, 20);

        assert!(!grid.rooms.is_empty());
        assert!(grid.rooms != first_rooms || grid.render() != first_render);
    }

    #[test]
    fn test_same_seed_same_floor() {
        let generator = Generator::new();
        let mut a = Grid::new(64, 64);
        let mut b = Grid::new(64, 64);

        generator.generate(&mut a, &mut GameRng::new(5), 20);
        generator.generate(&mut b, &mut GameRng::new(5), 20);

        assert_eq!(a.rooms, b.rooms);
        assert_eq!(a.render(), b.render());
    }

    #[test]
    fn test_oversized_rooms_are_dropped_not_fatal() {
        // Rooms that cannot fit inside the margins never place
        let generator = Generator::with_config(GenConfig {
            room_min_size: 30,
            room_max_size: 40,
            target_rooms: 4,
            ..GenConfig::default()
        });
        let mut grid = Grid::new(16, 16);
        let mut rng = GameRng::new(42);

        generator.generate(&mut grid, &mut rng, 10);
        assert!(grid.rooms.is_empty());
    }

    #[test]
    fn test_centres_connected_by_walkable_path() {
        let generator = Generator::with_config(four_room_config());
        let mut grid = Grid::new(64, 64);
        let mut rng = GameRng::new(9);

        generator.generate(&mut grid, &mut rng, 20);
        if grid.rooms.len() < 2 {
            return;
        }

        // Every room is carved toward at least its successor, so the
        // first room's centre reaches the second's.
        let from = grid.rooms[0].center();
        let to = grid.rooms[1].center();
        let path = grid.find_path(from, to, 512);
        assert!(!path.is_empty(), "no path between adjacent room centres");
        assert_eq!(path.first(), Some(&from));
        assert_eq!(path.last(), Some(&to));
    }
}
