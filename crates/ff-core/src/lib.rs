//! ff-core: procedural dungeon-floor generation and grid pathfinding.
//!
//! This crate contains the floor-building and pathfinding logic with no
//! I/O dependencies. It is designed to be pure and testable: rendering,
//! input and persistence layers consume tile queries, room lists and
//! path requests from here and never get called back.
//!
//! All operations are synchronous and single-threaded. A [`Grid`] must
//! not be mutated while a `find_path` or `generate` call against it is
//! in progress; the only work bounds are the pathfinder's step limit
//! and the generator's placement retry budget.

pub mod generator;
pub mod geom;
pub mod grid;
pub mod hash;
pub mod heap;
pub mod quadtree;

mod consts;
mod rng;

pub use consts::*;
pub use generator::{GenConfig, Generator};
pub use geom::{Point, Rect};
pub use grid::{Grid, Tile};
pub use hash::{GridKey, KeyMap, KeySet};
pub use heap::Heap;
pub use quadtree::QuadTree;
pub use rng::GameRng;
