//! Floor generation tuning constants.
//!
//! These are fixed at compile time; only the per-candidate retry count
//! is chosen by the caller of [`crate::Generator::generate`].

/// Smallest room side length, walls included
pub const ROOM_MIN_SIZE: i32 = 5;

/// Largest room side length, walls included
pub const ROOM_MAX_SIZE: i32 = 13;

/// Rooms attempted per floor
pub const TARGET_ROOM_COUNT: usize = 8;

/// Minimum distance between a room border and the grid edge
pub const EDGE_MARGIN: i32 = 2;

/// Minimum gap enforced between two rooms' borders
pub const ROOM_SPACING: i32 = 3;

/// Corridors dug out of each room, lower bound
pub const MIN_CORRIDORS: u32 = 1;

/// Corridors dug out of each room, upper bound
pub const MAX_CORRIDORS: u32 = 2;

/// Carved width of a corridor, in tiles
pub const CORRIDOR_WIDTH: i32 = 2;

/// Default step bound for [`crate::Grid::find_path`]
///
/// Tuned for repeated short per-turn queries; callers wanting
/// floor-spanning paths must pass a larger bound explicitly.
pub const DEFAULT_PATH_STEPS: i32 = 10;
