//! Maze generators for the pathfinding visualizer.
//!
//! [`MazeGen`] stamps one of four [`MazeKind`] patterns onto a copy of a
//! [`Grid`](pathviz_core::Grid), leaving start, finish and bomb open.

mod kind;
mod mapgen;

pub use kind::{MazeKind, ParseMazeKindError};
pub use mapgen::{MazeGen, WALL_CHANCE};
