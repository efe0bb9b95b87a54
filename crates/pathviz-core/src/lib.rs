//! **pathviz-core**: grid model for the pathfinding visualizer.
//!
//! This crate provides the foundational types used across the *pathviz*
//! workspace: geometry primitives, the per-position [`Cell`] layout state,
//! the protected [`Endpoints`] and the [`Grid`] that owns them.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{BASE_WEIGHT, Cell, HEAVY_WEIGHT, Role};
pub use geom::{Point, Range};
pub use grid::{Endpoints, Grid, ParseGridError};
