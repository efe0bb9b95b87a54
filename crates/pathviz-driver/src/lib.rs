//! Orchestration for the pathfinding visualizer.
//!
//! [`Visualizer`] ties the grid model, the traversal algorithms and the maze
//! generators together behind the operations a front end exposes (edit,
//! generate, clear, run) and turns each run into a [`RevealSchedule`] of
//! timed [`RevealEvent`]s for the renderer to replay.

mod config;
mod error;
mod schedule;
mod visualizer;

pub use config::{ParseSpeedError, Speed, VisualizerConfig};
pub use error::VisualizerError;
pub use schedule::{RevealEvent, RevealKind, RevealSchedule};
pub use visualizer::{CellView, State, Visualizer};
