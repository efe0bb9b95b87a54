use std::fmt;

use pathviz_core::Point;

/// Why the visualizer refused a request. A refused request changes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerError {
    /// A run is being revealed; editing is locked until it completes.
    Running,
    /// The position lies outside the grid.
    OutOfBounds(Point),
    /// Another endpoint already sits at the position.
    Occupied(Point),
}

impl fmt::Display for VisualizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VisualizerError::Running => write!(f, "a visualization is running"),
            VisualizerError::OutOfBounds(p) => write!(f, "{p} is outside the grid"),
            VisualizerError::Occupied(p) => write!(f, "{p} is already an endpoint"),
        }
    }
}

impl std::error::Error for VisualizerError {}
