use std::fmt;
use std::str::FromStr;

use pathviz_core::{Endpoints, Point};
use pathviz_paths::{Algorithm, Relaxation};

/// Delay between consecutive visited-cell reveals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    Fast,
    #[default]
    Average,
    Slow,
    /// Any other step, in time units.
    Custom(u64),
}

impl Speed {
    /// Time units per visited-cell step.
    pub fn step(self) -> u64 {
        match self {
            Speed::Fast => 5,
            Speed::Average => 10,
            Speed::Slow => 25,
            Speed::Custom(step) => step,
        }
    }

    /// The preset with this step, or `Custom`.
    pub fn from_step(step: u64) -> Self {
        match step {
            5 => Speed::Fast,
            10 => Speed::Average,
            25 => Speed::Slow,
            _ => Speed::Custom(step),
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Fast => f.write_str("fast"),
            Speed::Average => f.write_str("average"),
            Speed::Slow => f.write_str("slow"),
            Speed::Custom(step) => write!(f, "{step}"),
        }
    }
}

/// Error returned when parsing a speed that is neither a preset name nor a
/// number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSpeedError(pub String);

impl fmt::Display for ParseSpeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid speed {:?} (expected fast, average, slow or a step count)",
            self.0
        )
    }
}

impl std::error::Error for ParseSpeedError {}

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Speed::Fast),
            "average" => Ok(Speed::Average),
            "slow" => Ok(Speed::Slow),
            other => other
                .parse::<u64>()
                .map(Speed::from_step)
                .map_err(|_| ParseSpeedError(s.to_string())),
        }
    }
}

/// Settings for a [`Visualizer`](crate::Visualizer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualizerConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Point,
    pub finish: Point,
    pub speed: Speed,
    pub algorithm: Algorithm,
    /// Relaxation used when `algorithm` is Dijkstra.
    pub relaxation: Relaxation,
    /// Maze seed. `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Time units between consecutive path-cell reveals.
    pub path_step: u64,
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            rows: 25,
            cols: 50,
            start: Point::new(10, 15),
            finish: Point::new(10, 35),
            speed: Speed::default(),
            algorithm: Algorithm::default(),
            relaxation: Relaxation::default(),
            seed: None,
            path_step: 50,
        }
    }
}

impl VisualizerConfig {
    /// Start and finish, no bomb.
    pub fn endpoints(&self) -> Endpoints {
        Endpoints::new(self.start, self.finish)
    }

    /// Centre cell where a new bomb is placed.
    pub fn bomb_position(&self) -> Point {
        Point::new(self.rows / 2, self.cols / 2)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = VisualizerConfig {
            speed: Speed::Custom(3),
            algorithm: Algorithm::AStar,
            seed: Some(42),
            ..VisualizerConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: VisualizerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
