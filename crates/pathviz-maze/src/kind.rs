use std::fmt;
use std::str::FromStr;

/// The maze patterns [`MazeGen`](crate::MazeGen) can stamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MazeKind {
    #[default]
    Random,
    RecursiveDivision,
    Vertical,
    Horizontal,
}

impl MazeKind {
    pub const ALL: [MazeKind; 4] = [
        MazeKind::Random,
        MazeKind::RecursiveDivision,
        MazeKind::Vertical,
        MazeKind::Horizontal,
    ];

    /// Selector name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            MazeKind::Random => "random",
            MazeKind::RecursiveDivision => "recursiveDivision",
            MazeKind::Vertical => "vertical",
            MazeKind::Horizontal => "horizontal",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            MazeKind::Random => "Random Maze",
            MazeKind::RecursiveDivision => "Recursive Division",
            MazeKind::Vertical => "Vertical Maze",
            MazeKind::Horizontal => "Horizontal Maze",
        }
    }
}

impl fmt::Display for MazeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown maze name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMazeKindError(pub String);

impl fmt::Display for ParseMazeKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown maze {:?} (expected random, recursiveDivision, vertical or horizontal)",
            self.0
        )
    }
}

impl std::error::Error for ParseMazeKindError {}

impl FromStr for MazeKind {
    type Err = ParseMazeKindError;

    /// Case-insensitive; `recursive-division` and `recursive_division` are
    /// accepted too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect();
        MazeKind::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| ParseMazeKindError(s.to_string()))
    }
}
