//! Algorithm selection and run summaries.

use std::fmt;
use std::str::FromStr;

use pathviz_core::{Endpoints, Grid, Point};

use crate::context::TraversalContext;
use crate::dijkstra::Relaxation;
use crate::path::path_cost;
use crate::traits::AstarPather;

/// The traversal strategies a [`Search`] can run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
    Bfs,
    Dfs,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Selector name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "Dijkstra's Algorithm",
            Algorithm::AStar => "A* Search",
            Algorithm::Bfs => "Breadth-first Search",
            Algorithm::Dfs => "Depth-first Search",
        }
    }

    /// Whether cell weights affect the route.
    pub fn is_weighted(self) -> bool {
        matches!(self, Algorithm::Dijkstra | Algorithm::AStar)
    }

    pub fn guarantees_shortest_path(self) -> bool {
        !matches!(self, Algorithm::Dfs)
    }

    /// Run this algorithm over `pather` in `ctx` and return the visiting
    /// order. `relaxation` only matters for Dijkstra.
    pub fn run<P: AstarPather>(
        self,
        ctx: &mut TraversalContext,
        pather: &P,
        endpoints: Endpoints,
        relaxation: Relaxation,
    ) -> Vec<Point> {
        match self {
            Algorithm::Dijkstra => ctx.dijkstra(pather, endpoints, relaxation),
            Algorithm::AStar => ctx.astar(pather, endpoints),
            Algorithm::Bfs => ctx.bfs(pather, endpoints),
            Algorithm::Dfs => ctx.dfs(pather, endpoints),
        }
    }

    /// Run this algorithm on `grid` with a fresh context and reconstruct the
    /// path to its finish.
    pub fn search(self, grid: &Grid, relaxation: Relaxation) -> Search {
        let endpoints = grid.endpoints();
        let mut context = TraversalContext::for_grid(grid);
        let visited = self.run(&mut context, grid, endpoints, relaxation);
        let path = context.reconstruct_path(endpoints.finish);
        log::debug!(
            "{}: visited {} cells, path of {} cells",
            self.name(),
            visited.len(),
            path.len()
        );
        Search {
            algorithm: self,
            endpoints,
            visited,
            path,
            context,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown algorithm name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAlgorithmError(pub String);

impl fmt::Display for ParseAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown algorithm {:?} (expected dijkstra, astar, bfs or dfs)",
            self.0
        )
    }
}

impl std::error::Error for ParseAlgorithmError {}

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseAlgorithmError(s.to_string()))
    }
}

/// Outcome of one traversal run.
#[derive(Debug, Clone)]
pub struct Search {
    pub algorithm: Algorithm,
    pub endpoints: Endpoints,
    /// Cells in the order the algorithm visited them.
    pub visited: Vec<Point>,
    /// Route to the finish, start excluded. Empty when unreached.
    pub path: Vec<Point>,
    /// Scratch state left by the run.
    pub context: TraversalContext,
}

impl Search {
    /// Whether the finish was reached.
    pub fn reached(&self) -> bool {
        !self.path.is_empty()
    }

    /// Weighted cost of the path over `grid`, `None` when unreached.
    pub fn cost(&self, grid: &Grid) -> Option<i32> {
        self.reached()
            .then(|| path_cost(grid, self.endpoints.start, &self.path))
    }
}
