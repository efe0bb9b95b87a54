//! Maze generation.
//!
//! Four generators stamp walls onto a copy of a grid:
//! - **Random**: each cell becomes a wall with probability 0.3.
//! - **Vertical** / **Horizontal**: every other column (row) is walled,
//!   with random gaps punched into the bars.
//! - **Recursive division**: a walled border, then the interior is split by
//!   walls with a single passage until the regions are too thin.
//!
//! Start, finish and bomb cells are never walled.

use pathviz_core::{Grid, Point};
use rand::Rng;

use crate::kind::MazeKind;

/// Chance of a wall for [`MazeGen::stamp_random`] and of a gap for the bar
/// mazes.
pub const WALL_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Horizontal,
    Vertical,
}

/// Maze generator driven by a random number generator.
///
/// The `stamp_*` methods write into the grid they are given;
/// [`generate`](Self::generate) works on a copy.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Return a copy of `grid` with a maze of the given kind stamped in.
    ///
    /// Existing walls and weights are kept; clear the grid first for a fresh
    /// maze.
    #[must_use]
    pub fn generate(&mut self, kind: MazeKind, grid: &Grid) -> Grid {
        let mut next = grid.clone();
        match kind {
            MazeKind::Random => self.stamp_random(&mut next),
            MazeKind::RecursiveDivision => self.stamp_recursive_division(&mut next),
            MazeKind::Vertical => self.stamp_vertical(&mut next),
            MazeKind::Horizontal => self.stamp_horizontal(&mut next),
        }
        log::debug!(
            "{kind} maze on {}x{}: {} walls",
            grid.rows(),
            grid.cols(),
            next.wall_count()
        );
        next
    }

    /// Wall each unprotected cell independently with probability
    /// [`WALL_CHANCE`].
    pub fn stamp_random(&mut self, grid: &mut Grid) {
        for p in grid.bounds() {
            if grid.endpoints().is_protected(p) {
                continue;
            }
            if self.rng.random::<f64>() < WALL_CHANCE {
                grid.set_wall(p, true);
            }
        }
    }

    /// Wall every even column but the last one, then reopen interior cells
    /// with probability [`WALL_CHANCE`].
    pub fn stamp_vertical(&mut self, grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        for col in (0..cols).step_by(2) {
            for row in 0..rows {
                let p = Point::new(row, col);
                if grid.endpoints().is_protected(p) {
                    continue;
                }
                let walled = col < cols - 1;
                let gap = self.rng.random::<f64>() < WALL_CHANCE && row > 0 && row < rows - 1;
                if gap {
                    grid.set_wall(p, false);
                } else if walled {
                    grid.set_wall(p, true);
                }
            }
        }
    }

    /// Row-wise counterpart of [`stamp_vertical`](Self::stamp_vertical).
    pub fn stamp_horizontal(&mut self, grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        for row in (0..rows).step_by(2) {
            for col in 0..cols {
                let p = Point::new(row, col);
                if grid.endpoints().is_protected(p) {
                    continue;
                }
                let walled = row < rows - 1;
                let gap = self.rng.random::<f64>() < WALL_CHANCE && col > 0 && col < cols - 1;
                if gap {
                    grid.set_wall(p, false);
                } else if walled {
                    grid.set_wall(p, true);
                }
            }
        }
    }

    /// Wall the border, then divide the interior recursively.
    ///
    /// Grids with fewer than three interior rows or columns only get the
    /// border. Protected cells left open inside a dividing wall can connect
    /// regions the division meant to separate.
    pub fn stamp_recursive_division(&mut self, grid: &mut Grid) {
        let bounds = grid.bounds();
        for p in bounds.iter().filter(|&p| bounds.on_border(p)) {
            grid.set_wall(p, true);
        }
        let (rows, cols) = (grid.rows(), grid.cols());
        let orientation = self.orientation(rows - 2, cols - 2);
        self.divide(grid, (1, rows - 2), (1, cols - 2), orientation);
    }

    /// Split the inclusive region `rows x cols` with one wall and recurse
    /// into both halves.
    fn divide(
        &mut self,
        grid: &mut Grid,
        (row_start, row_end): (i32, i32),
        (col_start, col_end): (i32, i32),
        orientation: Orientation,
    ) {
        if row_end - row_start < 2 || col_end - col_start < 2 {
            return;
        }
        match orientation {
            Orientation::Horizontal => {
                let wall = self.rng.random_range(row_start..row_end);
                let passage = self.rng.random_range(col_start..col_end);
                for col in (col_start..=col_end).filter(|&c| c != passage) {
                    grid.set_wall(Point::new(wall, col), true);
                }
                let width = col_end - col_start;
                let above = self.orientation(wall - 1 - row_start, width);
                self.divide(grid, (row_start, wall - 1), (col_start, col_end), above);
                let below = self.orientation(row_end - (wall + 1), width);
                self.divide(grid, (wall + 1, row_end), (col_start, col_end), below);
            }
            Orientation::Vertical => {
                let wall = self.rng.random_range(col_start..col_end);
                let passage = self.rng.random_range(row_start..row_end);
                for row in (row_start..=row_end).filter(|&r| r != passage) {
                    grid.set_wall(Point::new(row, wall), true);
                }
                let height = row_end - row_start;
                let left = self.orientation(height, wall - 1 - col_start);
                self.divide(grid, (row_start, row_end), (col_start, wall - 1), left);
                let right = self.orientation(height, col_end - (wall + 1));
                self.divide(grid, (row_start, row_end), (wall + 1, col_end), right);
            }
        }
    }

    fn orientation(&mut self, height: i32, width: i32) -> Orientation {
        if height > width {
            Orientation::Horizontal
        } else if width > height {
            Orientation::Vertical
        } else if self.rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Endpoints;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn board() -> Grid {
        Grid::new(
            25,
            50,
            Endpoints::new(Point::new(10, 15), Point::new(10, 35)),
        )
    }

    fn mazegen(seed: u64) -> MazeGen<StdRng> {
        MazeGen::new(StdRng::seed_from_u64(seed))
    }

    fn endpoints_open(grid: &Grid) -> bool {
        let e = grid.endpoints();
        [Some(e.start), Some(e.finish), e.bomb]
            .into_iter()
            .flatten()
            .all(|p| grid.is_passable(p))
    }

    #[test]
    fn generate_leaves_input_untouched() {
        let grid = board();
        let maze = mazegen(1).generate(MazeKind::Random, &grid);
        assert_eq!(grid.wall_count(), 0);
        assert!(maze.wall_count() > 0);
        assert_eq!(maze.endpoints(), grid.endpoints());
    }

    #[test]
    fn same_seed_same_maze() {
        let grid = board();
        for kind in MazeKind::ALL {
            let a = mazegen(7).generate(kind, &grid);
            let b = mazegen(7).generate(kind, &grid);
            assert_eq!(a, b, "{kind}");
        }
    }

    #[test]
    fn endpoints_are_never_walled() {
        let endpoints = Endpoints::new(Point::new(0, 0), Point::new(24, 48))
            .with_bomb(Some(Point::new(12, 25)));
        let grid = Grid::new(25, 50, endpoints);
        for seed in 0..5 {
            for kind in MazeKind::ALL {
                let maze = mazegen(seed).generate(kind, &grid);
                assert!(endpoints_open(&maze), "{kind} seed {seed}");
            }
        }
    }

    #[test]
    fn random_density_is_near_chance() {
        let grid = board();
        let maze = mazegen(3).generate(MazeKind::Random, &grid);
        let ratio = maze.wall_count() as f64 / grid.len() as f64;
        assert!((0.2..0.4).contains(&ratio), "ratio {ratio}");
    }

    #[test]
    fn vertical_bars_on_even_columns() {
        let grid = board();
        let maze = mazegen(4).generate(MazeKind::Vertical, &grid);
        for p in maze.bounds() {
            let cell = maze.at(p).unwrap();
            if p.col % 2 == 1 || p.col == 49 {
                assert!(!cell.is_wall(), "{p}");
            }
            // Top and bottom rows never get gaps.
            if p.col % 2 == 0 && (p.row == 0 || p.row == 24) && !cell.is_protected() {
                assert!(cell.is_wall(), "{p}");
            }
        }
    }

    #[test]
    fn horizontal_bars_on_even_rows() {
        let grid = board();
        let maze = mazegen(5).generate(MazeKind::Horizontal, &grid);
        for p in maze.bounds() {
            let cell = maze.at(p).unwrap();
            // 25 rows: the last row is even but left open.
            if p.row % 2 == 1 || p.row == 24 {
                assert!(!cell.is_wall(), "{p}");
            }
            if p.row % 2 == 0 && p.row < 24 && (p.col == 0 || p.col == 49) {
                assert!(cell.is_wall(), "{p}");
            }
        }
    }

    #[test]
    fn recursive_division_walls_the_border() {
        let grid = board();
        for seed in 0..10 {
            let maze = mazegen(seed).generate(MazeKind::RecursiveDivision, &grid);
            for p in maze.bounds() {
                if maze.bounds().on_border(p) && !grid.endpoints().is_protected(p) {
                    assert!(maze.at(p).unwrap().is_wall(), "seed {seed} at {p}");
                }
            }
        }
    }

    #[test]
    fn recursive_division_border_skips_protected_cells() {
        let endpoints = Endpoints::new(Point::new(0, 3), Point::new(9, 0));
        let grid = Grid::new(10, 12, endpoints);
        let maze = mazegen(11).generate(MazeKind::RecursiveDivision, &grid);
        assert!(endpoints_open(&maze));
        assert!(maze.at(Point::new(0, 2)).unwrap().is_wall());
    }

    #[test]
    fn recursive_division_divides_the_interior() {
        let grid = board();
        let border = 2 * 50 + 2 * 23;
        for seed in 0..5 {
            let maze = mazegen(seed).generate(MazeKind::RecursiveDivision, &grid);
            assert!(maze.wall_count() > border, "seed {seed}");
        }
    }

    #[test]
    fn degenerate_grid_only_gets_border() {
        let endpoints = Endpoints::new(Point::new(1, 0), Point::new(1, 3));
        let grid = Grid::new(3, 4, endpoints);
        let maze = mazegen(2).generate(MazeKind::RecursiveDivision, &grid);
        assert!(!maze.at(Point::new(1, 1)).unwrap().is_wall());
        assert!(!maze.at(Point::new(1, 2)).unwrap().is_wall());
        assert_eq!(maze.wall_count(), 8);
    }
}
