//! The run state machine.
//!
//! A [`Visualizer`] owns the grid and the current selections. While idle it
//! accepts edits; [`visualize`](Visualizer::visualize) runs the selected
//! algorithm to completion, plans the reveal schedule and switches to
//! [`State::Running`]. Reveals are then drained with
//! [`next_reveal`](Visualizer::next_reveal) or [`tick`](Visualizer::tick);
//! once the last one is applied the visualizer is idle again. Every edit is
//! refused with [`VisualizerError::Running`] in between.

use pathviz_core::{Endpoints, Grid, Point, Role};
use pathviz_maze::{MazeGen, MazeKind};
use pathviz_paths::{Algorithm, Search};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{Speed, VisualizerConfig};
use crate::error::VisualizerError;
use crate::schedule::{RevealEvent, RevealKind, RevealSchedule};

/// Whether a run is being revealed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,
    Running,
}

/// Everything the renderer needs to draw one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub pos: Point,
    pub role: Role,
    pub wall: bool,
    pub weight: bool,
    /// Revealed as visited by the current run.
    pub visited: bool,
    /// Revealed as part of the current path.
    pub path: bool,
}

/// Grid editor and run driver.
pub struct Visualizer {
    config: VisualizerConfig,
    grid: Grid,
    mazegen: MazeGen<StdRng>,
    state: State,
    search: Option<Search>,
    schedule: RevealSchedule,
    visited: Vec<bool>,
    path: Vec<bool>,
}

impl Visualizer {
    /// Build a visualizer with a fresh grid.
    ///
    /// Fails when start or finish lies outside `rows x cols` or when they
    /// coincide.
    pub fn new(config: VisualizerConfig) -> Result<Self, VisualizerError> {
        let grid = Grid::new(config.rows, config.cols, config.endpoints());
        for p in [config.start, config.finish] {
            if !grid.contains(p) {
                return Err(VisualizerError::OutOfBounds(p));
            }
        }
        if config.start == config.finish {
            return Err(VisualizerError::Occupied(config.finish));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let len = grid.len();
        Ok(Self {
            config,
            grid,
            mazegen: MazeGen::new(rng),
            state: State::Idle,
            search: None,
            schedule: RevealSchedule::new(),
            visited: vec![false; len],
            path: vec![false; len],
        })
    }

    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// Result of the last run, until the path is cleared.
    pub fn search(&self) -> Option<&Search> {
        self.search.as_ref()
    }

    /// Reveals not yet applied.
    pub fn schedule(&self) -> &RevealSchedule {
        &self.schedule
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// Clear the previous run, search with the selected algorithm and plan
    /// its reveals. Returns the number of scheduled reveals.
    pub fn visualize(&mut self) -> Result<usize, VisualizerError> {
        self.guard("visualize")?;
        self.reset_run();
        let algorithm = self.config.algorithm;
        if !algorithm.is_weighted() && self.grid.count_fn(|_, c| c.is_weight()) > 0 {
            log::info!("{} ignores weights", algorithm.label());
        }
        let search = self
            .config
            .algorithm
            .search(&self.grid, self.config.relaxation);
        self.schedule = RevealSchedule::plan(
            &search.visited,
            &search.path,
            self.config.speed.step(),
            self.config.path_step,
        );
        log::info!(
            "{}: {} visited, path of {} cells{}",
            search.algorithm.label(),
            search.visited.len(),
            search.path.len(),
            if search.reached() { "" } else { " (finish unreachable)" }
        );
        self.search = Some(search);
        let scheduled = self.schedule.len();
        if scheduled == 0 {
            return Ok(0);
        }
        self.state = State::Running;
        Ok(scheduled)
    }

    /// Apply the next reveal, if any.
    pub fn next_reveal(&mut self) -> Option<RevealEvent> {
        let event = self.schedule.pop()?;
        self.apply(event);
        if self.schedule.is_empty() {
            self.finish_run();
        }
        Some(event)
    }

    /// Apply every reveal scheduled at or before `now` time units into the
    /// run.
    pub fn tick(&mut self, now: u64) -> Vec<RevealEvent> {
        let due = self.schedule.pop_due(now);
        for &event in &due {
            self.apply(event);
        }
        if !due.is_empty() && self.schedule.is_empty() {
            self.finish_run();
        }
        due
    }

    /// Apply all remaining reveals at once.
    pub fn reveal_all(&mut self) -> usize {
        let mut n = 0;
        while self.next_reveal().is_some() {
            n += 1;
        }
        n
    }

    fn apply(&mut self, event: RevealEvent) {
        let Some(i) = self.grid.index(event.pos) else {
            return;
        };
        match event.kind {
            RevealKind::Visited => self.visited[i] = true,
            RevealKind::Path => self.path[i] = true,
        }
    }

    fn finish_run(&mut self) {
        if self.is_running() {
            log::debug!("reveal complete");
        }
        self.state = State::Idle;
    }

    fn reset_run(&mut self) {
        self.search = None;
        self.schedule.clear();
        self.visited.fill(false);
        self.path.fill(false);
    }

    fn guard(&self, what: &str) -> Result<(), VisualizerError> {
        if self.is_running() {
            log::debug!("{what} refused: run in progress");
            return Err(VisualizerError::Running);
        }
        Ok(())
    }

    fn check_bounds(&self, p: Point) -> Result<(), VisualizerError> {
        if self.grid.contains(p) {
            Ok(())
        } else {
            Err(VisualizerError::OutOfBounds(p))
        }
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Flip the wall at `p`. Returns `false` for endpoints, which are never
    /// walled.
    pub fn toggle_wall(&mut self, p: Point) -> Result<bool, VisualizerError> {
        self.guard("toggle wall")?;
        self.check_bounds(p)?;
        let changed = self.grid.toggle_wall(p);
        log::debug!("toggle wall at {p}: {changed}");
        Ok(changed)
    }

    /// Flip the weight at `p`. Returns `false` for endpoints and walls.
    pub fn toggle_weight(&mut self, p: Point) -> Result<bool, VisualizerError> {
        self.guard("toggle weight")?;
        self.check_bounds(p)?;
        let changed = self.grid.toggle_weight(p);
        log::debug!("toggle weight at {p}: {changed}");
        Ok(changed)
    }

    /// Move the start to `p`. The grid is rebuilt, dropping walls and
    /// weights.
    pub fn move_start(&mut self, p: Point) -> Result<(), VisualizerError> {
        self.relocate(Role::Start, p)
    }

    /// Move the finish to `p`. The grid is rebuilt, dropping walls and
    /// weights.
    pub fn move_finish(&mut self, p: Point) -> Result<(), VisualizerError> {
        self.relocate(Role::Finish, p)
    }

    /// Put the bomb at `p`, adding it if absent. The grid is rebuilt,
    /// dropping walls and weights.
    pub fn move_bomb(&mut self, p: Point) -> Result<(), VisualizerError> {
        self.relocate(Role::Bomb, p)
    }

    fn relocate(&mut self, role: Role, p: Point) -> Result<(), VisualizerError> {
        self.guard("move endpoint")?;
        self.check_bounds(p)?;
        let mut endpoints = self.grid.endpoints();
        let occupant = endpoints.role_at(p);
        if occupant == role {
            return Ok(());
        }
        if occupant != Role::None {
            return Err(VisualizerError::Occupied(p));
        }
        match role {
            Role::Start => endpoints.start = p,
            Role::Finish => endpoints.finish = p,
            Role::Bomb => endpoints.bomb = Some(p),
            Role::None => return Ok(()),
        }
        log::debug!("{role:?} moved to {p}");
        self.rebuild(endpoints);
        Ok(())
    }

    /// Add a bomb at the centre of the grid, or remove the existing one. The
    /// grid is rebuilt either way. Returns the new bomb position.
    pub fn toggle_bomb(&mut self) -> Result<Option<Point>, VisualizerError> {
        self.guard("toggle bomb")?;
        let endpoints = self.grid.endpoints();
        let bomb = match endpoints.bomb {
            Some(_) => None,
            None => {
                let centre = self.config.bomb_position();
                if endpoints.is_protected(centre) {
                    return Err(VisualizerError::Occupied(centre));
                }
                Some(centre)
            }
        };
        log::debug!("bomb now at {bomb:?}");
        self.rebuild(endpoints.with_bomb(bomb));
        Ok(bomb)
    }

    fn rebuild(&mut self, endpoints: Endpoints) {
        self.config.start = endpoints.start;
        self.config.finish = endpoints.finish;
        self.grid = Grid::new(self.config.rows, self.config.cols, endpoints);
        self.reset_run();
    }

    /// Clear the board, then stamp a maze of the given kind.
    pub fn generate_maze(&mut self, kind: MazeKind) -> Result<(), VisualizerError> {
        self.clear_board()?;
        self.grid = self.mazegen.generate(kind, &self.grid);
        log::info!("{}: {} walls", kind.label(), self.grid.wall_count());
        Ok(())
    }

    /// Rebuild the grid from the current endpoints.
    pub fn clear_board(&mut self) -> Result<(), VisualizerError> {
        self.guard("clear board")?;
        self.grid = self.grid.cleared();
        self.reset_run();
        log::debug!("board cleared");
        Ok(())
    }

    /// Remove every wall and weight, keeping endpoints and run results.
    pub fn clear_walls_and_weights(&mut self) -> Result<(), VisualizerError> {
        self.guard("clear walls and weights")?;
        self.grid.clear_walls_and_weights();
        log::debug!("walls and weights cleared");
        Ok(())
    }

    /// Drop the last run's results and revealed cells.
    pub fn clear_path(&mut self) -> Result<(), VisualizerError> {
        self.guard("clear path")?;
        self.reset_run();
        Ok(())
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), VisualizerError> {
        self.guard("set algorithm")?;
        self.config.algorithm = algorithm;
        log::debug!("algorithm set to {algorithm}");
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) -> Result<(), VisualizerError> {
        self.guard("set speed")?;
        self.config.speed = speed;
        log::debug!("speed set to {speed}");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Snapshot of the cell at `p`.
    pub fn cell(&self, p: Point) -> Option<CellView> {
        let i = self.grid.index(p)?;
        let cell = self.grid.at(p)?;
        Some(CellView {
            pos: p,
            role: cell.role(),
            wall: cell.is_wall(),
            weight: cell.is_weight(),
            visited: self.visited[i],
            path: self.path[i],
        })
    }

    /// Row-major snapshots of every cell.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.grid.bounds().into_iter().filter_map(|p| self.cell(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Range;

    fn small(rows: i32, cols: i32, start: Point, finish: Point) -> Visualizer {
        Visualizer::new(VisualizerConfig {
            rows,
            cols,
            start,
            finish,
            seed: Some(9),
            ..VisualizerConfig::default()
        })
        .unwrap()
    }

    fn square() -> Visualizer {
        small(3, 3, Point::new(0, 0), Point::new(2, 2))
    }

    #[test]
    fn rejects_bad_endpoints() {
        let out = VisualizerConfig {
            start: Point::new(30, 0),
            ..VisualizerConfig::default()
        };
        assert_eq!(
            Visualizer::new(out).err(),
            Some(VisualizerError::OutOfBounds(Point::new(30, 0)))
        );
        let same = VisualizerConfig {
            finish: Point::new(10, 15),
            ..VisualizerConfig::default()
        };
        assert_eq!(
            Visualizer::new(same).err(),
            Some(VisualizerError::Occupied(Point::new(10, 15)))
        );
    }

    #[test]
    fn run_reveals_visited_then_path() {
        let mut viz = square();
        viz.set_algorithm(Algorithm::Bfs).unwrap();
        viz.set_speed(Speed::Fast).unwrap();
        let scheduled = viz.visualize().unwrap();
        assert_eq!(scheduled, 9 + 4);
        assert!(viz.is_running());

        let events: Vec<RevealEvent> = std::iter::from_fn(|| viz.next_reveal()).collect();
        let offsets: Vec<u64> = events.iter().map(|e| e.offset).collect();
        let expected: Vec<u64> = (0..9)
            .map(|i| 5 * i)
            .chain((0..4).map(|j| 45 + 50 * j))
            .collect();
        assert_eq!(offsets, expected);
        assert_eq!(viz.state(), State::Idle);

        let finish = viz.cell(Point::new(2, 2)).unwrap();
        assert!(finish.visited && finish.path);
        let start = viz.cell(Point::new(0, 0)).unwrap();
        assert!(start.visited && !start.path);
        assert_eq!(viz.cells().filter(|c| c.path).count(), 4);
    }

    #[test]
    fn edits_are_refused_while_running() {
        let mut viz = square();
        viz.visualize().unwrap();
        let before: Vec<CellView> = viz.cells().collect();
        let p = Point::new(1, 1);
        assert_eq!(viz.toggle_wall(p), Err(VisualizerError::Running));
        assert_eq!(viz.toggle_weight(p), Err(VisualizerError::Running));
        assert_eq!(viz.move_start(p), Err(VisualizerError::Running));
        assert_eq!(viz.toggle_bomb(), Err(VisualizerError::Running));
        assert_eq!(
            viz.generate_maze(MazeKind::Random),
            Err(VisualizerError::Running)
        );
        assert_eq!(viz.clear_board(), Err(VisualizerError::Running));
        assert_eq!(viz.clear_walls_and_weights(), Err(VisualizerError::Running));
        assert_eq!(viz.clear_path(), Err(VisualizerError::Running));
        assert_eq!(viz.set_algorithm(Algorithm::Dfs), Err(VisualizerError::Running));
        assert_eq!(viz.set_speed(Speed::Slow), Err(VisualizerError::Running));
        assert_eq!(viz.visualize(), Err(VisualizerError::Running));
        assert_eq!(viz.cells().collect::<Vec<_>>(), before);

        viz.reveal_all();
        assert!(viz.toggle_wall(p).unwrap());
    }

    #[test]
    fn tick_applies_due_reveals() {
        let mut viz = square();
        viz.set_algorithm(Algorithm::Bfs).unwrap();
        viz.visualize().unwrap();
        assert_eq!(viz.tick(0).len(), 1);
        assert_eq!(viz.tick(25).len(), 2);
        assert!(viz.is_running());
        let rest = viz.tick(u64::MAX);
        assert_eq!(rest.len(), 6 + 4);
        assert!(!viz.is_running());
        assert!(viz.tick(u64::MAX).is_empty());
    }

    #[test]
    fn max_custom_speed_runs_to_completion() {
        let mut viz = square();
        viz.set_speed("18446744073709551615".parse().unwrap()).unwrap();
        let scheduled = viz.visualize().unwrap();
        assert_eq!(viz.schedule().end(), Some(u64::MAX));
        assert_eq!(viz.reveal_all(), scheduled);
        assert_eq!(viz.state(), State::Idle);
    }

    #[test]
    fn unreachable_finish_ends_after_visited() {
        let mut viz = small(1, 3, Point::new(0, 0), Point::new(0, 2));
        viz.toggle_wall(Point::new(0, 1)).unwrap();
        for algorithm in Algorithm::ALL {
            viz.set_algorithm(algorithm).unwrap();
            viz.visualize().unwrap();
            let events: Vec<RevealEvent> = std::iter::from_fn(|| viz.next_reveal()).collect();
            assert!(events.iter().all(|e| e.kind == RevealKind::Visited));
            assert!(!events.iter().any(|e| e.pos == Point::new(0, 2)));
            assert_eq!(viz.state(), State::Idle);
            assert_eq!(viz.search().map(|s| s.reached()), Some(false));
        }
    }

    #[test]
    fn clear_path_is_idempotent() {
        let mut viz = square();
        viz.toggle_weight(Point::new(1, 1)).unwrap();
        viz.visualize().unwrap();
        viz.reveal_all();
        viz.clear_path().unwrap();
        let once: Vec<CellView> = viz.cells().collect();
        viz.clear_path().unwrap();
        assert_eq!(viz.cells().collect::<Vec<_>>(), once);
        assert!(once.iter().all(|c| !c.visited && !c.path));
        assert!(viz.cell(Point::new(1, 1)).unwrap().weight);
        assert!(viz.search().is_none());
    }

    #[test]
    fn wall_toggle_round_trip_drops_weight() {
        let mut viz = square();
        let p = Point::new(1, 2);
        viz.toggle_weight(p).unwrap();
        assert!(viz.toggle_wall(p).unwrap());
        assert!(viz.cell(p).unwrap().wall);
        assert!(!viz.cell(p).unwrap().weight);
        assert!(viz.toggle_wall(p).unwrap());
        assert!(!viz.cell(p).unwrap().wall);
        assert!(!viz.toggle_wall(Point::new(0, 0)).unwrap());
        assert_eq!(
            viz.toggle_wall(Point::new(3, 0)),
            Err(VisualizerError::OutOfBounds(Point::new(3, 0)))
        );
    }

    #[test]
    fn moving_endpoints_rebuilds_grid() {
        let mut viz = small(5, 5, Point::new(0, 0), Point::new(4, 4));
        viz.toggle_wall(Point::new(2, 2)).unwrap();
        viz.move_start(Point::new(1, 1)).unwrap();
        assert_eq!(viz.grid().start(), Point::new(1, 1));
        assert_eq!(viz.config().start, Point::new(1, 1));
        assert_eq!(viz.grid().wall_count(), 0);
        assert_eq!(viz.cell(Point::new(0, 0)).unwrap().role, Role::None);

        assert_eq!(
            viz.move_finish(Point::new(1, 1)),
            Err(VisualizerError::Occupied(Point::new(1, 1)))
        );
        assert_eq!(viz.grid().finish(), Point::new(4, 4));
        assert_eq!(
            viz.move_finish(Point::new(5, 5)),
            Err(VisualizerError::OutOfBounds(Point::new(5, 5)))
        );
        viz.move_bomb(Point::new(3, 0)).unwrap();
        assert_eq!(viz.grid().bomb(), Some(Point::new(3, 0)));
    }

    #[test]
    fn toggle_bomb_adds_and_removes_at_centre() {
        let mut viz = Visualizer::new(VisualizerConfig::default()).unwrap();
        viz.toggle_wall(Point::new(0, 0)).unwrap();
        assert_eq!(viz.toggle_bomb(), Ok(Some(Point::new(12, 25))));
        assert_eq!(viz.cell(Point::new(12, 25)).unwrap().role, Role::Bomb);
        assert_eq!(viz.grid().wall_count(), 0);
        assert_eq!(viz.toggle_bomb(), Ok(None));
        assert_eq!(viz.grid().bomb(), None);

        let mut crowded = small(3, 3, Point::new(1, 1), Point::new(0, 0));
        assert_eq!(
            crowded.toggle_bomb(),
            Err(VisualizerError::Occupied(Point::new(1, 1)))
        );
    }

    #[test]
    fn generate_maze_starts_from_clean_board() {
        let mut viz = Visualizer::new(VisualizerConfig {
            seed: Some(3),
            ..VisualizerConfig::default()
        })
        .unwrap();
        viz.toggle_weight(Point::new(5, 5)).unwrap();
        viz.generate_maze(MazeKind::RecursiveDivision).unwrap();
        assert_eq!(viz.grid().count_fn(|_, c| c.is_weight()), 0);
        let border = Range::with_size(25, 50);
        for c in viz.cells() {
            if border.on_border(c.pos) {
                assert!(c.wall, "{}", c.pos);
            }
        }

        let mut twin = Visualizer::new(VisualizerConfig {
            seed: Some(3),
            ..VisualizerConfig::default()
        })
        .unwrap();
        twin.generate_maze(MazeKind::RecursiveDivision).unwrap();
        assert_eq!(twin.grid(), viz.grid());
    }

    #[test]
    fn clear_walls_keeps_run_results() {
        let mut viz = square();
        viz.toggle_wall(Point::new(1, 0)).unwrap();
        viz.visualize().unwrap();
        viz.reveal_all();
        viz.clear_walls_and_weights().unwrap();
        assert_eq!(viz.grid().wall_count(), 0);
        assert!(viz.cell(Point::new(2, 2)).unwrap().path);
        viz.clear_board().unwrap();
        assert!(viz.cells().all(|c| !c.visited && !c.path));
    }
}
