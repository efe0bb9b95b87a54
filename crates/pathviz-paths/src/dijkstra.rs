use pathviz_core::{Endpoints, Point};

use crate::context::{TraversalContext, UNREACHABLE};
use crate::traits::WeightedPather;

/// How Dijkstra writes a neighbour's distance and back-link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Relaxation {
    /// Every expansion overwrites the distance and back-link of each
    /// unvisited neighbour, whether or not the new route is cheaper.
    ///
    /// Distances stay exact on unit-weight grids. With weighted cells a later
    /// expansion can replace a cheaper tentative route with a dearer one.
    #[default]
    Overwrite,
    /// Only strictly cheaper routes are written (textbook Dijkstra).
    Improving,
}

impl TraversalContext {
    /// Visit cells in order of increasing distance from `endpoints.start`.
    ///
    /// Every cell of the range starts in the working set. The cell with the
    /// smallest distance is extracted each round (ties keep their previous
    /// relative order, initially row-major); walls are dropped, an
    /// [`UNREACHABLE`] minimum ends the search, and extracting the finish
    /// ends it successfully. Returns the cells in visiting order.
    ///
    /// The bomb is accepted but does not take part in routing.
    pub fn dijkstra<P: WeightedPather>(
        &mut self,
        pather: &P,
        endpoints: Endpoints,
        relaxation: Relaxation,
    ) -> Vec<Point> {
        self.reset();
        let mut visited = Vec::new();
        let Some(si) = self.idx(endpoints.start) else {
            return visited;
        };
        self.scratch[si].distance = 0;

        let mut unvisited: Vec<usize> = (0..self.scratch.len()).collect();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while !unvisited.is_empty() {
            let scratch = &self.scratch;
            unvisited.sort_by_key(|&i| scratch[i].distance);
            let ci = unvisited.remove(0);
            let cp = self.point(ci);

            if !pather.passable(cp) {
                continue;
            }
            let current = self.scratch[ci].distance;
            if current == UNREACHABLE {
                log::trace!("dijkstra: {} cells unreachable", unvisited.len() + 1);
                break;
            }

            self.scratch[ci].visited = true;
            visited.push(cp);
            if cp == endpoints.finish {
                break;
            }

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative = current.saturating_add(pather.cost(cp, np));
                let n = &mut self.scratch[ni];
                if n.visited {
                    continue;
                }
                if relaxation == Relaxation::Improving && tentative >= n.distance {
                    continue;
                }
                n.distance = tentative;
                n.previous = Some(cp);
            }
        }

        self.nbuf = nbuf;
        visited
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Grid;

    fn run(layout: &str, relaxation: Relaxation) -> (Grid, TraversalContext, Vec<Point>) {
        let grid = Grid::parse(layout).unwrap();
        let mut ctx = TraversalContext::for_grid(&grid);
        let visited = ctx.dijkstra(&grid, grid.endpoints(), relaxation);
        (grid, ctx, visited)
    }

    #[test]
    fn visits_in_distance_order() {
        let (grid, ctx, visited) = run(
            "\
S..
...
..F",
            Relaxation::Overwrite,
        );
        assert_eq!(visited.first(), Some(&grid.start()));
        assert_eq!(visited.last(), Some(&grid.finish()));
        assert_eq!(visited.len(), 9);
        let dists: Vec<i32> = visited.iter().map(|&p| ctx.distance(p)).collect();
        assert!(dists.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(ctx.distance(grid.finish()), 4);
    }

    #[test]
    fn ties_keep_row_major_order() {
        let (_, _, visited) = run("S..\n...\n..F", Relaxation::Overwrite);
        assert_eq!(
            &visited[..3],
            &[Point::new(0, 0), Point::new(0, 1), Point::new(1, 0)]
        );
    }

    #[test]
    fn walls_are_never_visited() {
        let (grid, _, visited) = run(
            "\
S#.
.#.
..F",
            Relaxation::Overwrite,
        );
        assert!(visited.iter().all(|&p| grid.is_passable(p)));
        assert_eq!(visited.last(), Some(&grid.finish()));
    }

    #[test]
    fn stops_when_remainder_is_unreachable() {
        let (grid, ctx, visited) = run(
            "\
S#..
##..
...F",
            Relaxation::Overwrite,
        );
        assert_eq!(visited, vec![grid.start()]);
        assert!(!ctx.is_visited(grid.finish()));
        assert_eq!(ctx.distance(grid.finish()), UNREACHABLE);
    }

    #[test]
    fn improving_relaxation_finds_cheapest_route() {
        // The weight in the short corridor makes the detour cheaper.
        let layout = "\
S~.F
....";
        let (grid, ctx, _) = run(layout, Relaxation::Improving);
        assert_eq!(ctx.distance(grid.finish()), 5);
    }

    #[test]
    fn overwrite_relaxation_rewrites_backlinks() {
        // (1,1) is first reached from (0,1), then rewritten from (1,0) at the
        // same distance.
        let (_, ctx, _) = run("S..\n...\n..F", Relaxation::Overwrite);
        assert_eq!(ctx.previous(Point::new(1, 1)), Some(Point::new(1, 0)));
        let (_, ctx, _) = run("S..\n...\n..F", Relaxation::Improving);
        assert_eq!(ctx.previous(Point::new(1, 1)), Some(Point::new(0, 1)));
    }

    #[test]
    fn reruns_do_not_leak_state() {
        let grid = Grid::parse("S..\n.#.\n..F").unwrap();
        let mut ctx = TraversalContext::for_grid(&grid);
        let first = ctx.dijkstra(&grid, grid.endpoints(), Relaxation::Overwrite);
        let second = ctx.dijkstra(&grid, grid.endpoints(), Relaxation::Overwrite);
        assert_eq!(first, second);
    }
}
