//! Reachability queries.

use pathviz_core::Point;

use crate::context::TraversalContext;
use crate::traits::Pather;

impl TraversalContext {
    /// Flood-fill from `p` and return every cell connected to it.
    ///
    /// Cells are connected when a chain of neighbours (as defined by
    /// `pather`) links them. Afterwards the context's visited flags mark the
    /// filled region. Returns an empty list when `p` is out of range or
    /// impassable.
    pub fn flood_fill<P: Pather>(&mut self, pather: &P, p: Point) -> Vec<Point> {
        self.reset();
        let mut result = Vec::new();
        let Some(si) = self.idx(p) else {
            return result;
        };
        if !pather.passable(p) {
            return result;
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut stack = vec![si];
        self.scratch[si].visited = true;
        result.push(p);

        while let Some(ci) = stack.pop() {
            let cp = self.point(ci);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.scratch[ni].visited {
                    continue;
                }
                self.scratch[ni].visited = true;
                stack.push(ni);
                result.push(np);
            }
        }

        self.nbuf = nbuf;
        result
    }

    /// Whether `to` can be reached from `from` through passable cells.
    pub fn connected<P: Pather>(&mut self, pather: &P, from: Point, to: Point) -> bool {
        self.flood_fill(pather, from);
        self.is_visited(to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathviz_core::Grid;

    #[test]
    fn fills_open_region_only() {
        let grid = Grid::parse(
            "\
S.#.
..#.
##.F",
        )
        .unwrap();
        let mut ctx = TraversalContext::for_grid(&grid);
        let mut region = ctx.flood_fill(&grid, grid.start());
        region.sort();
        assert_eq!(
            region,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(1, 0),
                Point::new(1, 1),
            ]
        );
        assert!(!ctx.connected(&grid, grid.start(), grid.finish()));
        assert!(ctx.connected(&grid, Point::new(0, 3), grid.finish()));
    }

    #[test]
    fn wall_origin_fills_nothing() {
        let grid = Grid::parse("S#F").unwrap();
        let mut ctx = TraversalContext::for_grid(&grid);
        assert!(ctx.flood_fill(&grid, Point::new(0, 1)).is_empty());
        assert!(ctx.flood_fill(&grid, Point::new(5, 5)).is_empty());
    }
}
