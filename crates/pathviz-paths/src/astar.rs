use pathviz_core::{Endpoints, Point};

use crate::context::{TraversalContext, UNREACHABLE};
use crate::traits::AstarPather;

impl TraversalContext {
    /// Visit cells in order of increasing `f = g + h` towards
    /// `endpoints.finish`, where `g` is the accumulated cost and `h` the
    /// pather's estimate.
    ///
    /// Same extraction loop as [`dijkstra`](Self::dijkstra), keyed on `f`;
    /// cells without an `f` sort last. A neighbour is only rewritten when it
    /// has no `f` yet or the new `f` is strictly smaller. Returns the cells in
    /// visiting order.
    ///
    /// The bomb is accepted but does not take part in routing.
    pub fn astar<P: AstarPather>(&mut self, pather: &P, endpoints: Endpoints) -> Vec<Point> {
        self.reset();
        let mut visited = Vec::new();
        let Some(si) = self.idx(endpoints.start) else {
            return visited;
        };
        let to = endpoints.finish;
        {
            let node = &mut self.scratch[si];
            node.distance = 0;
            node.g = Some(0);
            node.h = Some(0);
            node.f = Some(0);
        }

        let mut unvisited: Vec<usize> = (0..self.scratch.len()).collect();
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while !unvisited.is_empty() {
            let scratch = &self.scratch;
            unvisited.sort_by_key(|&i| scratch[i].f.unwrap_or(UNREACHABLE));
            let ci = unvisited.remove(0);
            let cp = self.point(ci);

            if !pather.passable(cp) {
                continue;
            }
            if self.scratch[ci].f.is_none_or(|f| f == UNREACHABLE) {
                log::trace!("astar: {} cells unreachable", unvisited.len() + 1);
                break;
            }

            self.scratch[ci].visited = true;
            visited.push(cp);
            if cp == to {
                break;
            }

            let current_g = self.scratch[ci].g.unwrap_or(0);
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let g = current_g.saturating_add(pather.cost(cp, np));
                let h = pather.estimate(np, to);
                let f = g.saturating_add(h);

                let n = &mut self.scratch[ni];
                if n.visited || n.f.is_some_and(|old| f >= old) {
                    continue;
                }
                n.g = Some(g);
                n.h = Some(h);
                n.f = Some(f);
                n.distance = f;
                n.previous = Some(cp);
            }
        }

        self.nbuf = nbuf;
        visited
    }
}
