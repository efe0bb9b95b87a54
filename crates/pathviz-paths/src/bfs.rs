use std::collections::VecDeque;

use pathviz_core::{Endpoints, Point};

use crate::context::TraversalContext;
use crate::traits::Pather;

/// Which end of the frontier the next cell is taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Frontier {
    Fifo,
    Lifo,
}

impl TraversalContext {
    /// Compute a breadth-first traversal from `endpoints.start`.
    ///
    /// Each step has cost 1 and cell weights are ignored. A cell is marked
    /// visited, gets `distance = parent + 1` and is appended to the returned
    /// list when it is enqueued. The search ends once the finish is dequeued
    /// or the queue runs dry.
    pub fn bfs<P: Pather>(&mut self, pather: &P, endpoints: Endpoints) -> Vec<Point> {
        self.sweep(pather, endpoints, Frontier::Fifo)
    }

    pub(crate) fn sweep<P: Pather>(
        &mut self,
        pather: &P,
        endpoints: Endpoints,
        frontier: Frontier,
    ) -> Vec<Point> {
        self.reset();
        let mut visited = Vec::new();
        let Some(si) = self.idx(endpoints.start) else {
            return visited;
        };
        self.scratch[si].distance = 0;
        self.scratch[si].visited = true;
        visited.push(endpoints.start);

        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(si);
        let mut nbuf = std::mem::take(&mut self.nbuf);

        loop {
            let next = match frontier {
                Frontier::Fifo => queue.pop_front(),
                Frontier::Lifo => queue.pop_back(),
            };
            let Some(ci) = next else {
                break;
            };
            let cp = self.point(ci);
            if !pather.passable(cp) {
                continue;
            }
            if cp == endpoints.finish {
                break;
            }

            let current = self.scratch[ci].distance;
            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);
            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.scratch[ni];
                if n.visited {
                    continue;
                }
                n.visited = true;
                n.distance = current + 1;
                n.previous = Some(cp);
                visited.push(np);
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        visited
    }
}
