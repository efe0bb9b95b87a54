use pathviz_core::{Endpoints, Point};

use crate::bfs::Frontier;
use crate::context::TraversalContext;
use crate::traits::Pather;

impl TraversalContext {
    /// Depth-first traversal from `endpoints.start`.
    ///
    /// Same marking discipline as [`bfs`](Self::bfs) on a stack: the most
    /// recently discovered neighbour is expanded next. Finds some route when
    /// one exists, not necessarily the shortest.
    pub fn dfs<P: Pather>(&mut self, pather: &P, endpoints: Endpoints) -> Vec<Point> {
        self.sweep(pather, endpoints, Frontier::Lifo)
    }
}
