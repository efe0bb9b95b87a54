use pathviz_core::Point;

use crate::context::TraversalContext;
use crate::traits::WeightedPather;

impl TraversalContext {
    /// Follow back-links from `finish` and return the route in start-to-finish
    /// order.
    ///
    /// The start cell has no back-link and is therefore not part of the
    /// result: a route of `n` moves yields `n` cells, the last one being
    /// `finish`. Returns an empty list when the last run never visited
    /// `finish`.
    pub fn reconstruct_path(&self, finish: Point) -> Vec<Point> {
        let mut path = Vec::new();
        if !self.is_visited(finish) {
            return path;
        }
        let mut cur = finish;
        // A cell never links to itself, so the chain has at most `len` links.
        let mut budget = self.range().len();
        while let Some(prev) = self.previous(cur) {
            path.push(cur);
            cur = prev;
            if budget == 0 {
                log::warn!("back-link cycle at {cur}");
                path.clear();
                return path;
            }
            budget -= 1;
        }
        path.reverse();
        path
    }
}

/// Sum of step costs along `path`, starting at `from`.
///
/// `path` is in the shape returned by
/// [`reconstruct_path`](TraversalContext::reconstruct_path): it omits `from`
/// and ends at the destination.
pub fn path_cost<P: WeightedPather>(pather: &P, from: Point, path: &[Point]) -> i32 {
    let mut cost = 0i32;
    let mut prev = from;
    for &p in path {
        cost = cost.saturating_add(pather.cost(prev, p));
        prev = p;
    }
    cost
}
