use pathviz_core::{Cell, Grid, Point, BASE_WEIGHT};

use crate::distance::manhattan;

/// Minimal traversal interface: neighbour enumeration.
pub trait Pather {
    /// Append the passable neighbours of `p` into `buf`, in search order.
    /// The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);

    /// Whether `p` can be entered at all.
    fn passable(&self, p: Point) -> bool;
}

/// Pather with weighted (positive-cost) steps.
pub trait WeightedPather: Pather {
    /// Cost of moving from `from` to adjacent `to`. Must be > 0.
    fn cost(&self, from: Point, to: Point) -> i32;
}

/// Pather with an admissible heuristic.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of distance from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Point, to: Point) -> i32;
}

impl Pather for Grid {
    /// Up, down, left, right; out-of-bounds and walled cells are omitted.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(p.neighbors_4().into_iter().filter(|&n| self.is_passable(n)));
    }

    fn passable(&self, p: Point) -> bool {
        self.is_passable(p)
    }
}

impl WeightedPather for Grid {
    /// The weight of the entered cell.
    fn cost(&self, _from: Point, to: Point) -> i32 {
        self.at(to).map_or(BASE_WEIGHT, Cell::weight)
    }
}

impl AstarPather for Grid {
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
