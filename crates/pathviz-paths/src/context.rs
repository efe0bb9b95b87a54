use pathviz_core::{Grid, Point, Range};

/// Sentinel value meaning "unreachable" for distances and costs.
pub const UNREACHABLE: i32 = i32::MAX;

// ---------------------------------------------------------------------------
// Per-cell scratch state
// ---------------------------------------------------------------------------

/// Traversal bookkeeping for one cell during a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scratch {
    /// Best known cost from the start, [`UNREACHABLE`] until reached.
    pub distance: i32,
    pub visited: bool,
    /// Cell this one was reached from.
    pub previous: Option<Point>,
    // Weighted-search costs, only written by A*.
    pub g: Option<i32>,
    pub h: Option<i32>,
    pub f: Option<i32>,
}

impl Default for Scratch {
    fn default() -> Self {
        Self {
            distance: UNREACHABLE,
            visited: false,
            previous: None,
            g: None,
            h: None,
            f: None,
        }
    }
}

// ---------------------------------------------------------------------------
// TraversalContext
// ---------------------------------------------------------------------------

/// Scratch state for traversals over a grid rectangle.
///
/// The grid layout stays immutable during a run; everything an algorithm
/// writes (distances, visited flags, back-links, A* costs) lives here. Every
/// algorithm resets the context before starting, so a context can be reused
/// across runs without leaking stale state.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TraversalContext {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    pub(crate) scratch: Vec<Scratch>,
    // shared scratch buffer for neighbor queries
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) nbuf: Vec<Point>,
}

impl TraversalContext {
    /// Create a new context for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.cols().max(0) as usize,
            scratch: vec![Scratch::default(); rng.len()],
            nbuf: Vec::with_capacity(4),
        }
    }

    /// Create a context covering `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.bounds())
    }

    /// Return every cell to its defaults.
    pub fn reset(&mut self) {
        self.scratch.fill(Scratch::default());
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Scratch state at `p`, `None` if out of range.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Scratch> {
        self.idx(p).map(|i| &self.scratch[i])
    }

    /// Distance recorded at `p`, [`UNREACHABLE`] if never reached.
    pub fn distance(&self, p: Point) -> i32 {
        self.at(p).map_or(UNREACHABLE, |s| s.distance)
    }

    /// Whether `p` was visited by the last run.
    pub fn is_visited(&self, p: Point) -> bool {
        self.at(p).is_some_and(|s| s.visited)
    }

    /// The back-link at `p`.
    pub fn previous(&self, p: Point) -> Option<Point> {
        self.at(p).and_then(|s| s.previous)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let col = (p.col - self.rng.min.col) as usize;
        let row = (p.row - self.rng.min.row) as usize;
        Some(row * self.width + col)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let col = (idx % self.width) as i32 + self.rng.min.col;
        let row = (idx / self.width) as i32 + self.rng.min.row;
        Point::new(row, col)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn context_round_trip() {
        let mut ctx = TraversalContext::new(Range::with_size(2, 3));
        ctx.scratch[4].previous = Some(Point::new(0, 1));
        ctx.scratch[4].distance = 2;
        let json = serde_json::to_string(&ctx).unwrap();
        let back: TraversalContext = serde_json::from_str(&json).unwrap();
        assert_eq!(back.previous(Point::new(1, 1)), Some(Point::new(0, 1)));
        assert_eq!(back.distance(Point::new(1, 1)), 2);
        assert_eq!(back.range(), ctx.range());
    }
}
