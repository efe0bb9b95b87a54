//! The [`Grid`] type: a fixed-size 2D layout of [`Cell`]s.
//!
//! A `Grid` owns its storage outright: cloning yields an independent copy,
//! so maze generators and copy-on-write edits never alias the caller's grid.
//! Traversal scratch state does not live here; see `pathviz-paths`.

use std::fmt;

use crate::cell::{Cell, Role};
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Positions of the protected cells of a grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoints {
    pub start: Point,
    pub finish: Point,
    pub bomb: Option<Point>,
}

impl Endpoints {
    /// Start and finish without a bomb.
    #[inline]
    pub const fn new(start: Point, finish: Point) -> Self {
        Self {
            start,
            finish,
            bomb: None,
        }
    }

    /// Replace the bomb position (builder).
    #[inline]
    pub const fn with_bomb(mut self, bomb: Option<Point>) -> Self {
        self.bomb = bomb;
        self
    }

    /// The role carried by `p`, if any.
    pub fn role_at(&self, p: Point) -> Role {
        if p == self.start {
            Role::Start
        } else if p == self.finish {
            Role::Finish
        } else if self.bomb == Some(p) {
            Role::Bomb
        } else {
            Role::None
        }
    }

    /// Whether `p` coincides with start, finish or bomb.
    #[inline]
    pub fn is_protected(&self, p: Point) -> bool {
        self.role_at(p) != Role::None
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular layout of cells addressed by `(row, col)`.
///
/// `bounds` always starts at the origin and `cells` holds exactly
/// `bounds.len()` entries; deserialization rejects anything else.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawGrid"))]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    endpoints: Endpoints,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGrid {
    cells: Vec<Cell>,
    bounds: Range,
    endpoints: Endpoints,
}

#[cfg(feature = "serde")]
impl TryFrom<RawGrid> for Grid {
    type Error = ParseGridError;

    fn try_from(raw: RawGrid) -> Result<Self, ParseGridError> {
        let RawGrid {
            cells,
            bounds,
            endpoints,
        } = raw;
        if bounds.min != Point::ZERO {
            return Err(ParseGridError::BadBounds(bounds));
        }
        if cells.len() != bounds.len() {
            return Err(ParseGridError::CellCount {
                expected: bounds.len(),
                found: cells.len(),
            });
        }
        Ok(Self {
            cells,
            bounds,
            endpoints,
        })
    }
}

impl Grid {
    /// Create a grid of `rows x cols` plain cells with roles stamped at the
    /// given endpoints.
    ///
    /// Endpoints outside the grid are recorded but carry no cell; callers are
    /// expected to pass a well-formed layout.
    pub fn new(rows: i32, cols: i32, endpoints: Endpoints) -> Self {
        let bounds = Range::with_size(rows, cols);
        let cells = bounds
            .iter()
            .map(|p| Cell::with_role(endpoints.role_at(p)))
            .collect();
        Self {
            cells,
            bounds,
            endpoints,
        }
    }

    /// A fresh grid with the same extent and endpoints and no walls or
    /// weights.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self::new(self.rows(), self.cols(), self.endpoints)
    }

    /// The bounding range of this grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols()
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside this grid's bounds.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    #[inline]
    pub fn endpoints(&self) -> Endpoints {
        self.endpoints
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.endpoints.start
    }

    #[inline]
    pub fn finish(&self) -> Point {
        self.endpoints.finish
    }

    #[inline]
    pub fn bomb(&self) -> Option<Point> {
        self.endpoints.bomb
    }

    /// Convert a point to a flat row-major index. `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.row as usize) * (self.cols() as usize) + p.col as usize)
    }

    /// Convert a flat index back to a point.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let cols = self.cols().max(1) as usize;
        Point::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Whether `p` is inside the grid and not a wall.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| !c.is_wall())
    }

    /// Flip the wall flag at `p`, dropping any weight first.
    ///
    /// Returns `false` (and changes nothing) when `p` is out of bounds or an
    /// endpoint.
    pub fn toggle_wall(&mut self, p: Point) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.is_protected() {
            return false;
        }
        cell.weighted = false;
        cell.wall = !cell.wall;
        true
    }

    /// Flip the weight flag at `p`.
    ///
    /// Returns `false` (and changes nothing) when `p` is out of bounds, an
    /// endpoint or a wall.
    pub fn toggle_weight(&mut self, p: Point) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.is_protected() || cell.wall {
            return false;
        }
        cell.weighted = !cell.weighted;
        true
    }

    /// Copy-on-write form of [`toggle_wall`](Self::toggle_wall).
    #[must_use]
    pub fn with_wall_toggled(&self, p: Point) -> Self {
        let mut next = self.clone();
        next.toggle_wall(p);
        next
    }

    /// Copy-on-write form of [`toggle_weight`](Self::toggle_weight).
    #[must_use]
    pub fn with_weight_toggled(&self, p: Point) -> Self {
        let mut next = self.clone();
        next.toggle_weight(p);
        next
    }

    /// Set or clear the wall at `p`. Setting a wall drops any weight.
    ///
    /// Endpoints are never walled; returns whether the cell was writable.
    pub fn set_wall(&mut self, p: Point, wall: bool) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        if cell.is_protected() {
            return false;
        }
        if wall {
            cell.weighted = false;
        }
        cell.wall = wall;
        true
    }

    /// Remove every wall and weight, keeping the endpoints.
    pub fn clear_walls_and_weights(&mut self) {
        for cell in &mut self.cells {
            cell.wall = false;
            cell.weighted = false;
        }
    }

    /// Count how many cells satisfy a predicate.
    pub fn count_fn(&self, mut f: impl FnMut(Point, Cell) -> bool) -> usize {
        self.iter().filter(|&(p, c)| f(p, c)).count()
    }

    /// Number of walls.
    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_wall()).count()
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter {
            grid: self,
            inner: self.bounds.iter(),
        }
    }

    /// Build a grid from a text layout, one line per row.
    ///
    /// `.` floor, `#` wall, `~` weight, `S` start, `F` finish, `B` bomb.
    /// Exactly one `S` and one `F` are required; at most one `B`.
    pub fn parse(layout: &str) -> Result<Self, ParseGridError> {
        let lines: Vec<&str> = layout.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        let cols = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != cols) {
            return Err(ParseGridError::InconsistentSize(layout.to_string()));
        }

        let mut start = None;
        let mut finish = None;
        let mut bomb = None;
        let mut marks = Vec::with_capacity(lines.len() * cols);
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let p = Point::new(row as i32, col as i32);
                let slot = match ch {
                    'S' => Some(&mut start),
                    'F' => Some(&mut finish),
                    'B' => Some(&mut bomb),
                    '.' | '#' | '~' => None,
                    _ => return Err(ParseGridError::InvalidChar { ch, pos: p }),
                };
                if let Some(slot) = slot {
                    if slot.replace(p).is_some() {
                        return Err(ParseGridError::DuplicateEndpoint { ch, pos: p });
                    }
                }
                marks.push((p, ch));
            }
        }

        let start = start.ok_or(ParseGridError::MissingEndpoint('S'))?;
        let finish = finish.ok_or(ParseGridError::MissingEndpoint('F'))?;
        let mut grid = Self::new(
            lines.len() as i32,
            cols as i32,
            Endpoints::new(start, finish).with_bomb(bomb),
        );
        for (p, ch) in marks {
            match ch {
                '#' => {
                    grid.set_wall(p, true);
                }
                '~' => {
                    grid.toggle_weight(p);
                }
                _ => {}
            }
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    /// Renders the layout in the format accepted by [`Grid::parse`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let cell = self.at(Point::new(row, col)).unwrap_or_default();
                let ch = match cell.role() {
                    Role::Start => 'S',
                    Role::Finish => 'F',
                    Role::Bomb => 'B',
                    Role::None if cell.is_wall() => '#',
                    Role::None if cell.is_weight() => '~',
                    Role::None => '.',
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GridIter
// ---------------------------------------------------------------------------

/// Iterator over `(Point, Cell)` pairs in a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    inner: crate::geom::RangeIter,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let p = self.inner.next()?;
        Some((p, self.grid.at(p).unwrap_or_default()))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Point, Cell);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// ParseGridError
// ---------------------------------------------------------------------------

/// Errors that can occur when parsing a text layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside the layout alphabet was found.
    InvalidChar { ch: char, pos: Point },
    /// `S` or `F` appears more than once, or `B` does.
    DuplicateEndpoint { ch: char, pos: Point },
    /// The layout has no `S` or no `F`.
    MissingEndpoint(char),
    /// A serialized grid whose bounds do not start at the origin.
    BadBounds(Range),
    /// A serialized grid whose cell count does not match its bounds.
    CellCount { expected: usize, found: usize },
}

impl fmt::Display for ParseGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent size:\n{s}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "grid contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "grid contains a second \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingEndpoint(ch) => write!(f, "grid has no \u{201c}{ch}\u{201d} cell"),
            Self::BadBounds(bounds) => write!(f, "grid bounds {bounds} do not start at (0, 0)"),
            Self::CellCount { expected, found } => {
                write!(f, "grid has {found} cells, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ParseGridError {}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let g = Grid::parse("S#.\n.~F").unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    #[test]
    fn grid_rejects_mismatched_cells() {
        let g = Grid::parse("S#.\n.~F").unwrap();
        let mut value = serde_json::to_value(&g).unwrap();
        value["cells"].as_array_mut().unwrap().pop();
        let err = serde_json::from_value::<Grid>(value).unwrap_err();
        assert!(err.to_string().contains("5 cells, expected 6"), "{err}");
    }

    #[test]
    fn grid_rejects_offset_bounds() {
        let g = Grid::parse("S.F").unwrap();
        let mut value = serde_json::to_value(&g).unwrap();
        value["bounds"]["min"]["col"] = serde_json::json!(1);
        value["bounds"]["max"]["col"] = serde_json::json!(4);
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }
}
