//! The [`Cell`] type: the static layout state of one grid position.

/// Cost of entering an ordinary cell.
pub const BASE_WEIGHT: i32 = 1;

/// Cost of entering a weighted cell.
pub const HEAVY_WEIGHT: i32 = 15;

/// The endpoint role a cell may carry. A cell holds at most one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    None,
    Start,
    Finish,
    Bomb,
}

/// Layout state of one grid position.
///
/// Walls and weights are mutually exclusive and never apply to a cell with a
/// [`Role`]; [`Grid`](crate::Grid) enforces this through its editing methods.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub(crate) role: Role,
    pub(crate) wall: bool,
    pub(crate) weighted: bool,
}

impl Cell {
    /// A plain cell carrying `role`.
    #[inline]
    pub const fn with_role(role: Role) -> Self {
        Self {
            role,
            wall: false,
            weighted: false,
        }
    }

    #[inline]
    pub const fn role(self) -> Role {
        self.role
    }

    #[inline]
    pub const fn is_start(self) -> bool {
        matches!(self.role, Role::Start)
    }

    #[inline]
    pub const fn is_finish(self) -> bool {
        matches!(self.role, Role::Finish)
    }

    #[inline]
    pub const fn is_bomb(self) -> bool {
        matches!(self.role, Role::Bomb)
    }

    /// Whether the cell is an endpoint that edits and mazes must leave alone.
    #[inline]
    pub const fn is_protected(self) -> bool {
        !matches!(self.role, Role::None)
    }

    #[inline]
    pub const fn is_wall(self) -> bool {
        self.wall
    }

    #[inline]
    pub const fn is_weight(self) -> bool {
        self.weighted
    }

    /// Cost of entering this cell.
    #[inline]
    pub const fn weight(self) -> i32 {
        if self.weighted { HEAVY_WEIGHT } else { BASE_WEIGHT }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_plain() {
        let c = Cell::default();
        assert_eq!(c.role(), Role::None);
        assert!(!c.is_wall());
        assert!(!c.is_weight());
        assert!(!c.is_protected());
        assert_eq!(c.weight(), BASE_WEIGHT);
    }

    #[test]
    fn roles_are_protected() {
        assert!(Cell::with_role(Role::Start).is_start());
        assert!(Cell::with_role(Role::Finish).is_finish());
        assert!(Cell::with_role(Role::Bomb).is_bomb());
        for role in [Role::Start, Role::Finish, Role::Bomb] {
            assert!(Cell::with_role(role).is_protected());
        }
    }

    #[test]
    fn weighted_cost() {
        let c = Cell {
            weighted: true,
            ..Cell::default()
        };
        assert_eq!(c.weight(), HEAVY_WEIGHT);
    }
}
