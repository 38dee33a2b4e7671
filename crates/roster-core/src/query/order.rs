//! Order specifiers.

use super::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Asc,
    Desc,
}

/// Where null values sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NullOrdering {
    /// Store default (`SQLite` sorts nulls first ascending, last descending).
    #[default]
    Default,
    First,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderSpecifier {
    pub target: Expr,
    pub direction: Direction,
    pub nulls: NullOrdering,
}

impl OrderSpecifier {
    pub fn asc(target: impl Into<Expr>) -> Self {
        Self {
            target: target.into(),
            direction: Direction::Asc,
            nulls: NullOrdering::Default,
        }
    }

    pub fn desc(target: impl Into<Expr>) -> Self {
        Self {
            target: target.into(),
            direction: Direction::Desc,
            nulls: NullOrdering::Default,
        }
    }

    #[must_use]
    pub const fn nulls_first(mut self) -> Self {
        self.nulls = NullOrdering::First;
        self
    }

    #[must_use]
    pub const fn nulls_last(mut self) -> Self {
        self.nulls = NullOrdering::Last;
        self
    }
}
