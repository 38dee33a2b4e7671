//! Boolean conditions.

use super::expr::Expr;
use super::path::Column;
use super::subquery::SubQuery;
use super::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Goe,
    Lt,
    Loe,
}

impl CompareOp {
    pub const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Gt => ">",
            Self::Goe => ">=",
            Self::Lt => "<",
            Self::Loe => "<=",
        }
    }
}

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    Column(Column),
    SubQuery(Box<SubQuery>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        left: Expr,
        op: CompareOp,
        right: Operand,
    },
    Between {
        column: Column,
        low: Value,
        high: Value,
    },
    InList {
        column: Column,
        values: Vec<Value>,
    },
    InSubQuery {
        column: Column,
        sub: Box<SubQuery>,
    },
    IsNull(Column),
    IsNotNull(Column),
    Like {
        column: Column,
        pattern: String,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

#[allow(clippy::should_implement_trait)]
impl Predicate {
    /// Column-to-column comparison, e.g. a correlated subquery condition.
    pub fn columns(left: impl Into<Column>, op: CompareOp, right: impl Into<Column>) -> Self {
        Self::Compare {
            left: Expr::Column(left.into()),
            op,
            right: Operand::Column(right.into()),
        }
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match self {
            Self::And(mut parts) => {
                parts.push(other);
                Self::And(parts)
            }
            first => Self::And(vec![first, other]),
        }
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match self {
            Self::Or(mut parts) => {
                parts.push(other);
                Self::Or(parts)
            }
            first => Self::Or(vec![first, other]),
        }
    }

    #[must_use]
    pub fn not(self) -> Self {
        Self::Not(Box::new(self))
    }

    /// AND of the present predicates; `None` entries are skipped.
    ///
    /// Returns `None` when nothing is present.
    pub fn all_of(parts: impl IntoIterator<Item = Option<Self>>) -> Option<Self> {
        let mut present: Vec<Self> = parts.into_iter().flatten().collect();
        match present.len() {
            0 => None,
            1 => present.pop(),
            _ => Some(Self::And(present)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::member;

    #[test]
    fn and_flattens_chains() {
        let m = member();
        let p = m.username().eq("member1").and(m.age().eq(10)).and(m.age().gt(5));
        let Predicate::And(parts) = p else {
            panic!("expected and");
        };
        assert_eq!(parts.len(), 3);
    }

    #[test]
    fn all_of_skips_missing_parts() {
        let m = member();
        assert!(Predicate::all_of([None, None]).is_none());

        let single = Predicate::all_of([Some(m.age().eq(10)), None]).unwrap();
        assert_eq!(single, m.age().eq(10));

        let both = Predicate::all_of([Some(m.age().eq(10)), Some(m.username().eq("a"))]);
        assert!(matches!(both, Some(Predicate::And(ref parts)) if parts.len() == 2));
    }
}
