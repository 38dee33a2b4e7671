//! Aggregates, case expressions and select projections.

use std::fmt;

use super::order::OrderSpecifier;
use super::path::{Column, NumberPath, StringPath};
use super::predicate::{CompareOp, Operand, Predicate};
use super::value::{Value, ValueKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFn {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl AggregateFn {
    pub const fn sql_name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
        }
    }
}

/// An aggregate function applied to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Aggregate {
    pub func: AggregateFn,
    pub column: Column,
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.func.sql_name(), self.column)
    }
}

#[allow(clippy::should_implement_trait)]
impl Aggregate {
    /// Storage class of the aggregate result.
    pub const fn kind(self) -> ValueKind {
        match self.func {
            AggregateFn::Count => ValueKind::Integer,
            AggregateFn::Avg => ValueKind::Real,
            AggregateFn::Sum | AggregateFn::Max | AggregateFn::Min => self.column.kind,
        }
    }

    fn compare(self, op: CompareOp, value: impl Into<Value>) -> Predicate {
        Predicate::Compare {
            left: Expr::Aggregate(self),
            op,
            right: Operand::Value(value.into()),
        }
    }

    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Eq, value)
    }

    pub fn gt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Gt, value)
    }

    pub fn goe(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Goe, value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Lt, value)
    }

    pub fn loe(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Loe, value)
    }

    pub fn asc(self) -> OrderSpecifier {
        OrderSpecifier::asc(self)
    }

    pub fn desc(self) -> OrderSpecifier {
        OrderSpecifier::desc(self)
    }
}

/// Left-hand side of a comparison or target of an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Expr {
    Column(Column),
    Aggregate(Aggregate),
}

impl Expr {
    /// The column underneath, aggregated or not.
    pub const fn column(self) -> Column {
        match self {
            Self::Column(c) => c,
            Self::Aggregate(a) => a.column,
        }
    }

    pub const fn kind(self) -> ValueKind {
        match self {
            Self::Column(c) => c.kind,
            Self::Aggregate(a) => a.kind(),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(c) => fmt::Display::fmt(c, f),
            Self::Aggregate(a) => fmt::Display::fmt(a, f),
        }
    }
}

impl From<Column> for Expr {
    fn from(c: Column) -> Self {
        Self::Column(c)
    }
}

impl From<NumberPath> for Expr {
    fn from(p: NumberPath) -> Self {
        Self::Column(p.column())
    }
}

impl From<StringPath> for Expr {
    fn from(p: StringPath) -> Self {
        Self::Column(p.column())
    }
}

impl From<Aggregate> for Expr {
    fn from(a: Aggregate) -> Self {
        Self::Aggregate(a)
    }
}

/// `CASE WHEN ... THEN ... ELSE ... END`.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseExpr {
    branches: Vec<(Predicate, Value)>,
    otherwise: Value,
}

impl CaseExpr {
    pub fn branches(&self) -> &[(Predicate, Value)] {
        &self.branches
    }

    pub const fn otherwise(&self) -> &Value {
        &self.otherwise
    }

    /// Storage class of the first non-null result, text when all are null.
    pub fn kind(&self) -> ValueKind {
        self.branches
            .iter()
            .map(|(_, v)| v)
            .chain(std::iter::once(&self.otherwise))
            .find_map(Value::kind)
            .unwrap_or(ValueKind::Text)
    }
}

/// Start a case expression.
///
/// ```
/// use roster_core::query::{case, member};
///
/// let age_band = case()
///     .when(member().age().between(0, 20))
///     .then("0~20")
///     .when(member().age().between(21, 30))
///     .then("21~30")
///     .otherwise("etc");
/// assert_eq!(age_band.branches().len(), 2);
/// ```
pub const fn case() -> CaseBuilder {
    CaseBuilder {
        branches: Vec::new(),
    }
}

#[derive(Debug, Clone)]
pub struct CaseBuilder {
    branches: Vec<(Predicate, Value)>,
}

impl CaseBuilder {
    pub fn when(self, condition: Predicate) -> CaseWhen {
        CaseWhen {
            branches: self.branches,
            condition,
        }
    }

    pub fn otherwise(self, value: impl Into<Value>) -> CaseExpr {
        CaseExpr {
            branches: self.branches,
            otherwise: value.into(),
        }
    }

    /// Finish without an `ELSE`; unmatched rows yield null.
    pub fn end(self) -> CaseExpr {
        self.otherwise(Value::Null)
    }
}

/// A `WHEN` awaiting its `THEN`.
#[derive(Debug, Clone)]
pub struct CaseWhen {
    branches: Vec<(Predicate, Value)>,
    condition: Predicate,
}

impl CaseWhen {
    pub fn then(mut self, value: impl Into<Value>) -> CaseBuilder {
        self.branches.push((self.condition, value.into()));
        CaseBuilder {
            branches: self.branches,
        }
    }
}

/// One item of a select list.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Column(Column),
    Aggregate(Aggregate),
    Case(CaseExpr),
}

impl Projection {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Column(c) => c.kind,
            Self::Aggregate(a) => a.kind(),
            Self::Case(c) => c.kind(),
        }
    }
}

impl From<Column> for Projection {
    fn from(c: Column) -> Self {
        Self::Column(c)
    }
}

impl From<NumberPath> for Projection {
    fn from(p: NumberPath) -> Self {
        Self::Column(p.column())
    }
}

impl From<StringPath> for Projection {
    fn from(p: StringPath) -> Self {
        Self::Column(p.column())
    }
}

impl From<Aggregate> for Projection {
    fn from(a: Aggregate) -> Self {
        Self::Aggregate(a)
    }
}

impl From<CaseExpr> for Projection {
    fn from(c: CaseExpr) -> Self {
        Self::Case(c)
    }
}
