//! Columns and typed paths.
//!
//! A path is a column bound to a table alias. `NumberPath` and `StringPath`
//! only expose the operations that make sense for their column type, so a
//! comparison like `member().age().like("x%")` does not compile.

use std::fmt;

use super::expr::{Aggregate, AggregateFn};
use super::order::OrderSpecifier;
use super::predicate::{CompareOp, Operand, Predicate};
use super::subquery::SubQuery;
use super::value::{Value, ValueKind};

/// Alias of the root `member` table in every query.
pub const MEMBER_ALIAS: &str = "m";
/// Alias of the joined `team` table.
pub const TEAM_ALIAS: &str = "t";

/// Table a column belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Member,
    Team,
}

impl Entity {
    pub const fn table(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::Team => "team",
        }
    }
}

/// A column qualified by its table alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Column {
    pub entity: Entity,
    pub alias: &'static str,
    pub name: &'static str,
    pub kind: ValueKind,
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.name)
    }
}

/// Path to an integer column.
#[derive(Debug, Clone, Copy)]
pub struct NumberPath(Column);

/// Path to a text column.
#[derive(Debug, Clone, Copy)]
pub struct StringPath(Column);

impl From<NumberPath> for Column {
    fn from(path: NumberPath) -> Self {
        path.0
    }
}

impl From<StringPath> for Column {
    fn from(path: StringPath) -> Self {
        path.0
    }
}

fn compare(column: Column, op: CompareOp, right: impl Into<Value>) -> Predicate {
    Predicate::Compare {
        left: column.into(),
        op,
        right: Operand::Value(right.into()),
    }
}

fn compare_sub(column: Column, op: CompareOp, sub: SubQuery) -> Predicate {
    Predicate::Compare {
        left: column.into(),
        op,
        right: Operand::SubQuery(Box::new(sub)),
    }
}

const fn aggregate(func: AggregateFn, column: Column) -> Aggregate {
    Aggregate { func, column }
}

#[allow(clippy::should_implement_trait)]
impl NumberPath {
    pub const fn column(self) -> Column {
        self.0
    }

    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Eq, value)
    }

    pub fn ne(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Ne, value)
    }

    pub fn gt(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Gt, value)
    }

    /// Greater than or equal.
    pub fn goe(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Goe, value)
    }

    pub fn lt(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Lt, value)
    }

    /// Less than or equal.
    pub fn loe(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Loe, value)
    }

    /// Inclusive range.
    pub fn between(self, low: impl Into<Value>, high: impl Into<Value>) -> Predicate {
        Predicate::Between {
            column: self.0,
            low: low.into(),
            high: high.into(),
        }
    }

    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Predicate {
        Predicate::InList {
            column: self.0,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub const fn is_null(self) -> Predicate {
        Predicate::IsNull(self.0)
    }

    pub const fn is_not_null(self) -> Predicate {
        Predicate::IsNotNull(self.0)
    }

    pub fn eq_sub(self, sub: SubQuery) -> Predicate {
        compare_sub(self.0, CompareOp::Eq, sub)
    }

    pub fn gt_sub(self, sub: SubQuery) -> Predicate {
        compare_sub(self.0, CompareOp::Gt, sub)
    }

    pub fn goe_sub(self, sub: SubQuery) -> Predicate {
        compare_sub(self.0, CompareOp::Goe, sub)
    }

    pub fn lt_sub(self, sub: SubQuery) -> Predicate {
        compare_sub(self.0, CompareOp::Lt, sub)
    }

    pub fn loe_sub(self, sub: SubQuery) -> Predicate {
        compare_sub(self.0, CompareOp::Loe, sub)
    }

    pub fn in_sub(self, sub: SubQuery) -> Predicate {
        Predicate::InSubQuery {
            column: self.0,
            sub: Box::new(sub),
        }
    }

    pub fn asc(self) -> OrderSpecifier {
        OrderSpecifier::asc(self.0)
    }

    pub fn desc(self) -> OrderSpecifier {
        OrderSpecifier::desc(self.0)
    }

    pub const fn count(self) -> Aggregate {
        aggregate(AggregateFn::Count, self.0)
    }

    pub const fn sum(self) -> Aggregate {
        aggregate(AggregateFn::Sum, self.0)
    }

    pub const fn avg(self) -> Aggregate {
        aggregate(AggregateFn::Avg, self.0)
    }

    pub const fn max(self) -> Aggregate {
        aggregate(AggregateFn::Max, self.0)
    }

    pub const fn min(self) -> Aggregate {
        aggregate(AggregateFn::Min, self.0)
    }
}

#[allow(clippy::should_implement_trait)]
impl StringPath {
    pub const fn column(self) -> Column {
        self.0
    }

    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Eq, value)
    }

    pub fn ne(self, value: impl Into<Value>) -> Predicate {
        compare(self.0, CompareOp::Ne, value)
    }

    /// Raw `LIKE` pattern. `%` and `_` are wildcards, `\` escapes them.
    pub fn like(self, pattern: impl Into<String>) -> Predicate {
        Predicate::Like {
            column: self.0,
            pattern: pattern.into(),
        }
    }

    /// Substring match; wildcards in `needle` match literally.
    pub fn contains(self, needle: &str) -> Predicate {
        self.like(format!("%{}%", escape_like(needle)))
    }

    /// Prefix match; wildcards in `prefix` match literally.
    pub fn starts_with(self, prefix: &str) -> Predicate {
        self.like(format!("{}%", escape_like(prefix)))
    }

    pub fn in_list<V: Into<Value>>(self, values: impl IntoIterator<Item = V>) -> Predicate {
        Predicate::InList {
            column: self.0,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub const fn is_null(self) -> Predicate {
        Predicate::IsNull(self.0)
    }

    pub const fn is_not_null(self) -> Predicate {
        Predicate::IsNotNull(self.0)
    }

    pub fn asc(self) -> OrderSpecifier {
        OrderSpecifier::asc(self.0)
    }

    pub fn desc(self) -> OrderSpecifier {
        OrderSpecifier::desc(self.0)
    }

    pub const fn count(self) -> Aggregate {
        aggregate(AggregateFn::Count, self.0)
    }

    pub const fn max(self) -> Aggregate {
        aggregate(AggregateFn::Max, self.0)
    }

    pub const fn min(self) -> Aggregate {
        aggregate(AggregateFn::Min, self.0)
    }
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Paths into the `member` table under one alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemberPaths {
    alias: &'static str,
}

impl MemberPaths {
    /// Member paths under a custom alias, for subqueries.
    pub const fn aliased(alias: &'static str) -> Self {
        Self { alias }
    }

    pub const fn alias(self) -> &'static str {
        self.alias
    }

    const fn column(self, name: &'static str, kind: ValueKind) -> Column {
        Column {
            entity: Entity::Member,
            alias: self.alias,
            name,
            kind,
        }
    }

    pub const fn id(self) -> NumberPath {
        NumberPath(self.column("id", ValueKind::Integer))
    }

    pub const fn username(self) -> StringPath {
        StringPath(self.column("username", ValueKind::Text))
    }

    pub const fn age(self) -> NumberPath {
        NumberPath(self.column("age", ValueKind::Integer))
    }

    pub const fn team_id(self) -> NumberPath {
        NumberPath(self.column("team_id", ValueKind::Integer))
    }

    /// `count(id)` over the member rows.
    pub const fn count(self) -> Aggregate {
        self.id().count()
    }
}

/// Paths into the joined `team` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TeamPaths {
    alias: &'static str,
}

impl TeamPaths {
    const fn column(self, name: &'static str, kind: ValueKind) -> Column {
        Column {
            entity: Entity::Team,
            alias: self.alias,
            name,
            kind,
        }
    }

    pub const fn id(self) -> NumberPath {
        NumberPath(self.column("id", ValueKind::Integer))
    }

    pub const fn name(self) -> StringPath {
        StringPath(self.column("name", ValueKind::Text))
    }
}

/// Paths into the root member table (`m`).
pub const fn member() -> MemberPaths {
    MemberPaths::aliased(MEMBER_ALIAS)
}

/// Paths into the joined team table (`t`).
pub const fn team() -> TeamPaths {
    TeamPaths { alias: TEAM_ALIAS }
}
