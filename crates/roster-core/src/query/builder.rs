//! Query builders and validation.
//!
//! Both builders share one [`QueryShape`] (join, where, group by, having,
//! order, paging). [`MemberQuery`] selects whole members; [`TupleQuery`]
//! selects an explicit list of projections.

use thiserror::Error;

use super::expr::{CaseExpr, Expr, Projection};
use super::order::OrderSpecifier;
use super::path::{Column, Entity, MEMBER_ALIAS, TEAM_ALIAS};
use super::predicate::{Operand, Predicate};
use super::subquery::SubQuery;
use super::value::{Value, ValueKind};

/// Errors detected before a query reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("column {0} refers to the team but the query does not join it")]
    MissingTeamJoin(String),

    #[error("column {column} uses alias '{alias}' which is not in scope")]
    UnknownAlias { alias: String, column: String },

    #[error("invalid alias '{0}': use ASCII letters, digits and underscores")]
    InvalidAlias(String),

    #[error("aggregate {0} is not allowed in a where clause")]
    AggregateInWhere(String),

    #[error("aggregate {0} cannot order a member query")]
    AggregateInOrderBy(String),

    #[error("subquery alias '{0}' is already in scope")]
    AliasInScope(String),

    #[error("case expression mixes {first:?} and {other:?} results")]
    MixedCaseKinds { first: ValueKind, other: ValueKind },

    #[error("having requires a group by")]
    HavingWithoutGroupBy,

    #[error("a tuple query needs at least one projection")]
    EmptySelect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    /// Members without a team are excluded.
    Inner,
    /// Members without a team are kept.
    Left,
}

/// Clauses shared by every query over the member table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryShape {
    pub join: Option<JoinKind>,
    pub predicates: Vec<Predicate>,
    pub group_by: Vec<Column>,
    pub having: Vec<Predicate>,
    pub order_by: Vec<OrderSpecifier>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
}

macro_rules! shape_methods {
    () => {
        /// Inner join the member's team under alias `t`.
        #[must_use]
        pub fn join_team(mut self) -> Self {
            self.shape.join = Some(JoinKind::Inner);
            self
        }

        /// Left join the member's team under alias `t`.
        #[must_use]
        pub fn left_join_team(mut self) -> Self {
            self.shape.join = Some(JoinKind::Left);
            self
        }

        /// Add a where condition; conditions are ANDed.
        #[must_use]
        pub fn filter(mut self, predicate: Predicate) -> Self {
            self.shape.predicates.push(predicate);
            self
        }

        /// Add every present condition, skipping `None`.
        #[must_use]
        pub fn where_all(mut self, predicates: impl IntoIterator<Item = Option<Predicate>>) -> Self {
            self.shape.predicates.extend(predicates.into_iter().flatten());
            self
        }

        /// Append an ordering; earlier orderings take precedence.
        #[must_use]
        pub fn order_by(mut self, order: OrderSpecifier) -> Self {
            self.shape.order_by.push(order);
            self
        }

        #[must_use]
        pub const fn offset(mut self, offset: u64) -> Self {
            self.shape.offset = Some(offset);
            self
        }

        #[must_use]
        pub const fn limit(mut self, limit: u64) -> Self {
            self.shape.limit = Some(limit);
            self
        }

        pub const fn shape(&self) -> &QueryShape {
            &self.shape
        }
    };
}

/// Select whole members, optionally with their team loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberQuery {
    shape: QueryShape,
    fetch_join: bool,
}

impl MemberQuery {
    /// `SELECT m FROM member m`.
    pub fn new() -> Self {
        Self::default()
    }

    shape_methods!();

    /// Load the team into each member from the same statement.
    ///
    /// Inner joins the team unless a join was already chosen.
    #[must_use]
    pub fn fetch_join(mut self) -> Self {
        self.shape.join.get_or_insert(JoinKind::Inner);
        self.fetch_join = true;
        self
    }

    pub const fn is_fetch_join(&self) -> bool {
        self.fetch_join
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if let Some(a) = self.shape.order_by.iter().find_map(|o| match o.target {
            Expr::Aggregate(a) => Some(a),
            Expr::Column(_) => None,
        }) {
            return Err(QueryError::AggregateInOrderBy(a.to_string()));
        }
        validate_shape(&self.shape)
    }
}

/// Select a list of columns, aggregates and case expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleQuery {
    select: Vec<Projection>,
    shape: QueryShape,
}

impl TupleQuery {
    /// `SELECT <items> FROM member m`.
    pub fn select<P: Into<Projection>>(items: impl IntoIterator<Item = P>) -> Self {
        Self {
            select: items.into_iter().map(Into::into).collect(),
            shape: QueryShape::default(),
        }
    }

    shape_methods!();

    #[must_use]
    pub fn group_by(mut self, column: impl Into<Column>) -> Self {
        self.shape.group_by.push(column.into());
        self
    }

    /// Add a having condition; aggregates are allowed here.
    #[must_use]
    pub fn having(mut self, predicate: Predicate) -> Self {
        self.shape.having.push(predicate);
        self
    }

    pub fn projections(&self) -> &[Projection] {
        &self.select
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.select.is_empty() {
            return Err(QueryError::EmptySelect);
        }
        let scope = Scope::outer(&self.shape);
        for item in &self.select {
            match item {
                Projection::Column(c) => scope.check_column(*c)?,
                Projection::Aggregate(a) => scope.check_column(a.column)?,
                Projection::Case(case) => check_case(&scope, case)?,
            }
        }
        validate_shape(&self.shape)
    }
}

/// Which aliases a column may use at a given nesting level.
struct Scope {
    member_aliases: Vec<&'static str>,
    team_joined: bool,
}

impl Scope {
    fn outer(shape: &QueryShape) -> Self {
        Self {
            member_aliases: vec![MEMBER_ALIAS],
            team_joined: shape.join.is_some(),
        }
    }

    fn check_column(&self, column: Column) -> Result<(), QueryError> {
        match column.entity {
            Entity::Member => {
                if self.member_aliases.contains(&column.alias) {
                    Ok(())
                } else {
                    Err(QueryError::UnknownAlias {
                        alias: column.alias.to_string(),
                        column: column.to_string(),
                    })
                }
            }
            Entity::Team => {
                if !self.team_joined {
                    Err(QueryError::MissingTeamJoin(column.to_string()))
                } else if column.alias == TEAM_ALIAS {
                    Ok(())
                } else {
                    Err(QueryError::UnknownAlias {
                        alias: column.alias.to_string(),
                        column: column.to_string(),
                    })
                }
            }
        }
    }

    fn check_expr(&self, expr: Expr, aggregates_allowed: bool) -> Result<(), QueryError> {
        if let Expr::Aggregate(a) = expr {
            if !aggregates_allowed {
                return Err(QueryError::AggregateInWhere(a.to_string()));
            }
        }
        self.check_column(expr.column())
    }

    fn check_predicate(&self, predicate: &Predicate, aggregates_allowed: bool) -> Result<(), QueryError> {
        match predicate {
            Predicate::Compare { left, right, .. } => {
                self.check_expr(*left, aggregates_allowed)?;
                match right {
                    Operand::Value(_) => Ok(()),
                    Operand::Column(c) => self.check_column(*c),
                    Operand::SubQuery(sub) => self.check_subquery(sub),
                }
            }
            Predicate::Between { column, .. }
            | Predicate::InList { column, .. }
            | Predicate::IsNull(column)
            | Predicate::IsNotNull(column)
            | Predicate::Like { column, .. } => self.check_column(*column),
            Predicate::InSubQuery { column, sub } => {
                self.check_column(*column)?;
                self.check_subquery(sub)
            }
            Predicate::And(parts) | Predicate::Or(parts) => parts
                .iter()
                .try_for_each(|p| self.check_predicate(p, aggregates_allowed)),
            Predicate::Not(inner) => self.check_predicate(inner, aggregates_allowed),
        }
    }

    fn check_subquery(&self, sub: &SubQuery) -> Result<(), QueryError> {
        let alias = sub.from.alias();
        if !is_valid_alias(alias) {
            return Err(QueryError::InvalidAlias(alias.to_string()));
        }
        if alias == TEAM_ALIAS || self.member_aliases.contains(&alias) {
            return Err(QueryError::AliasInScope(alias.to_string()));
        }
        let mut member_aliases = self.member_aliases.clone();
        member_aliases.push(alias);
        let inner = Self {
            member_aliases,
            team_joined: self.team_joined,
        };
        inner.check_expr(sub.select, true)?;
        sub.predicates
            .iter()
            .try_for_each(|p| inner.check_predicate(p, false))
    }
}

fn check_case(scope: &Scope, case: &CaseExpr) -> Result<(), QueryError> {
    case.branches()
        .iter()
        .try_for_each(|(condition, _)| scope.check_predicate(condition, false))?;

    // Null results fit any kind; the rest must agree so the column decodes.
    let mut kinds = case
        .branches()
        .iter()
        .map(|(_, v)| v)
        .chain(std::iter::once(case.otherwise()))
        .filter_map(Value::kind);
    if let Some(first) = kinds.next() {
        if let Some(other) = kinds.find(|k| *k != first) {
            return Err(QueryError::MixedCaseKinds { first, other });
        }
    }
    Ok(())
}

fn validate_shape(shape: &QueryShape) -> Result<(), QueryError> {
    let scope = Scope::outer(shape);

    for predicate in &shape.predicates {
        scope.check_predicate(predicate, false)?;
    }
    for column in &shape.group_by {
        scope.check_column(*column)?;
    }
    if !shape.having.is_empty() && shape.group_by.is_empty() {
        return Err(QueryError::HavingWithoutGroupBy);
    }
    for predicate in &shape.having {
        scope.check_predicate(predicate, true)?;
    }
    for order in &shape.order_by {
        scope.check_expr(order.target, true)?;
    }
    Ok(())
}

fn is_valid_alias(alias: &str) -> bool {
    let mut chars = alias.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
