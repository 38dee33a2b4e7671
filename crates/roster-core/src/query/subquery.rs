//! Subqueries over the member table.
//!
//! A subquery selects one expression from `member` under its own alias and
//! can be compared against (`eq_sub`, `goe_sub`, ...) or used as an `IN`
//! list (`in_sub`).

use super::expr::Expr;
use super::path::MemberPaths;
use super::predicate::Predicate;

#[derive(Debug, Clone, PartialEq)]
pub struct SubQuery {
    pub from: MemberPaths,
    pub select: Expr,
    pub predicates: Vec<Predicate>,
}

impl SubQuery {
    /// `SELECT <select> FROM member <from.alias>`.
    ///
    /// ```
    /// use roster_core::query::{MemberPaths, MemberQuery, SubQuery, member};
    ///
    /// let ms = MemberPaths::aliased("ms");
    /// let oldest = MemberQuery::new()
    ///     .filter(member().age().eq_sub(SubQuery::of(ms, ms.age().max())));
    /// assert!(oldest.validate().is_ok());
    /// ```
    pub fn of(from: MemberPaths, select: impl Into<Expr>) -> Self {
        Self {
            from,
            select: select.into(),
            predicates: Vec::new(),
        }
    }

    #[must_use]
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}
