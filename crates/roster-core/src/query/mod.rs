//! Typed query construction over members and teams.
//!
//! Queries are built from typed paths (`member().age()`, `team().name()`)
//! composed with method chaining, validated before execution, and rendered
//! to SQL by the storage adapter. Values are always bound parameters;
//! identifiers only ever come from paths.
//!
//! ```
//! use roster_core::query::{MemberQuery, member, team};
//!
//! let m = member();
//! let t = team();
//! let query = MemberQuery::new()
//!     .join_team()
//!     .filter(t.name().eq("teamA"))
//!     .order_by(m.age().desc())
//!     .order_by(m.username().asc().nulls_last())
//!     .offset(1)
//!     .limit(2);
//! assert!(query.validate().is_ok());
//! ```
//!
//! # Structure
//!
//! - `path` - Columns and typed paths
//! - `value` - Bound values and their kinds
//! - `expr` - Aggregates, case expressions and select projections
//! - `predicate` - Boolean conditions
//! - `order` - Order specifiers with null handling
//! - `subquery` - Scalar and list subqueries over members
//! - `builder` - `MemberQuery`, `TupleQuery` and validation
//! - `results` - `Tuple` rows and paged `QueryResults`

mod builder;
mod expr;
mod order;
mod path;
mod predicate;
mod results;
mod subquery;
mod value;

pub use builder::{JoinKind, MemberQuery, QueryError, QueryShape, TupleQuery};
pub use expr::{Aggregate, AggregateFn, CaseBuilder, CaseExpr, CaseWhen, Expr, Projection, case};
pub use order::{Direction, NullOrdering, OrderSpecifier};
pub use path::{
    Column, Entity, MEMBER_ALIAS, MemberPaths, NumberPath, StringPath, TEAM_ALIAS, TeamPaths,
    member, team,
};
pub use predicate::{CompareOp, Operand, Predicate};
pub use results::{QueryResults, Tuple};
pub use subquery::SubQuery;
pub use value::{Value, ValueKind};
