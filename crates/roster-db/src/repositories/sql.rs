//! Rendering of the typed query AST to `SQLite` SQL.
//!
//! Identifiers come from typed paths only; every value is a `?` parameter
//! collected in text order.

use roster_core::query::{
    CaseExpr, CompareOp, Direction, Expr, JoinKind, MemberQuery, NullOrdering, Operand,
    OrderSpecifier, Predicate, Projection, QueryShape, SubQuery, TupleQuery, Value,
};
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

use super::row_mappers::{MEMBER_COLUMNS, MEMBER_TEAM_COLUMNS};

/// SQL text plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub binds: Vec<Value>,
}

impl Rendered {
    /// Prepare the statement with all parameters bound.
    pub fn query(&self) -> Query<'_, Sqlite, SqliteArguments<'_>> {
        self.binds
            .iter()
            .fold(sqlx::query(&self.sql), |query, value| match value {
                Value::Null => query.bind(None::<i64>),
                Value::Int(v) => query.bind(*v),
                Value::Real(v) => query.bind(*v),
                Value::Text(v) => query.bind(v.clone()),
            })
    }
}

/// `SELECT` of whole members; joined team columns are selected for fetch joins.
pub fn member_select(query: &MemberQuery) -> Rendered {
    let shape = query.shape();
    let mut w = SqlWriter::default();

    w.push("SELECT ");
    w.push(if query.is_fetch_join() {
        MEMBER_TEAM_COLUMNS
    } else {
        MEMBER_COLUMNS
    });
    w.from_clause(shape.join);
    w.filters(&shape.predicates);
    if shape.order_by.is_empty() {
        w.push(" ORDER BY m.id ASC");
    } else {
        w.order(&shape.order_by);
    }
    w.paging(shape);
    w.finish()
}

/// `SELECT count(*)` over the same rows, ignoring ordering and paging.
pub fn member_count(query: &MemberQuery) -> Rendered {
    let shape = query.shape();
    let mut w = SqlWriter::default();

    w.push("SELECT count(*)");
    w.from_clause(shape.join);
    w.filters(&shape.predicates);
    w.finish()
}

/// `SELECT` of projections with optional group by and having.
pub fn tuple_select(query: &TupleQuery) -> Rendered {
    let shape = query.shape();
    let mut w = SqlWriter::default();

    w.push("SELECT ");
    for (i, projection) in query.projections().iter().enumerate() {
        if i > 0 {
            w.push(", ");
        }
        w.projection(projection);
    }
    w.from_clause(shape.join);
    w.filters(&shape.predicates);
    if !shape.group_by.is_empty() {
        w.push(" GROUP BY ");
        let columns: Vec<String> = shape.group_by.iter().map(ToString::to_string).collect();
        w.push(&columns.join(", "));
    }
    if !shape.having.is_empty() {
        w.push(" HAVING ");
        w.conjunction(&shape.having);
    }
    w.order(&shape.order_by);
    w.paging(shape);
    w.finish()
}

#[derive(Default)]
struct SqlWriter {
    sql: String,
    binds: Vec<Value>,
}

impl SqlWriter {
    fn push(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    fn bind(&mut self, value: &Value) {
        self.sql.push('?');
        self.binds.push(value.clone());
    }

    fn expr(&mut self, expr: Expr) {
        self.push(&expr.to_string());
    }

    fn from_clause(&mut self, join: Option<JoinKind>) {
        self.push(" FROM member m");
        match join {
            Some(JoinKind::Inner) => self.push(" INNER JOIN team t ON t.id = m.team_id"),
            Some(JoinKind::Left) => self.push(" LEFT JOIN team t ON t.id = m.team_id"),
            None => {}
        }
    }

    fn filters(&mut self, predicates: &[Predicate]) {
        if !predicates.is_empty() {
            self.push(" WHERE ");
            self.conjunction(predicates);
        }
    }

    fn conjunction(&mut self, predicates: &[Predicate]) {
        for (i, predicate) in predicates.iter().enumerate() {
            if i > 0 {
                self.push(" AND ");
            }
            self.predicate(predicate);
        }
    }

    fn predicate(&mut self, predicate: &Predicate) {
        match predicate {
            Predicate::Compare { left, op, right } => self.compare(*left, *op, right),
            Predicate::Between { column, low, high } => {
                self.push(&column.to_string());
                self.push(" BETWEEN ");
                self.bind(low);
                self.push(" AND ");
                self.bind(high);
            }
            Predicate::InList { column, values } => {
                if values.is_empty() {
                    self.push("1 = 0");
                    return;
                }
                self.push(&column.to_string());
                self.push(" IN (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.bind(value);
                }
                self.push(")");
            }
            Predicate::InSubQuery { column, sub } => {
                self.push(&column.to_string());
                self.push(" IN ");
                self.subquery(sub);
            }
            Predicate::IsNull(column) => {
                self.push(&column.to_string());
                self.push(" IS NULL");
            }
            Predicate::IsNotNull(column) => {
                self.push(&column.to_string());
                self.push(" IS NOT NULL");
            }
            Predicate::Like { column, pattern } => {
                self.push(&column.to_string());
                self.push(" LIKE ");
                self.bind(&Value::Text(pattern.clone()));
                self.push(" ESCAPE '\\'");
            }
            Predicate::And(parts) => self.group(parts, " AND ", "1 = 1"),
            Predicate::Or(parts) => self.group(parts, " OR ", "1 = 0"),
            Predicate::Not(inner) => {
                self.push("NOT (");
                self.predicate(inner);
                self.push(")");
            }
        }
    }

    fn group(&mut self, parts: &[Predicate], separator: &str, empty: &str) {
        if parts.is_empty() {
            self.push(empty);
            return;
        }
        self.push("(");
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                self.push(separator);
            }
            self.predicate(part);
        }
        self.push(")");
    }

    fn compare(&mut self, left: Expr, op: CompareOp, right: &Operand) {
        self.expr(left);
        match (op, right) {
            (CompareOp::Eq, Operand::Value(Value::Null)) => self.push(" IS NULL"),
            (CompareOp::Ne, Operand::Value(Value::Null)) => self.push(" IS NOT NULL"),
            (_, Operand::Value(value)) => {
                self.push(" ");
                self.push(op.sql());
                self.push(" ");
                self.bind(value);
            }
            (_, Operand::Column(column)) => {
                self.push(" ");
                self.push(op.sql());
                self.push(" ");
                self.push(&column.to_string());
            }
            (_, Operand::SubQuery(sub)) => {
                self.push(" ");
                self.push(op.sql());
                self.push(" ");
                self.subquery(sub);
            }
        }
    }

    fn subquery(&mut self, sub: &SubQuery) {
        self.push("(SELECT ");
        self.expr(sub.select);
        self.push(" FROM member ");
        self.push(sub.from.alias());
        self.filters(&sub.predicates);
        self.push(")");
    }

    fn projection(&mut self, projection: &Projection) {
        match projection {
            Projection::Column(column) => self.push(&column.to_string()),
            Projection::Aggregate(aggregate) => self.push(&aggregate.to_string()),
            Projection::Case(case) => self.case(case),
        }
    }

    fn case(&mut self, case: &CaseExpr) {
        self.push("CASE");
        for (condition, value) in case.branches() {
            self.push(" WHEN ");
            self.predicate(condition);
            self.push(" THEN ");
            self.bind(value);
        }
        self.push(" ELSE ");
        self.bind(case.otherwise());
        self.push(" END");
    }

    fn order(&mut self, orders: &[OrderSpecifier]) {
        if orders.is_empty() {
            return;
        }
        self.push(" ORDER BY ");
        for (i, order) in orders.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(order.target);
            self.push(match order.direction {
                Direction::Asc => " ASC",
                Direction::Desc => " DESC",
            });
            self.push(match order.nulls {
                NullOrdering::Default => "",
                NullOrdering::First => " NULLS FIRST",
                NullOrdering::Last => " NULLS LAST",
            });
        }
    }

    fn paging(&mut self, shape: &QueryShape) {
        let as_param = |n: u64| Value::Int(i64::try_from(n).unwrap_or(i64::MAX));
        match (shape.limit, shape.offset) {
            (None, None) => {}
            (Some(limit), None) => {
                self.push(" LIMIT ");
                self.bind(&as_param(limit));
            }
            (limit, Some(offset)) => {
                self.push(" LIMIT ");
                self.bind(&limit.map_or(Value::Int(-1), as_param));
                self.push(" OFFSET ");
                self.bind(&as_param(offset));
            }
        }
    }

    fn finish(self) -> Rendered {
        Rendered {
            sql: self.sql,
            binds: self.binds,
        }
    }
}
