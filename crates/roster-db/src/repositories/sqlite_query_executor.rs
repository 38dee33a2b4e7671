//! `SQLite` implementation of the `MemberQueryExecutor` trait.

use async_trait::async_trait;
use sqlx::Row;
use tracing::debug;

use roster_core::query::{MemberQuery, Tuple, TupleQuery};
use roster_core::{Member, MemberQueryExecutor, RepositoryError};

use super::row_mappers::{row_to_member, row_to_member_with_team, row_to_tuple};
use super::sql;
use super::store::Store;

/// Validates typed queries, renders them and maps the rows back.
pub struct SqliteQueryExecutor {
    store: Store,
}

impl SqliteQueryExecutor {
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MemberQueryExecutor for SqliteQueryExecutor {
    async fn fetch(&self, query: &MemberQuery) -> Result<Vec<Member>, RepositoryError> {
        query.validate()?;
        let rendered = sql::member_select(query);
        debug!(target: "roster.query", sql = %rendered.sql, binds = rendered.binds.len(), "fetch");

        let mut conn = self.store.connection().await?;
        let rows = self
            .store
            .run("query.fetch", rendered.query().fetch_all(&mut *conn))
            .await?;

        if query.is_fetch_join() {
            rows.iter().map(row_to_member_with_team).collect()
        } else {
            rows.iter().map(row_to_member).collect()
        }
    }

    async fn fetch_count(&self, query: &MemberQuery) -> Result<u64, RepositoryError> {
        query.validate()?;
        let rendered = sql::member_count(query);
        debug!(target: "roster.query", sql = %rendered.sql, "count");

        let mut conn = self.store.connection().await?;
        let row = self
            .store
            .run("query.count", rendered.query().fetch_one(&mut *conn))
            .await?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        u64::try_from(count).map_err(|e| RepositoryError::Serialization(e.to_string()))
    }

    async fn fetch_tuples(&self, query: &TupleQuery) -> Result<Vec<Tuple>, RepositoryError> {
        query.validate()?;
        let rendered = sql::tuple_select(query);
        debug!(target: "roster.query", sql = %rendered.sql, binds = rendered.binds.len(), "tuples");

        let mut conn = self.store.connection().await?;
        let rows = self
            .store
            .run("query.tuples", rendered.query().fetch_all(&mut *conn))
            .await?;

        rows.iter()
            .map(|row| row_to_tuple(row, query.projections()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::TestDb;
    use roster_core::query::{
        CompareOp, MemberPaths, Predicate, Projection, QueryError, SubQuery, Value, ValueKind, case,
        member, team,
    };
    use roster_core::{MemberRepository, NewMember, TeamRef};

    fn names(members: &[Member]) -> Vec<Option<&str>> {
        members.iter().map(|m| m.username.as_deref()).collect()
    }

    #[tokio::test]
    async fn fetch_join_matches_shallow_list_without_extra_round_trips() {
        let db = TestDb::seeded().await.unwrap();
        let repo = db.member_repository();

        let shallow = repo.list(roster_core::FetchMode::Shallow).await.unwrap();
        let start = db.round_trips().count();
        let deep = repo.list_with_team().await.unwrap();
        assert_eq!(db.round_trips().since(start), 1);

        let shallow_ids: Vec<i64> = shallow.iter().map(|m| m.id).collect();
        let deep_ids: Vec<i64> = deep.iter().map(|m| m.id).collect();
        assert_eq!(shallow_ids, deep_ids);

        // Reading the loaded team costs nothing further.
        let before_read = db.round_trips().count();
        assert!(deep.iter().all(|m| m.team.loaded().is_some()));
        assert_eq!(db.round_trips().count(), before_read);
    }

    #[tokio::test]
    async fn sorts_by_age_desc_then_username_nulls_last() {
        let db = TestDb::new().await.unwrap();
        let repo = db.member_repository();
        repo.insert(&NewMember::anonymous(100)).await.unwrap();
        repo.insert(&NewMember::new("member5", 100)).await.unwrap();
        repo.insert(&NewMember::new("member6", 100)).await.unwrap();

        let m = member();
        let query = MemberQuery::new()
            .filter(m.age().eq(100))
            .order_by(m.age().desc())
            .order_by(m.username().asc().nulls_last());

        let result = db.query_executor().fetch(&query).await.unwrap();
        assert_eq!(names(&result), vec![Some("member5"), Some("member6"), None]);
    }

    #[tokio::test]
    async fn paging_returns_page_and_unpaged_total() {
        let db = TestDb::seeded().await.unwrap();
        let query = MemberQuery::new()
            .order_by(member().username().desc())
            .offset(1)
            .limit(2);

        let page = db.query_executor().fetch_page(&query).await.unwrap();
        assert_eq!(page.total, 4);
        assert_eq!((page.offset, page.limit), (1, Some(2)));
        assert_eq!(names(&page.results), vec![Some("member3"), Some("member2")]);
    }

    #[tokio::test]
    async fn aggregates_over_all_ages() {
        let db = TestDb::seeded().await.unwrap();
        let age = member().age();
        let query = TupleQuery::select([age.count(), age.sum(), age.avg(), age.max(), age.min()]);

        let rows = db.query_executor().fetch_tuples(&query).await.unwrap();
        let row = &rows[0];
        assert_eq!(row.get(age.count()), Some(&Value::Int(4)));
        assert_eq!(row.get(age.sum()), Some(&Value::Int(100)));
        assert_eq!(row.get(age.avg()).and_then(Value::as_f64), Some(25.0));
        assert_eq!(row.get(age.max()), Some(&Value::Int(40)));
        assert_eq!(row.get(age.min()), Some(&Value::Int(10)));
    }

    #[tokio::test]
    async fn join_filter_on_team_name() {
        let db = TestDb::seeded().await.unwrap();
        let query = MemberQuery::new()
            .join_team()
            .filter(team().name().eq("teamA"));

        let result = db.query_executor().fetch(&query).await.unwrap();
        assert_eq!(names(&result), vec![Some("member1"), Some("member2")]);
        assert!(result.iter().all(|m| matches!(m.team, TeamRef::Id(_))));
    }

    #[tokio::test]
    async fn fetch_join_loads_teams_inline() {
        let db = TestDb::seeded().await.unwrap();
        let query = MemberQuery::new()
            .fetch_join()
            .filter(member().username().eq("member3"));

        let found = db.query_executor().fetch_one(&query).await.unwrap().unwrap();
        assert_eq!(found.team.loaded().map(|t| t.name.as_str()), Some("teamB"));
    }

    #[tokio::test]
    async fn group_by_team_averages() {
        let db = TestDb::seeded().await.unwrap();
        let name = team().name();
        let avg = member().age().avg();
        let query = TupleQuery::select([Projection::from(name), avg.into()])
            .join_team()
            .group_by(name)
            .order_by(name.asc());

        let rows = db.query_executor().fetch_tuples(&query).await.unwrap();
        let averages: Vec<(Option<&str>, Option<f64>)> = rows
            .iter()
            .map(|r| {
                (
                    r.get(name).and_then(Value::as_str),
                    r.get(avg).and_then(Value::as_f64),
                )
            })
            .collect();
        assert_eq!(
            averages,
            vec![(Some("teamA"), Some(15.0)), (Some("teamB"), Some(35.0))]
        );
    }

    #[tokio::test]
    async fn having_filters_groups() {
        let db = TestDb::seeded().await.unwrap();
        let name = team().name();
        let avg = member().age().avg();
        let query = TupleQuery::select([Projection::from(name)])
            .join_team()
            .group_by(name)
            .having(avg.gt(20));

        let rows = db.query_executor().fetch_tuples(&query).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(name).and_then(Value::as_str), Some("teamB"));
    }

    #[tokio::test]
    async fn subqueries_compare_against_aggregates() {
        let db = TestDb::seeded().await.unwrap();
        let executor = db.query_executor();
        let ms = MemberPaths::aliased("ms");

        let oldest = executor
            .fetch(&MemberQuery::new().filter(member().age().eq_sub(SubQuery::of(ms, ms.age().max()))))
            .await
            .unwrap();
        assert_eq!(names(&oldest), vec![Some("member4")]);

        let above_average = executor
            .fetch(&MemberQuery::new().filter(member().age().goe_sub(SubQuery::of(ms, ms.age().avg()))))
            .await
            .unwrap();
        assert_eq!(names(&above_average), vec![Some("member3"), Some("member4")]);

        let over_ten = executor
            .fetch(&MemberQuery::new().filter(member().age().in_sub(
                SubQuery::of(ms, ms.age()).filter(ms.age().gt(10)),
            )))
            .await
            .unwrap();
        assert_eq!(
            names(&over_ten),
            vec![Some("member2"), Some("member3"), Some("member4")]
        );
    }

    #[tokio::test]
    async fn case_expressions_label_rows() {
        let db = TestDb::seeded().await.unwrap();
        let m = member();
        let band = case()
            .when(m.age().between(0, 20))
            .then("0~20")
            .when(m.age().between(21, 30))
            .then("21~30")
            .otherwise("etc");
        let query = TupleQuery::select([Projection::from(m.username()), band.clone().into()])
            .order_by(m.id().asc());

        let rows = db.query_executor().fetch_tuples(&query).await.unwrap();
        let bands: Vec<Option<&str>> = rows
            .iter()
            .map(|r| r.get(band.clone()).and_then(Value::as_str))
            .collect();
        assert_eq!(
            bands,
            vec![Some("0~20"), Some("0~20"), Some("21~30"), Some("etc")]
        );
    }

    #[tokio::test]
    async fn correlated_subquery_compares_within_each_team() {
        let db = TestDb::seeded().await.unwrap();
        let m = member();
        let ms = MemberPaths::aliased("ms");
        let team_average = SubQuery::of(ms, ms.age().avg())
            .filter(Predicate::columns(ms.team_id(), CompareOp::Eq, m.team_id()));

        let result = db
            .query_executor()
            .fetch(&MemberQuery::new().filter(m.age().gt_sub(team_average)))
            .await
            .unwrap();
        assert_eq!(names(&result), vec![Some("member2"), Some("member4")]);
    }

    #[tokio::test]
    async fn not_inverts_a_filter() {
        let db = TestDb::seeded().await.unwrap();
        let m = member();
        let query = MemberQuery::new().filter(m.age().between(15, 35).not());

        let result = db.query_executor().fetch(&query).await.unwrap();
        assert_eq!(names(&result), vec![Some("member1"), Some("member4")]);

        let joined = MemberQuery::new()
            .join_team()
            .filter(team().name().eq("teamA").or(m.age().eq(40)).not());
        let result = db.query_executor().fetch(&joined).await.unwrap();
        assert_eq!(names(&result), vec![Some("member3")]);
    }

    #[tokio::test]
    async fn case_without_else_yields_null_for_unmatched_rows() {
        let db = TestDb::seeded().await.unwrap();
        let m = member();
        let young = case().when(m.age().lt(25)).then("young").end();
        let query = TupleQuery::select([young.clone()]).order_by(m.id().asc());

        let rows = db.query_executor().fetch_tuples(&query).await.unwrap();
        let labels: Vec<Option<&Value>> = rows.iter().map(|r| r.get(young.clone())).collect();
        let young_label = Value::from("young");
        assert_eq!(
            labels,
            vec![
                Some(&young_label),
                Some(&young_label),
                Some(&Value::Null),
                Some(&Value::Null)
            ]
        );
    }

    #[tokio::test]
    async fn mixed_case_results_are_rejected_before_the_store() {
        let db = TestDb::seeded().await.unwrap();
        let start = db.round_trips().count();
        let mixed = case().when(member().age().eq(10)).then(1).otherwise("etc");

        let err = db
            .query_executor()
            .fetch_tuples(&TupleQuery::select([mixed]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidQuery(QueryError::MixedCaseKinds {
                first: ValueKind::Integer,
                other: ValueKind::Text,
            })
        ));
        assert_eq!(db.round_trips().since(start), 0);
    }

    #[tokio::test]
    async fn aggregate_ordering_of_members_is_rejected() {
        let db = TestDb::seeded().await.unwrap();
        let err = db
            .query_executor()
            .fetch(&MemberQuery::new().order_by(member().age().avg().desc()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidQuery(QueryError::AggregateInOrderBy(_))
        ));
    }

    #[tokio::test]
    async fn where_all_skips_absent_conditions() {
        let db = TestDb::seeded().await.unwrap();
        let m = member();
        let username: Option<&str> = Some("member1");
        let age: Option<i32> = None;

        let query = MemberQuery::new().where_all([
            username.map(|u| m.username().eq(u)),
            age.map(|a| m.age().eq(a)),
        ]);
        let result = db.query_executor().fetch(&query).await.unwrap();
        assert_eq!(names(&result), vec![Some("member1")]);
    }

    #[tokio::test]
    async fn fetch_one_rejects_ambiguous_results() {
        let db = TestDb::seeded().await.unwrap();
        let executor = db.query_executor();

        let err = executor
            .fetch_one(&MemberQuery::new().filter(member().age().gt(10)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NonUnique { found: 3, .. }));

        let first = executor
            .fetch_first(&MemberQuery::new().order_by(member().age().desc()))
            .await
            .unwrap();
        assert_eq!(first.and_then(|m| m.username).as_deref(), Some("member4"));

        let none = executor
            .fetch_one(&MemberQuery::new().filter(member().username().eq("nobody")))
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn left_join_keeps_members_without_team() {
        let db = TestDb::seeded().await.unwrap();
        db.member_repository()
            .insert(&NewMember::new("loner", 50))
            .await
            .unwrap();
        let executor = db.query_executor();

        let inner = executor.fetch_count(&MemberQuery::new().join_team()).await.unwrap();
        let left = executor
            .fetch_count(&MemberQuery::new().left_join_team())
            .await
            .unwrap();
        assert_eq!((inner, left), (4, 5));

        let loners = executor
            .fetch(
                &MemberQuery::new()
                    .left_join_team()
                    .fetch_join()
                    .filter(team().id().is_null()),
            )
            .await
            .unwrap();
        assert_eq!(names(&loners), vec![Some("loner")]);
        assert_eq!(loners[0].team, TeamRef::None);
    }

    #[tokio::test]
    async fn invalid_queries_never_reach_the_store() {
        let db = TestDb::seeded().await.unwrap();
        let start = db.round_trips().count();

        let err = db
            .query_executor()
            .fetch(&MemberQuery::new().filter(team().name().eq("teamA")))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidQuery(QueryError::MissingTeamJoin(_))
        ));
        assert_eq!(db.round_trips().since(start), 0);
    }

    #[tokio::test]
    async fn contains_matches_wildcards_literally() {
        let db = TestDb::new().await.unwrap();
        let repo = db.member_repository();
        repo.insert(&NewMember::new("50%_off", 1)).await.unwrap();
        repo.insert(&NewMember::new("500 off", 2)).await.unwrap();

        let query = MemberQuery::new().filter(member().username().contains("%_"));
        let result = db.query_executor().fetch(&query).await.unwrap();
        assert_eq!(names(&result), vec![Some("50%_off")]);

        let prefix = MemberQuery::new().filter(member().username().starts_with("50"));
        assert_eq!(db.query_executor().fetch_count(&prefix).await.unwrap(), 2);
    }
}
