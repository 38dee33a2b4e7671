//! Router tests against a seeded in-memory database.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app_for, get_json, seeded_app, send};
use roster_core::{MemberRepository, NewMember};
use roster_db::TestDb;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let (app, _) = seeded_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn both_all_members_endpoints_return_the_same_body() {
    let (app, _) = seeded_app().await;

    let (lazy_status, lazy) = send(&app, "GET", "/all-members", None).await;
    let (join_status, joined) = send(&app, "GET", "/all-members2", None).await;

    assert_eq!(lazy_status, StatusCode::OK);
    assert_eq!(join_status, StatusCode::OK);
    assert_eq!(lazy, joined);

    let body: serde_json::Value = serde_json::from_slice(&joined).unwrap();
    assert_eq!(
        body,
        json!([
            {"memberName": "member1", "teamName": "teamA"},
            {"memberName": "member2", "teamName": "teamA"},
            {"memberName": "member3", "teamName": "teamB"},
            {"memberName": "member4", "teamName": "teamB"},
        ])
    );
}

#[tokio::test]
async fn lazy_endpoint_costs_one_lookup_per_distinct_team() {
    let (app, round_trips) = seeded_app().await;

    let start = round_trips.count();
    send(&app, "GET", "/all-members", None).await;
    assert_eq!(round_trips.since(start), 3);

    let start = round_trips.count();
    send(&app, "GET", "/all-members2", None).await;
    assert_eq!(round_trips.since(start), 1);
}

#[tokio::test]
async fn team_less_members_project_to_null_team_name() {
    let db = TestDb::seeded().await.unwrap();
    db.member_repository()
        .insert(&NewMember::new("loner", 50))
        .await
        .unwrap();
    let (app, _) = app_for(db);

    for uri in ["/all-members", "/all-members2"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[4], json!({"memberName": "loner", "teamName": null}));
    }
}

#[tokio::test]
async fn empty_database_returns_empty_lists() {
    let (app, _) = app_for(TestDb::new().await.unwrap());
    for uri in ["/all-members", "/all-members2"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }
}

#[tokio::test]
async fn member_fetch_mode_controls_team_loading() {
    let (app, _) = seeded_app().await;

    let (_, shallow) = get_json(&app, "/api/members/1").await;
    assert_eq!(shallow["teamId"], 1);
    assert!(shallow.get("team").is_none());

    let (_, deep) = get_json(&app, "/api/members/1?fetch=deep").await;
    assert_eq!(deep["team"], json!({"id": 1, "name": "teamA"}));

    let (status, list) = get_json(&app, "/api/members?fetch=deep").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn missing_rows_are_404_with_json_body() {
    let (app, _) = seeded_app().await;

    let (status, body) = get_json(&app, "/api/members/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert!(body["error"].as_str().unwrap().contains("999"));

    let (status, _) = get_json(&app, "/api/members/by-username/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get_json(&app, "/api/teams/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ambiguous_username_is_409() {
    let db = TestDb::seeded().await.unwrap();
    db.member_repository()
        .insert(&NewMember::new("member1", 99))
        .await
        .unwrap();
    let (app, _) = app_for(db);

    let (status, body) = get_json(&app, "/api/members/by-username/member1").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);

    let (status, body) = get_json(&app, "/api/members/by-username/member2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["age"], 20);
}

#[tokio::test]
async fn creating_a_member_in_an_unknown_team_is_400() {
    let (app, _) = seeded_app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/members",
        Some(json!({"username": "member5", "age": 50, "teamId": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "POST",
        "/api/members",
        Some(json!({"username": "member5", "age": 50, "teamId": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(created["teamId"], 2);
}

#[tokio::test]
async fn negative_age_is_rejected() {
    let (app, _) = seeded_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/members",
        Some(json!({"username": "young", "age": -1})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn team_crud_and_referenced_delete() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, "POST", "/api/teams", Some(json!({"name": "teamC"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    let created: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/teams/{id}"),
        Some(json!({"name": "teamD"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let renamed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(renamed["name"], "teamD");

    let (status, _) = send(&app, "DELETE", &format!("/api/teams/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    // teamA still has members.
    let (status, _) = send(&app, "DELETE", "/api/teams/1", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, teams) = get_json(&app, "/api/teams").await;
    assert_eq!(teams.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn deleting_a_member_returns_it_and_then_404s() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(&app, "DELETE", "/api/members/4", None).await;
    assert_eq!(status, StatusCode::OK);
    let removed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(removed["username"], "member4");

    let (status, _) = send(&app, "DELETE", "/api/members/4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn stats_report_aggregates_and_team_averages() {
    let (app, _) = seeded_app().await;
    let (status, body) = get_json(&app, "/api/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 4);
    assert_eq!(body["sum"], 100);
    assert_eq!(body["average"], 25.0);
    assert_eq!(body["max"], 40);
    assert_eq!(body["min"], 10);
    assert_eq!(
        body["teams"],
        json!([
            {"teamName": "teamA", "averageAge": 15.0},
            {"teamName": "teamB", "averageAge": 35.0},
        ])
    );
}

#[tokio::test]
async fn put_replaces_a_member_and_validates_it() {
    let (app, _) = seeded_app().await;

    let (status, body) = send(
        &app,
        "PUT",
        "/api/members/1",
        Some(json!({"username": "member1", "age": 11, "teamId": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(updated["teamId"], 2);

    let (_, stored) = get_json(&app, "/api/members/1?fetch=deep").await;
    assert_eq!(stored["age"], 11);
    assert_eq!(stored["team"]["name"], "teamB");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/members/1",
        Some(json!({"username": "member1", "age": -3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/members/1",
        Some(json!({"username": " ", "age": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/members/999",
        Some(json!({"username": "ghost", "age": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/members/1",
        Some(json!({"username": "member1", "age": 11, "teamId": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_applies_only_the_given_filters() {
    let (app, _) = seeded_app().await;

    let (status, body) = get_json(&app, "/api/members/search?minAge=15&maxAge=35").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|m| m["username"].as_str())
        .collect();
    assert_eq!(names, vec!["member2", "member3"]);

    let (_, body) = get_json(&app, "/api/members/search?teamName=teamB&minAge=35").await;
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["username"], "member4");

    let (_, all) = get_json(&app, "/api/members/search").await;
    assert_eq!(all.as_array().map(Vec::len), Some(4));
}

#[tokio::test]
async fn page_reports_unpaged_total() {
    let (app, _) = seeded_app().await;

    let (status, body) = get_json(&app, "/api/members/page?offset=1&limit=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 4);
    assert_eq!(body["offset"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["results"][0]["username"], "member2");
    assert_eq!(body["results"][1]["username"], "member3");

    let (_, filtered) = get_json(&app, "/api/members/page?teamName=teamA&limit=1").await;
    assert_eq!(filtered["total"], 2);
    assert_eq!(filtered["results"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn failed_team_delete_changes_nothing() {
    let (app, _) = seeded_app().await;

    let (status, _) = send(&app, "DELETE", "/api/teams/2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, team) = get_json(&app, "/api/teams/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(team["name"], "teamB");

    // The session was released: later requests still get a connection.
    let (status, _) = get_json(&app, "/all-members").await;
    assert_eq!(status, StatusCode::OK);
}
