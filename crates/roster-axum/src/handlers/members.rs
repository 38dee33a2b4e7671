//! Member handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use crate::dto::{
    FetchQuery, MemberDto, MemberPageDto, MemberSearchQuery, NewMemberRequest, StatsDto,
    UpdateMemberRequest,
};
use crate::error::HttpError;
use crate::state::AppState;

/// List all members.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<Vec<MemberDto>>, HttpError> {
    let members = state.core.members().list(query.fetch).await?;
    Ok(Json(members.into_iter().map(MemberDto::from).collect()))
}

/// Get a single member by ID.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<FetchQuery>,
) -> Result<Json<MemberDto>, HttpError> {
    state
        .core
        .members()
        .get(id, query.fetch)
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| HttpError::NotFound(format!("Member with ID {id}")))
}

/// Look a member up by username.
pub async fn by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MemberDto>, HttpError> {
    state
        .core
        .members()
        .find_by_username(&username)
        .await?
        .map(|m| Json(m.into()))
        .ok_or_else(|| HttpError::NotFound(format!("Member with username '{username}'")))
}

pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<NewMemberRequest>,
) -> Result<(StatusCode, Json<MemberDto>), HttpError> {
    let member = state.core.members().add(req.into()).await?;
    Ok((StatusCode::CREATED, Json(member.into())))
}

/// Replace a member's username, age and team.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateMemberRequest>,
) -> Result<Json<MemberDto>, HttpError> {
    let member = req.into_member(id);
    state.core.members().update(&member).await?;
    Ok(Json(member.into()))
}

/// Members matching the optional filters.
pub async fn search(
    State(state): State<AppState>,
    Query(filters): Query<MemberSearchQuery>,
) -> Result<Json<Vec<MemberDto>>, HttpError> {
    let members = state.core.members().search(&filters.to_query()).await?;
    Ok(Json(members.into_iter().map(MemberDto::from).collect()))
}

/// One page of matching members with the unpaged total.
pub async fn page(
    State(state): State<AppState>,
    Query(filters): Query<MemberSearchQuery>,
) -> Result<Json<MemberPageDto>, HttpError> {
    let page = state.core.members().page(&filters.to_query()).await?;
    Ok(Json(page.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MemberDto>, HttpError> {
    Ok(Json(state.core.members().remove(id).await?.into()))
}

/// Age aggregates and per-team averages.
pub async fn stats(State(state): State<AppState>) -> Result<Json<StatsDto>, HttpError> {
    let members = state.core.members();
    let summary = members.age_summary().await?;
    let teams = members.average_age_by_team().await?;
    Ok(Json(StatsDto::new(summary, teams)))
}
