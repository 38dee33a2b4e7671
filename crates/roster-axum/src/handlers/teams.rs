//! Team handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use roster_core::NewTeam;

use crate::dto::{NewTeamRequest, RenameTeamRequest, TeamDto};
use crate::error::HttpError;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<TeamDto>>, HttpError> {
    let teams = state.core.teams().list().await?;
    Ok(Json(teams.into_iter().map(TeamDto::from).collect()))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamDto>, HttpError> {
    state
        .core
        .teams()
        .get(id)
        .await?
        .map(|t| Json(t.into()))
        .ok_or_else(|| HttpError::NotFound(format!("Team with ID {id}")))
}

pub async fn add(
    State(state): State<AppState>,
    Json(req): Json<NewTeamRequest>,
) -> Result<(StatusCode, Json<TeamDto>), HttpError> {
    let team = state.core.teams().add(NewTeam::new(req.name)).await?;
    Ok((StatusCode::CREATED, Json(team.into())))
}

pub async fn rename(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<RenameTeamRequest>,
) -> Result<Json<TeamDto>, HttpError> {
    Ok(Json(state.core.teams().rename(id, &req.name).await?.into()))
}

/// Delete a team. Fails with 400 while members still reference it.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TeamDto>, HttpError> {
    Ok(Json(state.core.teams().remove(id).await?.into()))
}
