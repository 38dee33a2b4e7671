//! The member/team name endpoints.
//!
//! Both return the same body; they differ only in how many store round
//! trips they cost.

use axum::Json;
use axum::extract::State;

use crate::dto::MemberTeamDto;
use crate::error::HttpError;
use crate::state::AppState;

/// Shallow list, then one team lookup per distinct team.
pub async fn lazy(State(state): State<AppState>) -> Result<Json<Vec<MemberTeamDto>>, HttpError> {
    let views = state.core.members().all_members_lazy().await?;
    Ok(Json(views.into_iter().map(MemberTeamDto::from).collect()))
}

/// One fetch-join statement.
pub async fn fetch_join(
    State(state): State<AppState>,
) -> Result<Json<Vec<MemberTeamDto>>, HttpError> {
    let views = state.core.members().all_members_fetch_join().await?;
    Ok(Json(views.into_iter().map(MemberTeamDto::from).collect()))
}
