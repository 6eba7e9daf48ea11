use axum::{Json, extract::State};

use crate::{
    app_state::AppState,
    error::ScoutError,
    profiles::dtos::{ErrorResponse, ProfilesRequest, ProfilesResponse},
};

#[utoipa::path(
    post,
    path = "/profiles",
    tag = "profiles",
    request_body = ProfilesRequest,
    responses(
        (status = 200, description = "Profiles of the people mentioned in the text", body = ProfilesResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "An API key is not configured", body = ErrorResponse),
        (status = 502, description = "The LLM or search provider failed", body = ErrorResponse),
        (status = 504, description = "The LLM or search provider timed out", body = ErrorResponse)
    )
)]
pub async fn find_profiles(
    State(state): State<AppState>,
    Json(payload): Json<ProfilesRequest>,
) -> Result<Json<ProfilesResponse>, ScoutError> {
    payload.validate().map_err(ScoutError::InvalidInput)?;

    let profiles = state.scout.find_profiles(&payload.text).await?;

    Ok(Json(ProfilesResponse { profiles }))
}
