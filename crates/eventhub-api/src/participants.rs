use axum::{Json, extract::State, http::StatusCode};

use eventhub_types::api::{LoginRequest, ParticipantLoginResponse, ParticipantSignUpRequest};
use eventhub_types::models::{Event, ParticipantProfile};

use crate::error::{ApiError, ApiJson, ApiPath};
use crate::middleware::{AdminOnly, Member};
use crate::services::ServiceError;
use crate::state::{AppState, blocking};

pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ParticipantSignUpRequest>,
) -> Result<(StatusCode, Json<ParticipantProfile>), ApiError> {
    match blocking(&state, move |s| s.participants().sign_up(&req)).await {
        Ok(profile) => Ok((StatusCode::CREATED, Json(profile))),
        Err(ServiceError::Conflict(msg)) => Err(ApiError::new(StatusCode::CONFLICT, msg)),
        Err(e) => Err(e.into()),
    }
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<ParticipantLoginResponse>, ApiError> {
    let resp = blocking(&state, move |s| s.participants().login(&req)).await?;
    Ok(Json(resp))
}

pub async fn list_participants(
    State(state): State<AppState>,
    _admin: AdminOnly,
) -> Result<Json<Vec<ParticipantProfile>>, ApiError> {
    let list = blocking(&state, |s| s.participants().list()).await?;
    Ok(Json(list))
}

pub async fn get_participant(
    State(state): State<AppState>,
    caller: Member,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ParticipantProfile>, ApiError> {
    caller.ensure_self_or_admin(id)?;
    let profile = blocking(&state, move |s| s.participants().get(id)).await?;
    Ok(Json(profile))
}

pub async fn upcoming_events(
    State(state): State<AppState>,
    caller: Member,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Event>>, ApiError> {
    caller.ensure_self_or_admin(id)?;
    let events = blocking(&state, move |s| s.participants().upcoming_events(id)).await?;
    Ok(Json(events))
}

pub async fn previous_events(
    State(state): State<AppState>,
    caller: Member,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Vec<Event>>, ApiError> {
    caller.ensure_self_or_admin(id)?;
    let events = blocking(&state, move |s| s.participants().previous_events(id)).await?;
    Ok(Json(events))
}
