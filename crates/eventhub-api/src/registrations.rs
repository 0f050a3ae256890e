use axum::{Json, extract::State, http::StatusCode};

use eventhub_types::CONFIRMED;
use eventhub_types::api::RegistrationCreateRequest;
use eventhub_types::models::Registration;

use crate::error::{ApiError, ApiJson, ApiPath};
use crate::middleware::{AdminOnly, Member};
use crate::services::ServiceError;
use crate::state::{AppState, blocking};

/// Register a participant for an event. A participant registers themselves
/// when the body omits `participantId`. Every domain failure here, missing
/// event or participant included, is a 400.
pub async fn register(
    State(state): State<AppState>,
    caller: Member,
    ApiPath(event_id): ApiPath<i64>,
    ApiJson(req): ApiJson<RegistrationCreateRequest>,
) -> Result<(StatusCode, Json<Registration>), ApiError> {
    let participant_id = match req.participant_id {
        Some(id) => id,
        None if caller.is_admin() => {
            return Err(ApiError::bad_request("participantId is required."));
        }
        None => caller.0.sub,
    };
    caller.ensure_self_or_admin(participant_id)?;

    let status = req.status.unwrap_or_else(|| CONFIRMED.to_string());
    let result = blocking(&state, move |s| {
        s.registrations()
            .register_participant(event_id, participant_id, &status)
    })
    .await;

    match result {
        Ok(registration) => Ok((StatusCode::CREATED, Json(registration))),
        Err(ServiceError::NotFound(msg)) => Err(ApiError::bad_request(msg)),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_for_event(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(event_id): ApiPath<i64>,
) -> Result<Json<Vec<Registration>>, ApiError> {
    let list = blocking(&state, move |s| s.registrations().list_for_event(event_id)).await?;
    Ok(Json(list))
}

pub async fn delete_registration(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| s.registrations().delete_registration(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
