use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
};

use eventhub_types::api::{EventCreateRequest, EventPatch};
use eventhub_types::models::{Event, EventCapacity};

use crate::error::{ApiError, ApiJson, ApiPath};
use crate::middleware::{AdminOnly, Member};
use crate::state::{AppState, blocking};

pub async fn list_events(
    State(state): State<AppState>,
    _caller: Member,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = blocking(&state, |s| s.events().list()).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<AppState>,
    _caller: Member,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<Event>, ApiError> {
    let event = blocking(&state, move |s| s.events().get(id)).await?;
    Ok(Json(event))
}

/// Responds 201 with the new event and a `Location` pointing at it.
pub async fn create_event(
    State(state): State<AppState>,
    AdminOnly(claims): AdminOnly,
    ApiJson(req): ApiJson<EventCreateRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Event>), ApiError> {
    let event = blocking(&state, move |s| s.events().create(claims.sub, &req)).await?;

    let mut headers = HeaderMap::new();
    if let Ok(location) = HeaderValue::from_str(&format!("/api/Events/{}", event.event_id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<EventPatch>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| s.events().update(id, &patch)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminOnly,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| s.events().delete(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn capacity(
    State(state): State<AppState>,
    _caller: Member,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<EventCapacity>, ApiError> {
    let capacity = blocking(&state, move |s| s.events().capacity(id)).await?;
    Ok(Json(capacity))
}
