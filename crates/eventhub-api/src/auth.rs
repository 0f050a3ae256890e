use axum::{Json, extract::State};

use eventhub_types::api::{AdminLoginResponse, AdminRegisterRequest, LoginRequest, MessageResponse};

use crate::error::{ApiError, ApiJson};
use crate::state::{AppState, blocking};

pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<AdminRegisterRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    blocking(&state, move |s| s.admins().register(&req)).await?;
    Ok(Json(MessageResponse::new("Admin registered successfully.")))
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<AdminLoginResponse>, ApiError> {
    let resp = blocking(&state, move |s| s.admins().login(&req)).await?;
    Ok(Json(resp))
}
