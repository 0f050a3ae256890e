use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{AdminProfile, ParticipantProfile, Role};

// -- JWT Claims --

/// Bearer token claims. `sub` is the admin id or participant id, depending on `role`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub role: Role,
    pub jti: Uuid,
    pub exp: usize,
}

// -- Common --

/// Body of every failure response, and of the few success responses that
/// carry nothing but a confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// -- Auth --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Login body shared by admins and participants. The web client also sends the
/// role it picked on the login form; the server ignores it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantLoginResponse {
    pub token: String,
    pub participant: ParticipantProfile,
}

// -- Participants --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSignUpRequest {
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    pub password: String,
}

// -- Events --

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCreateRequest {
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub max_capacity: i64,
    /// Defaults to the calling admin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_admin_id: Option<i64>,
}

/// Sparse event update: only the fields that are present are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// A blank value clears the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none()
            && self.event_date.is_none()
            && self.location.is_none()
            && self.description.is_none()
            && self.max_capacity.is_none()
    }
}

// -- Registrations --

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreateRequest {
    /// Defaults to the caller when a participant registers themselves.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_id: Option<i64>,
    /// Defaults to `Confirmed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
