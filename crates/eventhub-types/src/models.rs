use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registration status that counts against an event's capacity.
pub const CONFIRMED: &str = "Confirmed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::User => "User",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role '{}'", self.0)
    }
}

impl std::error::Error for UnknownRole {}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Admin" => Ok(Self::Admin),
            "User" => Ok(Self::User),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// Public admin projection. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub admin_id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public participant projection. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantProfile {
    pub participant_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_id: i64,
    pub event_name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub max_capacity: i64,
    pub created_by_admin_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub registration_id: i64,
    pub event_id: i64,
    pub participant_id: i64,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

/// Snapshot of how full an event is.
///
/// `available_spots` goes negative when capacity was lowered below the
/// confirmed count; clamp before display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCapacity {
    pub event_id: i64,
    pub max_capacity: i64,
    pub current_registrations: i64,
    pub available_spots: i64,
    pub is_full: bool,
}

impl EventCapacity {
    pub fn new(event_id: i64, max_capacity: i64, current_registrations: i64) -> Self {
        Self {
            event_id,
            max_capacity,
            current_registrations,
            available_spots: max_capacity - current_registrations,
            is_full: current_registrations >= max_capacity,
        }
    }
}
