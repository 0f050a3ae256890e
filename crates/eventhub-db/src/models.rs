//! Database row types. These map directly to SQLite rows and stay distinct
//! from the eventhub-types API models to keep the DB layer independent.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct AdminRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ParticipantRow {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    pub id: i64,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub description: Option<String>,
    pub max_capacity: i64,
    pub created_by_admin_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegistrationRow {
    pub id: i64,
    pub event_id: i64,
    pub participant_id: i64,
    pub status: String,
    pub registered_at: DateTime<Utc>,
}

/// Columns for inserting an event.
#[derive(Debug, Clone)]
pub struct NewEvent<'a> {
    pub name: &'a str,
    pub event_date: DateTime<Utc>,
    pub location: &'a str,
    pub description: Option<&'a str>,
    pub max_capacity: i64,
    pub created_by_admin_id: i64,
}
