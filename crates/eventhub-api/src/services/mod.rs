//! Domain services. Each wraps the database with validation, uniqueness
//! checks and the capacity rule, and reports failures as [`ServiceError`].
//!
//! Services do not look at tokens or roles; the HTTP layer has already decided
//! the caller may invoke them.

mod admin;
mod event;
mod participant;
mod registration;
pub mod validation;

pub use admin::AdminService;
pub use event::EventService;
pub use participant::ParticipantService;
pub use registration::RegistrationService;

use thiserror::Error;
use tracing::{error, warn};

use eventhub_db::models::{AdminRow, EventRow, ParticipantRow, RegistrationRow};
use eventhub_types::Role;
use eventhub_types::models::{AdminProfile, Event, ParticipantProfile, Registration};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    CapacityExceeded(String),

    #[error("{0}")]
    Auth(String),

    /// Persistence or runtime failure. Carries only a client-safe message; the
    /// cause is logged where it is converted.
    #[error("{0}")]
    Unexpected(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Log a persistence failure and replace it with a generic message, e.g.
/// `unexpected("retrieving events")` yields
/// "An error occurred while retrieving events."
pub(crate) fn unexpected(action: &'static str) -> impl FnOnce(anyhow::Error) -> ServiceError {
    move |err| {
        error!("Error {}: {:#}", action, err);
        ServiceError::Unexpected(format!("An error occurred while {}.", action))
    }
}

fn role_or(raw: &str, fallback: Role) -> Role {
    raw.parse().unwrap_or_else(|_| {
        warn!("Unknown role label '{}' in store, treating as {}", raw, fallback);
        fallback
    })
}

pub(crate) fn admin_profile(row: AdminRow) -> AdminProfile {
    AdminProfile {
        admin_id: row.id,
        full_name: row.full_name,
        email: row.email,
        role: role_or(&row.role, Role::Admin),
        created_at: row.created_at,
    }
}

pub(crate) fn participant_profile(row: ParticipantRow) -> ParticipantProfile {
    ParticipantProfile {
        participant_id: row.id,
        full_name: row.full_name,
        email: row.email,
        phone_number: row.phone_number,
        role: role_or(&row.role, Role::User),
    }
}

pub(crate) fn event_from_row(row: EventRow) -> Event {
    Event {
        event_id: row.id,
        event_name: row.name,
        event_date: row.event_date,
        location: row.location,
        description: row.description,
        max_capacity: row.max_capacity,
        created_by_admin_id: row.created_by_admin_id,
    }
}

pub(crate) fn registration_from_row(row: RegistrationRow) -> Registration {
    Registration {
        registration_id: row.id,
        event_id: row.event_id,
        participant_id: row.participant_id,
        status: row.status,
        registered_at: row.registered_at,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Duration;
    use eventhub_db::Database;

    use crate::token::TokenIssuer;

    pub fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    pub fn tokens() -> TokenIssuer {
        TokenIssuer::new("service-test-secret", Duration::minutes(120))
    }
}
