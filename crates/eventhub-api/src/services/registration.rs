use chrono::Utc;
use tracing::{info, warn};

use eventhub_db::{Database, RegisterOutcome};
use eventhub_types::models::Registration;

use super::validation::{self, MAX_STATUS_LEN};
use super::{ServiceError, ServiceResult, registration_from_row, unexpected};

pub struct RegistrationService<'a> {
    db: &'a Database,
}

impl<'a> RegistrationService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Enroll a participant. The existence, duplicate and capacity checks and
    /// the insert are one atomic step in the store.
    pub fn register_participant(
        &self,
        event_id: i64,
        participant_id: i64,
        status: &str,
    ) -> ServiceResult<Registration> {
        let status = validation::required_text("Status", status, MAX_STATUS_LEN)?;

        let outcome = self
            .db
            .register_with_capacity(event_id, participant_id, &status, Utc::now())
            .map_err(unexpected("registering for the event"))?;

        match outcome {
            RegisterOutcome::Registered(row) => {
                info!(
                    registration_id = row.id,
                    event_id, participant_id, "Participant registered"
                );
                Ok(registration_from_row(row))
            }
            RegisterOutcome::EventNotFound => Err(ServiceError::NotFound("Event not found".into())),
            RegisterOutcome::ParticipantNotFound => {
                Err(ServiceError::NotFound("Participant not found".into()))
            }
            RegisterOutcome::AlreadyRegistered => Err(ServiceError::Conflict(
                "Participant is already registered for this event".into(),
            )),
            RegisterOutcome::CapacityReached {
                max_capacity,
                confirmed,
            } => {
                warn!(event_id, max_capacity, confirmed, "Event is full");
                Err(ServiceError::CapacityExceeded(
                    "Event has reached maximum capacity".into(),
                ))
            }
        }
    }

    pub fn list_for_event(&self, event_id: i64) -> ServiceResult<Vec<Registration>> {
        let event = self
            .db
            .get_event_by_id(event_id)
            .map_err(unexpected("retrieving registrations"))?;
        if event.is_none() {
            return Err(ServiceError::NotFound("Event not found".into()));
        }
        let rows = self
            .db
            .list_registrations_for_event(event_id)
            .map_err(unexpected("retrieving registrations"))?;
        Ok(rows.into_iter().map(registration_from_row).collect())
    }

    pub fn delete_registration(&self, id: i64) -> ServiceResult<()> {
        if id <= 0 {
            return Err(ServiceError::Validation("Invalid registration ID".into()));
        }
        let found = self
            .db
            .delete_registration(id)
            .map_err(unexpected("deleting the registration"))?;
        if !found {
            return Err(ServiceError::NotFound("Registration not found".into()));
        }
        info!(registration_id = id, "Registration deleted");
        Ok(())
    }
}
