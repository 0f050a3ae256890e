use chrono::Utc;
use tracing::info;

use eventhub_db::{Database, is_constraint_error};
use eventhub_types::Role;
use eventhub_types::api::{LoginRequest, ParticipantLoginResponse, ParticipantSignUpRequest};
use eventhub_types::models::{Event, ParticipantProfile};

use super::validation::{self, MAX_NAME_LEN, MAX_PHONE_LEN};
use super::{ServiceError, ServiceResult, event_from_row, participant_profile, unexpected};
use crate::password;
use crate::token::TokenIssuer;

const DUPLICATE_EMAIL: &str = "A participant with this email already exists.";
const BAD_CREDENTIALS: &str = "Invalid email or password.";

fn not_found() -> ServiceError {
    ServiceError::NotFound("Participant not found".into())
}

pub struct ParticipantService<'a> {
    db: &'a Database,
    tokens: &'a TokenIssuer,
}

impl<'a> ParticipantService<'a> {
    pub fn new(db: &'a Database, tokens: &'a TokenIssuer) -> Self {
        Self { db, tokens }
    }

    pub fn sign_up(&self, req: &ParticipantSignUpRequest) -> ServiceResult<ParticipantProfile> {
        let full_name = validation::required_text("Full name", &req.full_name, MAX_NAME_LEN)?;
        let email = validation::normalize_email(&req.email)?;
        let phone = validation::optional_text("Phone number", &req.phone_number, MAX_PHONE_LEN)?;
        validation::password(&req.password)?;

        if self
            .db
            .participant_email_exists(&email)
            .map_err(unexpected("signing up"))?
        {
            return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
        }

        let hash = password::hash_password(&req.password).map_err(unexpected("signing up"))?;
        let id = match self
            .db
            .create_participant(&full_name, &email, &phone, &hash, Role::User.as_str())
        {
            Ok(id) => id,
            Err(e) if is_constraint_error(&e) => {
                return Err(ServiceError::Conflict(DUPLICATE_EMAIL.into()));
            }
            Err(e) => return Err(unexpected("signing up")(e)),
        };

        info!(participant_id = id, "Participant signed up");
        self.get(id)
    }

    pub fn login(&self, req: &LoginRequest) -> ServiceResult<ParticipantLoginResponse> {
        let row = self
            .db
            .get_participant_by_email(req.email.trim())
            .map_err(unexpected("logging in"))?
            .ok_or_else(|| ServiceError::Auth(BAD_CREDENTIALS.into()))?;

        if !password::verify_password(&req.password, &row.password_hash)
            .map_err(unexpected("logging in"))?
        {
            return Err(ServiceError::Auth(BAD_CREDENTIALS.into()));
        }

        let token = self
            .tokens
            .issue(row.id, Role::User)
            .map_err(unexpected("issuing a token"))?;
        info!(participant_id = row.id, "Participant logged in");

        Ok(ParticipantLoginResponse {
            token,
            participant: participant_profile(row),
        })
    }

    pub fn list(&self) -> ServiceResult<Vec<ParticipantProfile>> {
        let rows = self
            .db
            .list_participants()
            .map_err(unexpected("retrieving participants"))?;
        Ok(rows.into_iter().map(participant_profile).collect())
    }

    pub fn get(&self, id: i64) -> ServiceResult<ParticipantProfile> {
        self.db
            .get_participant_by_id(id)
            .map_err(unexpected("retrieving the participant"))?
            .map(participant_profile)
            .ok_or_else(not_found)
    }

    /// Events the participant is registered for that have not started yet.
    pub fn upcoming_events(&self, id: i64) -> ServiceResult<Vec<Event>> {
        self.ensure_exists(id)?;
        let rows = self
            .db
            .upcoming_events_for_participant(id, Utc::now())
            .map_err(unexpected("retrieving upcoming events"))?;
        Ok(rows.into_iter().map(event_from_row).collect())
    }

    pub fn previous_events(&self, id: i64) -> ServiceResult<Vec<Event>> {
        self.ensure_exists(id)?;
        let rows = self
            .db
            .previous_events_for_participant(id, Utc::now())
            .map_err(unexpected("retrieving previous events"))?;
        Ok(rows.into_iter().map(event_from_row).collect())
    }

    fn ensure_exists(&self, id: i64) -> ServiceResult<()> {
        match self
            .db
            .get_participant_by_id(id)
            .map_err(unexpected("retrieving the participant"))?
        {
            Some(_) => Ok(()),
            None => Err(not_found()),
        }
    }
}
