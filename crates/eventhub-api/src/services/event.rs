use tracing::info;

use eventhub_db::Database;
use eventhub_db::models::NewEvent;
use eventhub_types::api::{EventCreateRequest, EventPatch};
use eventhub_types::models::{Event, EventCapacity};

use super::validation::{self, MAX_EVENT_NAME_LEN, MAX_LOCATION_LEN};
use super::{ServiceError, ServiceResult, event_from_row, unexpected};

fn not_found() -> ServiceError {
    ServiceError::NotFound("Event not found".into())
}

pub struct EventService<'a> {
    db: &'a Database,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub fn list(&self) -> ServiceResult<Vec<Event>> {
        let rows = self.db.list_events().map_err(unexpected("retrieving events"))?;
        Ok(rows.into_iter().map(event_from_row).collect())
    }

    pub fn get(&self, id: i64) -> ServiceResult<Event> {
        self.db
            .get_event_by_id(id)
            .map_err(unexpected("retrieving the event"))?
            .map(event_from_row)
            .ok_or_else(not_found)
    }

    /// Create an event owned by `caller_admin_id` unless the body names
    /// another existing admin.
    pub fn create(&self, caller_admin_id: i64, req: &EventCreateRequest) -> ServiceResult<Event> {
        let name = validation::required_text("Event name", &req.event_name, MAX_EVENT_NAME_LEN)?;
        let location = validation::required_text("Location", &req.location, MAX_LOCATION_LEN)?;
        validation::capacity(req.max_capacity)?;
        let description = req
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let creator = req.created_by_admin_id.unwrap_or(caller_admin_id);
        let creator_exists = self
            .db
            .get_admin_by_id(creator)
            .map_err(unexpected("creating the event"))?
            .is_some();
        if !creator_exists {
            return Err(ServiceError::Validation(
                "Creating admin does not exist.".into(),
            ));
        }

        let id = self
            .db
            .create_event(&NewEvent {
                name: &name,
                event_date: req.event_date,
                location: &location,
                description,
                max_capacity: req.max_capacity,
                created_by_admin_id: creator,
            })
            .map_err(unexpected("creating the event"))?;

        info!(event_id = id, admin_id = creator, "Event created");
        self.get(id)
    }

    /// Apply the present fields of `patch`. Fields are validated the same way
    /// as on create.
    pub fn update(&self, id: i64, patch: &EventPatch) -> ServiceResult<()> {
        if id <= 0 || patch.is_empty() {
            return Err(ServiceError::Validation("Invalid update data".into()));
        }

        let mut clean = EventPatch {
            event_date: patch.event_date,
            max_capacity: patch.max_capacity,
            ..EventPatch::default()
        };
        if let Some(name) = &patch.event_name {
            clean.event_name =
                Some(validation::required_text("Event name", name, MAX_EVENT_NAME_LEN)?);
        }
        if let Some(location) = &patch.location {
            clean.location = Some(validation::required_text("Location", location, MAX_LOCATION_LEN)?);
        }
        if let Some(description) = &patch.description {
            // Blank is written as NULL by the store.
            clean.description = Some(description.trim().to_string());
        }
        if let Some(max_capacity) = patch.max_capacity {
            validation::capacity(max_capacity)?;
        }

        let found = self
            .db
            .update_event(id, &clean)
            .map_err(unexpected("updating the event"))?;
        if !found {
            return Err(not_found());
        }
        info!(event_id = id, "Event updated");
        Ok(())
    }

    pub fn delete(&self, id: i64) -> ServiceResult<()> {
        if id <= 0 {
            return Err(ServiceError::Validation("Invalid event ID".into()));
        }
        let found = self.db.delete_event(id).map_err(unexpected("deleting the event"))?;
        if !found {
            return Err(not_found());
        }
        info!(event_id = id, "Event deleted");
        Ok(())
    }

    pub fn capacity(&self, id: i64) -> ServiceResult<EventCapacity> {
        let event = self.get(id)?;
        let confirmed = self
            .db
            .count_confirmed(id)
            .map_err(unexpected("retrieving event capacity"))?;
        Ok(EventCapacity::new(id, event.max_capacity, confirmed))
    }
}
