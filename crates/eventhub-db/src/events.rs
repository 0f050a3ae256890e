use anyhow::Result;
use eventhub_types::api::EventPatch;
use rusqlite::types::ToSql;

use crate::models::{EventRow, NewEvent};
use crate::{Database, OptionalExt, timestamp};

const EVENT_COLUMNS: &str =
    "id, name, event_date, location, description, max_capacity, created_by_admin_id";

pub(crate) const EVENT_COLUMNS_QUALIFIED: &str =
    "e.id, e.name, e.event_date, e.location, e.description, e.max_capacity, e.created_by_admin_id";

impl Database {
    pub fn create_event(&self, event: &NewEvent<'_>) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO events (name, event_date, location, description, max_capacity, created_by_admin_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    event.name,
                    timestamp::format(&event.event_date),
                    event.location,
                    event.description,
                    event.max_capacity,
                    event.created_by_admin_id,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_event_by_id(&self, id: i64) -> Result<Option<EventRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                [id],
                map_event,
            )
            .optional()
        })
    }

    pub fn list_events(&self) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {EVENT_COLUMNS} FROM events ORDER BY event_date, id"
            ))?;
            let rows = stmt
                .query_map([], map_event)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Apply only the fields present in `patch`, one column assignment each,
    /// in a single statement. Returns false when no event has this id.
    pub fn update_event(&self, id: i64, patch: &EventPatch) -> Result<bool> {
        let mut columns: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = &patch.event_name {
            columns.push("name");
            values.push(Box::new(name.clone()));
        }
        if let Some(date) = &patch.event_date {
            columns.push("event_date");
            values.push(Box::new(timestamp::format(date)));
        }
        if let Some(location) = &patch.location {
            columns.push("location");
            values.push(Box::new(location.clone()));
        }
        if let Some(description) = &patch.description {
            // Blank clears the column, matching an omitted description on create.
            let trimmed = description.trim();
            columns.push("description");
            values.push(Box::new((!trimmed.is_empty()).then(|| trimmed.to_string())));
        }
        if let Some(max_capacity) = patch.max_capacity {
            columns.push("max_capacity");
            values.push(Box::new(max_capacity));
        }

        if columns.is_empty() {
            return self.with_conn(|conn| {
                Ok(conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM events WHERE id = ?1)",
                    [id],
                    |row| row.get(0),
                )?)
            });
        }

        let assignments: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect();
        let sql = format!(
            "UPDATE events SET {} WHERE id = ?{}",
            assignments.join(", "),
            values.len() + 1
        );
        values.push(Box::new(id));

        self.with_conn(|conn| {
            let params: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
            let changed = conn.execute(&sql, params.as_slice())?;
            Ok(changed > 0)
        })
    }

    /// Delete an event and, through the foreign key, its registrations.
    pub fn delete_event(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM events WHERE id = ?1", [id])? > 0))
    }
}

pub(crate) fn map_event(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        name: row.get(1)?,
        event_date: timestamp::column(row, 2)?,
        location: row.get(3)?,
        description: row.get(4)?,
        max_capacity: row.get(5)?,
        created_by_admin_id: row.get(6)?,
    })
}
