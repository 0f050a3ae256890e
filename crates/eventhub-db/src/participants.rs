use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::models::{EventRow, ParticipantRow};
use crate::{Database, OptionalExt, events, timestamp};

const PARTICIPANT_COLUMNS: &str = "id, full_name, email, phone_number, password_hash, role";

impl Database {
    /// Insert a participant and return its id. Fails on a duplicate email.
    pub fn create_participant(
        &self,
        full_name: &str,
        email: &str,
        phone_number: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO participants (full_name, email, phone_number, password_hash, role)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (full_name, email, phone_number, password_hash, role),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_participant_by_id(&self, id: i64) -> Result<Option<ParticipantRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE id = ?1"),
                [id],
                map_participant,
            )
            .optional()
        })
    }

    /// Case-insensitive lookup (the column is `COLLATE NOCASE`).
    pub fn get_participant_by_email(&self, email: &str) -> Result<Option<ParticipantRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {PARTICIPANT_COLUMNS} FROM participants WHERE email = ?1"),
                [email],
                map_participant,
            )
            .optional()
        })
    }

    pub fn participant_email_exists(&self, email: &str) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM participants WHERE email = ?1)",
                [email],
                |row| row.get(0),
            )?)
        })
    }

    pub fn list_participants(&self) -> Result<Vec<ParticipantRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PARTICIPANT_COLUMNS} FROM participants ORDER BY id"
            ))?;
            let rows = stmt
                .query_map([], map_participant)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Delete a participant and, through the foreign key, its registrations.
    pub fn delete_participant(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM participants WHERE id = ?1", [id])? > 0)
        })
    }

    /// Events the participant is registered for that start at or after `now`.
    pub fn upcoming_events_for_participant(
        &self,
        participant_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventRow>> {
        self.events_for_participant(participant_id, now, ">=")
    }

    /// Events the participant is registered for that started before `now`.
    pub fn previous_events_for_participant(
        &self,
        participant_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<EventRow>> {
        self.events_for_participant(participant_id, now, "<")
    }

    fn events_for_participant(
        &self,
        participant_id: i64,
        now: DateTime<Utc>,
        cmp: &'static str,
    ) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "SELECT {cols}
                 FROM registrations r
                 JOIN events e ON e.id = r.event_id
                 WHERE r.participant_id = ?1 AND e.event_date {cmp} ?2
                 ORDER BY e.event_date, e.id",
                cols = events::EVENT_COLUMNS_QUALIFIED,
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map((participant_id, timestamp::format(&now)), events::map_event)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

fn map_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<ParticipantRow> {
    Ok(ParticipantRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        phone_number: row.get(3)?,
        password_hash: row.get(4)?,
        role: row.get(5)?,
    })
}
