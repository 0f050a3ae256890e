use anyhow::Result;
use chrono::{DateTime, Utc};
use eventhub_types::CONFIRMED;
use rusqlite::{Connection, TransactionBehavior};
use tracing::debug;

use crate::models::RegistrationRow;
use crate::{Database, OptionalExt, is_constraint_violation, timestamp};

const REGISTRATION_COLUMNS: &str = "id, event_id, participant_id, status, registered_at";

/// Result of a capacity-gated registration attempt. Checks run in this order
/// and the first failing one wins.
#[derive(Debug, Clone, PartialEq)]
pub enum RegisterOutcome {
    Registered(RegistrationRow),
    EventNotFound,
    ParticipantNotFound,
    AlreadyRegistered,
    CapacityReached { max_capacity: i64, confirmed: i64 },
}

impl Database {
    /// Register a participant for an event, enforcing one registration per
    /// pair and the confirmed-count ceiling.
    ///
    /// The lookups, the count and the insert share one `BEGIN IMMEDIATE`
    /// transaction, which holds the database write lock from before the count
    /// until commit. Concurrent attempts on the same event are therefore
    /// serialized and the confirmed count can never pass `max_capacity`.
    pub fn register_with_capacity(
        &self,
        event_id: i64,
        participant_id: i64,
        status: &str,
        registered_at: DateTime<Utc>,
    ) -> Result<RegisterOutcome> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            let max_capacity: Option<i64> = tx
                .query_row("SELECT max_capacity FROM events WHERE id = ?1", [event_id], |row| {
                    row.get(0)
                })
                .optional()?;
            let Some(max_capacity) = max_capacity else {
                return Ok(RegisterOutcome::EventNotFound);
            };

            let participant_exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM participants WHERE id = ?1)",
                [participant_id],
                |row| row.get(0),
            )?;
            if !participant_exists {
                return Ok(RegisterOutcome::ParticipantNotFound);
            }

            let already: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM registrations WHERE event_id = ?1 AND participant_id = ?2)",
                [event_id, participant_id],
                |row| row.get(0),
            )?;
            if already {
                return Ok(RegisterOutcome::AlreadyRegistered);
            }

            let confirmed = count_confirmed_in(&tx, event_id)?;
            if confirmed >= max_capacity {
                debug!(event_id, confirmed, max_capacity, "Registration rejected: event full");
                return Ok(RegisterOutcome::CapacityReached {
                    max_capacity,
                    confirmed,
                });
            }

            let registered_text = timestamp::format(&registered_at);
            let inserted = tx.execute(
                "INSERT INTO registrations (event_id, participant_id, status, registered_at)
                 VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![event_id, participant_id, status, registered_text],
            );
            match inserted {
                Ok(_) => {}
                Err(e) if is_constraint_violation(&e) => return Ok(RegisterOutcome::AlreadyRegistered),
                Err(e) => return Err(e.into()),
            }
            let id = tx.last_insert_rowid();
            tx.commit()?;

            Ok(RegisterOutcome::Registered(RegistrationRow {
                id,
                event_id,
                participant_id,
                status: status.to_string(),
                registered_at: timestamp::parse(&registered_text).unwrap_or(registered_at),
            }))
        })
    }

    pub fn get_registration_by_id(&self, id: i64) -> Result<Option<RegistrationRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE id = ?1"),
                [id],
                map_registration,
            )
            .optional()
        })
    }

    pub fn list_registrations_for_event(&self, event_id: i64) -> Result<Vec<RegistrationRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {REGISTRATION_COLUMNS} FROM registrations WHERE event_id = ?1 ORDER BY registered_at, id"
            ))?;
            let rows = stmt
                .query_map([event_id], map_registration)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Number of registrations with status `Confirmed` for the event. This is
    /// the same predicate the registration gate uses.
    pub fn count_confirmed(&self, event_id: i64) -> Result<i64> {
        self.with_conn(|conn| count_confirmed_in(conn, event_id))
    }

    pub fn delete_registration(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.execute("DELETE FROM registrations WHERE id = ?1", [id])? > 0)
        })
    }
}

fn count_confirmed_in(conn: &Connection, event_id: i64) -> Result<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM registrations WHERE event_id = ?1 AND status = ?2",
        rusqlite::params![event_id, CONFIRMED],
        |row| row.get(0),
    )?)
}

fn map_registration(row: &rusqlite::Row<'_>) -> rusqlite::Result<RegistrationRow> {
    Ok(RegistrationRow {
        id: row.get(0)?,
        event_id: row.get(1)?,
        participant_id: row.get(2)?,
        status: row.get(3)?,
        registered_at: timestamp::column(row, 4)?,
    })
}
