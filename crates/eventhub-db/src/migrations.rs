use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 =
        conn.query_row("SELECT COALESCE(MAX(version), 0) FROM schema_version", [], |r| r.get(0))?;

    if version < 1 {
        info!("Running migration v1 (initial schema)");
        conn.execute_batch(
            "
            BEGIN;

            CREATE TABLE admins (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name       TEXT NOT NULL,
                email           TEXT NOT NULL COLLATE NOCASE UNIQUE,
                password_hash   TEXT NOT NULL,
                role            TEXT NOT NULL DEFAULT 'Admin',
                created_at      TEXT NOT NULL
            );

            CREATE TABLE participants (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                full_name       TEXT NOT NULL,
                email           TEXT NOT NULL COLLATE NOCASE UNIQUE,
                phone_number    TEXT NOT NULL DEFAULT '',
                password_hash   TEXT NOT NULL,
                role            TEXT NOT NULL DEFAULT 'User'
            );

            CREATE TABLE events (
                id                  INTEGER PRIMARY KEY AUTOINCREMENT,
                name                TEXT NOT NULL,
                event_date          TEXT NOT NULL,
                location            TEXT NOT NULL,
                description         TEXT,
                max_capacity        INTEGER NOT NULL CHECK (max_capacity > 0),
                created_by_admin_id INTEGER NOT NULL REFERENCES admins(id) ON DELETE CASCADE
            );

            CREATE INDEX idx_events_admin ON events(created_by_admin_id);
            CREATE INDEX idx_events_date ON events(event_date);

            CREATE TABLE registrations (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                event_id        INTEGER NOT NULL REFERENCES events(id) ON DELETE CASCADE,
                participant_id  INTEGER NOT NULL REFERENCES participants(id) ON DELETE CASCADE,
                status          TEXT NOT NULL,
                registered_at   TEXT NOT NULL,
                UNIQUE(event_id, participant_id)
            );

            CREATE INDEX idx_registrations_event_status ON registrations(event_id, status);
            CREATE INDEX idx_registrations_participant ON registrations(participant_id);

            INSERT INTO schema_version (version) VALUES (1);

            COMMIT;
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
