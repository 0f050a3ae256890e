use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::models::AdminRow;
use crate::{Database, OptionalExt, timestamp};

const ADMIN_COLUMNS: &str = "id, full_name, email, password_hash, role, created_at";

impl Database {
    /// Insert an admin and return its id. Fails on a duplicate email.
    pub fn create_admin(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role: &str,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO admins (full_name, email, password_hash, role, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                (full_name, email, password_hash, role, timestamp::format(&created_at)),
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn get_admin_by_id(&self, id: i64) -> Result<Option<AdminRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE id = ?1"),
                [id],
                map_admin,
            )
            .optional()
        })
    }

    /// Case-insensitive lookup (the column is `COLLATE NOCASE`).
    pub fn get_admin_by_email(&self, email: &str) -> Result<Option<AdminRow>> {
        self.with_conn(|conn| query_admin_by_email(conn, email))
    }

    pub fn admin_email_exists(&self, email: &str) -> Result<bool> {
        self.with_conn(|conn| {
            Ok(conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM admins WHERE email = ?1)",
                [email],
                |row| row.get(0),
            )?)
        })
    }

    pub fn list_admins(&self) -> Result<Vec<AdminRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {ADMIN_COLUMNS} FROM admins ORDER BY id"))?;
            let rows = stmt
                .query_map([], map_admin)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Delete an admin and, through the foreign key, every event it created.
    pub fn delete_admin(&self, id: i64) -> Result<bool> {
        self.with_conn(|conn| Ok(conn.execute("DELETE FROM admins WHERE id = ?1", [id])? > 0))
    }
}

fn query_admin_by_email(conn: &Connection, email: &str) -> Result<Option<AdminRow>> {
    let mut stmt = conn.prepare(&format!("SELECT {ADMIN_COLUMNS} FROM admins WHERE email = ?1"))?;
    stmt.query_row([email], map_admin).optional()
}

fn map_admin(row: &rusqlite::Row<'_>) -> rusqlite::Result<AdminRow> {
    Ok(AdminRow {
        id: row.get(0)?,
        full_name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        role: row.get(4)?,
        created_at: timestamp::column(row, 5)?,
    })
}
