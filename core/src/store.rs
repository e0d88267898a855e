//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! Callers go through store methods — they never execute SQL directly.
//! The scoring engine never sees this layer at all; it consumes the
//! CustomerFacts the store aggregates.

use crate::error::CrmResult;

mod customer;
mod profile;

use rusqlite::Connection;

pub use customer::CustomerRecord;

pub struct CrmStore {
    conn: Connection,
}

impl CrmStore {
    pub fn open(path: &str) -> CrmResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (:memory: ignores it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> CrmResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> CrmResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_customers.sql"))?;
        self.conn
            .execute_batch(include_str!("../../migrations/002_profiles.sql"))?;
        log::debug!("store migrated");
        Ok(())
    }
}
