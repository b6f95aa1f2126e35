//! Merger storage: create, load, list, and record status changes.

use jiff::Timestamp;
use jiff::civil::Date;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::info;
use uuid::Uuid;

use crate::model::{Merger, MergerStatus, StatusChange};

use super::{Result, Storage, StorageError};

impl Storage {
    /// Creates a merger and records its initial status as of the filing date.
    pub fn create_merger(&self, merger: &Merger) -> Result<()> {
        if merger_exists(&self.conn, merger.id)? {
            return Err(StorageError::MergerAlreadyExists(merger.id));
        }

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO merger (id, name, filing_date, status, has_phase_2, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                merger.id.to_string(),
                &merger.name,
                merger.filing_date.to_string(),
                merger.status.label(),
                merger.has_phase_2,
                merger.created_at.to_string(),
            ],
        )?;
        insert_history(&tx, merger.id, merger.status, merger.filing_date)?;
        tx.commit()?;

        info!(id = %merger.id, name = %merger.name, "merger created");
        Ok(())
    }

    /// Loads a single merger.
    pub fn load_merger(&self, id: Uuid) -> Result<Merger> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, filing_date, status, has_phase_2, created_at
                 FROM merger WHERE id = ?1",
                [id.to_string()],
                read_row,
            )
            .optional()?;
        row.ok_or(StorageError::MergerNotFound(id))?.parse()
    }

    /// Lists all mergers, oldest first.
    pub fn list_mergers(&self) -> Result<Vec<Merger>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, filing_date, status, has_phase_2, created_at FROM merger",
        )?;
        let rows = stmt.query_map([], read_row)?;

        let mut mergers = Vec::new();
        for row in rows {
            mergers.push(row?.parse()?);
        }
        mergers.sort_by_key(|m| m.created_at);
        Ok(mergers)
    }

    /// Records a status change and updates the merger's current status.
    ///
    /// Moving to Phase 2 sets `has_phase_2`; it is never cleared afterwards.
    /// Returns the updated merger.
    pub fn record_status(&self, id: Uuid, status: MergerStatus, on: Date) -> Result<Merger> {
        let tx = self.conn.unchecked_transaction()?;
        let rows = tx.execute(
            "UPDATE merger
             SET status = ?1, has_phase_2 = has_phase_2 OR ?2
             WHERE id = ?3",
            params![
                status.label(),
                status == MergerStatus::Phase2,
                id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StorageError::MergerNotFound(id));
        }
        insert_history(&tx, id, status, on)?;
        tx.commit()?;

        info!(%id, status = status.label(), %on, "status recorded");
        self.load_merger(id)
    }

    /// Loads a merger's status history, oldest first.
    pub fn load_history(&self, id: Uuid) -> Result<Vec<StatusChange>> {
        if !merger_exists(&self.conn, id)? {
            return Err(StorageError::MergerNotFound(id));
        }

        let mut stmt = self.conn.prepare(
            "SELECT status, changed_on FROM status_history
             WHERE merger_id = ?1
             ORDER BY changed_on, id",
        )?;
        let rows = stmt.query_map([id.to_string()], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut history = Vec::new();
        for row in rows {
            let (status, changed_on) = row?;
            history.push(StatusChange {
                status: parse_status(&status)?,
                changed_on: parse_date(&changed_on, "changed_on")?,
            });
        }
        Ok(history)
    }
}

/// Raw column values for one merger row.
struct MergerRow {
    id: String,
    name: String,
    filing_date: String,
    status: String,
    has_phase_2: bool,
    created_at: String,
}

impl MergerRow {
    fn parse(self) -> Result<Merger> {
        let id = self
            .id
            .parse::<Uuid>()
            .map_err(|e| StorageError::Corrupt(format!("invalid merger id: {e}")))?;
        let created_at = self
            .created_at
            .parse::<Timestamp>()
            .map_err(|e| StorageError::Corrupt(format!("invalid created_at: {e}")))?;

        Ok(Merger {
            id,
            name: self.name,
            filing_date: parse_date(&self.filing_date, "filing_date")?,
            status: parse_status(&self.status)?,
            has_phase_2: self.has_phase_2,
            created_at,
        })
    }
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MergerRow> {
    Ok(MergerRow {
        id: row.get(0)?,
        name: row.get(1)?,
        filing_date: row.get(2)?,
        status: row.get(3)?,
        has_phase_2: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn merger_exists(conn: &Connection, id: Uuid) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM merger WHERE id = ?1",
            [id.to_string()],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn insert_history(conn: &Connection, id: Uuid, status: MergerStatus, on: Date) -> Result<()> {
    conn.execute(
        "INSERT INTO status_history (merger_id, status, changed_on) VALUES (?1, ?2, ?3)",
        params![id.to_string(), status.label(), on.to_string()],
    )?;
    Ok(())
}

fn parse_status(label: &str) -> Result<MergerStatus> {
    MergerStatus::from_label(label)
        .ok_or_else(|| StorageError::Corrupt(format!("unknown merger status: {label}")))
}

fn parse_date(value: &str, column: &str) -> Result<Date> {
    value
        .parse::<Date>()
        .map_err(|e| StorageError::Corrupt(format!("invalid {column}: {e}")))
}
