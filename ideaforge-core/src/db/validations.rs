use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ideas::{idea_exists, set_idea_status};
use super::{mapper, Database};
use crate::models::*;

const VALIDATION_COLUMNS: &str = "id, idea_id, validation_data, score, created_at";

fn validation_from_row(row: &Row<'_>) -> rusqlite::Result<Validation> {
    Ok(Validation {
        id: row.get(0)?,
        idea_id: row.get(1)?,
        validation_data: mapper::decode_object(row.get(2)?),
        score: row.get(3)?,
        created_at: mapper::timestamp_column(row, 4)?,
    })
}

fn fetch_validation(conn: &Connection, id: i64) -> Result<Option<Validation>> {
    let validation = conn
        .query_row(
            &format!("SELECT {} FROM validations WHERE id = ?1", VALIDATION_COLUMNS),
            params![id],
            validation_from_row,
        )
        .optional()?;
    Ok(validation)
}

pub(super) fn latest_validation(conn: &Connection, idea_id: i64) -> Result<Option<Validation>> {
    let validation = conn
        .query_row(
            &format!(
                "SELECT {} FROM validations WHERE idea_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT 1",
                VALIDATION_COLUMNS
            ),
            params![idea_id],
            validation_from_row,
        )
        .optional()?;
    Ok(validation)
}

impl Database {
    pub fn get_validation(&self, id: i64) -> Result<Option<Validation>> {
        self.with_connection(|conn| fetch_validation(conn, id))
    }

    /// Most recent validation recorded for an idea.
    pub fn get_latest_validation(&self, idea_id: i64) -> Result<Option<Validation>> {
        self.with_connection(|conn| latest_validation(conn, idea_id))
    }

    /// Record a validation and mark its idea as validated.
    ///
    /// Returns `None` when the idea does not exist; nothing is written then.
    pub fn create_validation(&self, input: CreateValidationInput) -> Result<Option<Validation>> {
        let now = mapper::now();

        self.with_transaction(|tx| {
            if !idea_exists(tx, input.idea_id)? {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO validations (idea_id, validation_data, score, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    input.idea_id,
                    mapper::encode_json(&input.validation_data)?,
                    input.score,
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();
            set_idea_status(tx, input.idea_id, &IdeaStatus::Validated, &now)?;

            fetch_validation(tx, id)?
                .map(Some)
                .ok_or_else(|| anyhow!("validation {} missing after insert", id))
        })
    }

    pub fn update_validation(
        &self,
        id: i64,
        input: UpdateValidationInput,
    ) -> Result<Option<Validation>> {
        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE validations SET validation_data = ?1, score = ?2 WHERE id = ?3",
                params![mapper::encode_json(&input.validation_data)?, input.score, id],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            fetch_validation(conn, id)
        })
    }

    pub fn delete_validation(&self, id: i64) -> Result<bool> {
        self.with_connection(|conn| {
            let deleted = conn.execute("DELETE FROM validations WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }
}
