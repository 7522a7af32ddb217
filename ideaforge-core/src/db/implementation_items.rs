use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ideas::idea_exists;
use super::{mapper, Database};
use crate::models::*;

const ITEM_COLUMNS: &str = "id, idea_id, item_type, name, owner, start_date, end_date, \
     completion_percentage, status, created_at, updated_at";

fn item_from_row(row: &Row<'_>) -> rusqlite::Result<ImplementationItem> {
    let status: String = row.get(8)?;
    Ok(ImplementationItem {
        id: row.get(0)?,
        idea_id: row.get(1)?,
        item_type: row.get(2)?,
        name: row.get(3)?,
        owner: row.get(4)?,
        start_date: row.get(5)?,
        end_date: row.get(6)?,
        completion_percentage: row.get(7)?,
        status: ItemStatus::parse(&status),
        created_at: mapper::timestamp_column(row, 9)?,
        updated_at: mapper::timestamp_column(row, 10)?,
    })
}

fn fetch_item(conn: &Connection, id: i64) -> Result<Option<ImplementationItem>> {
    let item = conn
        .query_row(
            &format!(
                "SELECT {} FROM implementation_items WHERE id = ?1",
                ITEM_COLUMNS
            ),
            params![id],
            item_from_row,
        )
        .optional()?;
    Ok(item)
}

pub(super) fn items_for_idea(conn: &Connection, idea_id: i64) -> Result<Vec<ImplementationItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM implementation_items WHERE idea_id = ?1 ORDER BY created_at, id",
        ITEM_COLUMNS
    ))?;
    let items = stmt
        .query_map(params![idea_id], item_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(items)
}

impl Database {
    /// All items of an idea in creation order. Unknown ideas yield an empty list.
    pub fn list_implementation_items(&self, idea_id: i64) -> Result<Vec<ImplementationItem>> {
        self.with_connection(|conn| items_for_idea(conn, idea_id))
    }

    pub fn get_implementation_item(&self, id: i64) -> Result<Option<ImplementationItem>> {
        self.with_connection(|conn| fetch_item(conn, id))
    }

    /// Returns `None` when the idea does not exist.
    pub fn create_implementation_item(
        &self,
        input: CreateImplementationItemInput,
    ) -> Result<Option<ImplementationItem>> {
        let now = mapper::now();
        let status = input.status.unwrap_or_default();

        self.with_transaction(|tx| {
            if !idea_exists(tx, input.idea_id)? {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO implementation_items
                     (idea_id, item_type, name, owner, start_date, end_date,
                      completion_percentage, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
                params![
                    input.idea_id,
                    input.item_type,
                    input.name,
                    input.owner,
                    input.start_date,
                    input.end_date,
                    input.completion_percentage.unwrap_or(0),
                    status.as_str(),
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();

            fetch_item(tx, id)?
                .map(Some)
                .ok_or_else(|| anyhow!("implementation item {} missing after insert", id))
        })
    }

    pub fn update_implementation_item(
        &self,
        id: i64,
        input: UpdateImplementationItemInput,
    ) -> Result<Option<ImplementationItem>> {
        let now = mapper::now();
        let status = input.status.unwrap_or_default();

        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE implementation_items SET item_type = ?1, name = ?2, owner = ?3,
                     start_date = ?4, end_date = ?5, completion_percentage = ?6,
                     status = ?7, updated_at = ?8
                 WHERE id = ?9",
                params![
                    input.item_type,
                    input.name,
                    input.owner,
                    input.start_date,
                    input.end_date,
                    input.completion_percentage.unwrap_or(0),
                    status.as_str(),
                    now,
                    id,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            fetch_item(conn, id)
        })
    }

    pub fn delete_implementation_item(&self, id: i64) -> Result<bool> {
        self.with_connection(|conn| {
            let deleted = conn.execute(
                "DELETE FROM implementation_items WHERE id = ?1",
                params![id],
            )?;
            Ok(deleted > 0)
        })
    }
}
