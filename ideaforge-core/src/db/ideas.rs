use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{mapper, Database};
use crate::models::*;

const IDEA_COLUMNS: &str = "id, summary, description, bullet_points, status, company_name, \
     created_at, updated_at, is_active";

fn idea_from_row(row: &Row<'_>) -> rusqlite::Result<Idea> {
    let status: String = row.get(4)?;
    Ok(Idea {
        id: row.get(0)?,
        summary: row.get(1)?,
        description: row.get(2)?,
        bullet_points: mapper::decode_list(row.get(3)?),
        status: IdeaStatus::parse(&status),
        company_name: row.get(5)?,
        created_at: mapper::timestamp_column(row, 6)?,
        updated_at: mapper::timestamp_column(row, 7)?,
        is_active: mapper::bool_column(row.get(8)?),
    })
}

pub(super) fn fetch_idea(conn: &Connection, id: i64) -> Result<Option<Idea>> {
    let idea = conn
        .query_row(
            &format!("SELECT {} FROM ideas WHERE id = ?1", IDEA_COLUMNS),
            params![id],
            idea_from_row,
        )
        .optional()?;
    Ok(idea)
}

pub(super) fn idea_exists(conn: &Connection, id: i64) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM ideas WHERE id = ?1", params![id], |_| Ok(()))
        .optional()?;
    Ok(found.is_some())
}

/// Side effect of creating a child record.
pub(super) fn set_idea_status(
    conn: &Connection,
    id: i64,
    status: &IdeaStatus,
    now: &str,
) -> Result<()> {
    conn.execute(
        "UPDATE ideas SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(())
}

impl Database {
    /// Active ideas, newest first.
    pub fn list_ideas(&self) -> Result<Vec<Idea>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM ideas WHERE is_active = 1 ORDER BY created_at DESC, id DESC",
                IDEA_COLUMNS
            ))?;
            let ideas = stmt
                .query_map([], idea_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ideas)
        })
    }

    /// Look up an idea regardless of whether it is active.
    pub fn get_idea(&self, id: i64) -> Result<Option<Idea>> {
        self.with_connection(|conn| fetch_idea(conn, id))
    }

    pub fn create_idea(&self, input: CreateIdeaInput) -> Result<Idea> {
        let now = mapper::now();
        let status = input.status.unwrap_or_default();

        self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO ideas (summary, description, bullet_points, status, company_name, created_at, updated_at, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, 1)",
                params![
                    input.summary,
                    input.description,
                    mapper::encode_json(&input.bullet_points)?,
                    status.as_str(),
                    input.company_name,
                    now,
                ],
            )?;
            let id = conn.last_insert_rowid();
            fetch_idea(conn, id)?.ok_or_else(|| anyhow!("idea {} missing after insert", id))
        })
    }

    /// Returns `None` when no idea has this id.
    pub fn update_idea(&self, id: i64, input: UpdateIdeaInput) -> Result<Option<Idea>> {
        let now = mapper::now();

        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE ideas SET summary = ?1, description = ?2, bullet_points = ?3,
                     status = COALESCE(?4, status), company_name = ?5,
                     is_active = COALESCE(?6, is_active), updated_at = ?7
                 WHERE id = ?8",
                params![
                    input.summary,
                    input.description,
                    mapper::encode_json(&input.bullet_points)?,
                    input.status.as_ref().map(IdeaStatus::as_str),
                    input.company_name,
                    input.is_active,
                    now,
                    id,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            fetch_idea(conn, id)
        })
    }

    /// Hard delete; validations, business plans and implementation items go with it.
    pub fn delete_idea(&self, id: i64) -> Result<bool> {
        self.with_connection(|conn| {
            let deleted = conn.execute("DELETE FROM ideas WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }

    pub fn get_idea_overview(&self, id: i64) -> Result<Option<IdeaOverview>> {
        self.with_connection(|conn| {
            let Some(idea) = fetch_idea(conn, id)? else {
                return Ok(None);
            };
            Ok(Some(IdeaOverview {
                validation: super::validations::latest_validation(conn, id)?,
                business_plan: super::business_plans::latest_business_plan(conn, id)?,
                implementation_items: super::implementation_items::items_for_idea(conn, id)?,
                idea,
            }))
        })
    }
}
