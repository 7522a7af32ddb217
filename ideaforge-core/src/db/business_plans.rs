use anyhow::{anyhow, Result};
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ideas::{idea_exists, set_idea_status};
use super::{mapper, Database};
use crate::models::*;

const BUSINESS_PLAN_COLUMNS: &str =
    "id, idea_id, template_id, sections, tasks, created_at, updated_at";

fn business_plan_from_row(row: &Row<'_>) -> rusqlite::Result<BusinessPlan> {
    Ok(BusinessPlan {
        id: row.get(0)?,
        idea_id: row.get(1)?,
        template_id: row.get(2)?,
        sections: mapper::decode_object(row.get(3)?),
        tasks: mapper::decode_array(row.get(4)?),
        created_at: mapper::timestamp_column(row, 5)?,
        updated_at: mapper::timestamp_column(row, 6)?,
    })
}

fn fetch_business_plan(conn: &Connection, id: i64) -> Result<Option<BusinessPlan>> {
    let plan = conn
        .query_row(
            &format!(
                "SELECT {} FROM business_plans WHERE id = ?1",
                BUSINESS_PLAN_COLUMNS
            ),
            params![id],
            business_plan_from_row,
        )
        .optional()?;
    Ok(plan)
}

pub(super) fn latest_business_plan(
    conn: &Connection,
    idea_id: i64,
) -> Result<Option<BusinessPlan>> {
    let plan = conn
        .query_row(
            &format!(
                "SELECT {} FROM business_plans WHERE idea_id = ?1
                 ORDER BY created_at DESC, id DESC LIMIT 1",
                BUSINESS_PLAN_COLUMNS
            ),
            params![idea_id],
            business_plan_from_row,
        )
        .optional()?;
    Ok(plan)
}

impl Database {
    pub fn get_business_plan(&self, id: i64) -> Result<Option<BusinessPlan>> {
        self.with_connection(|conn| fetch_business_plan(conn, id))
    }

    pub fn get_latest_business_plan(&self, idea_id: i64) -> Result<Option<BusinessPlan>> {
        self.with_connection(|conn| latest_business_plan(conn, idea_id))
    }

    /// Store a plan and move its idea into planning.
    ///
    /// Returns `None` when the idea does not exist.
    pub fn create_business_plan(
        &self,
        input: CreateBusinessPlanInput,
    ) -> Result<Option<BusinessPlan>> {
        let now = mapper::now();

        self.with_transaction(|tx| {
            if !idea_exists(tx, input.idea_id)? {
                return Ok(None);
            }
            tx.execute(
                "INSERT INTO business_plans (idea_id, template_id, sections, tasks, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    input.idea_id,
                    input.template_id,
                    mapper::encode_json(&input.sections)?,
                    mapper::encode_json(&input.tasks)?,
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();
            set_idea_status(tx, input.idea_id, &IdeaStatus::Planning, &now)?;

            fetch_business_plan(tx, id)?
                .map(Some)
                .ok_or_else(|| anyhow!("business plan {} missing after insert", id))
        })
    }

    pub fn update_business_plan(
        &self,
        id: i64,
        input: UpdateBusinessPlanInput,
    ) -> Result<Option<BusinessPlan>> {
        let now = mapper::now();

        self.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE business_plans SET template_id = ?1, sections = ?2, tasks = ?3, updated_at = ?4
                 WHERE id = ?5",
                params![
                    input.template_id,
                    mapper::encode_json(&input.sections)?,
                    mapper::encode_json(&input.tasks)?,
                    now,
                    id,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            fetch_business_plan(conn, id)
        })
    }

    pub fn delete_business_plan(&self, id: i64) -> Result<bool> {
        self.with_connection(|conn| {
            let deleted = conn.execute("DELETE FROM business_plans WHERE id = ?1", params![id])?;
            Ok(deleted > 0)
        })
    }
}
