//! Module repository.
//!
//! `update_fields` is the store-side half of the field-level authorization
//! model: every change is re-checked against the policy table before any
//! SQL is built, so a caller that skipped the HTTP-layer check still cannot
//! write a field its role does not own. A rejected batch writes nothing.

use crate::row::{parse_opt_ts, parse_opt_uuid, parse_ts, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use track_core::{Module, ModuleChange, ReviewStatus, User, WorkStatus, policy};

use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const MODULE_COLUMNS: &str = "id, project_id, module_name, platform_stack, assigned_dev_id, \
     design_locked_date, dev_start_date, self_qa_date, lead_signoff_date, pm_review_date, \
     cto_review_status, client_ready_status, status, eta, sprint, notes, created_at, updated_at";

pub struct ModuleRepository {
    pool: SqlitePool,
}

impl ModuleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor: &User, module: &Module) -> DbErrorResult<()> {
        if !policy::can_create_module(actor) {
            return Err(DbError::policy(format!(
                "role {} may not create modules",
                actor.role
            )));
        }

        sqlx::query(
            r#"
                INSERT INTO project_modules (
                    id, project_id, module_name, platform_stack, assigned_dev_id,
                    design_locked_date, dev_start_date, self_qa_date, lead_signoff_date,
                    pm_review_date, cto_review_status, client_ready_status, status,
                    eta, sprint, notes, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(module.id.to_string())
        .bind(module.project_id.to_string())
        .bind(&module.module_name)
        .bind(&module.platform_stack)
        .bind(module.assigned_dev_id.map(|id| id.to_string()))
        .bind(module.design_locked_date.map(|d| d.timestamp()))
        .bind(module.dev_start_date.map(|d| d.timestamp()))
        .bind(module.self_qa_date.map(|d| d.timestamp()))
        .bind(module.lead_signoff_date.map(|d| d.timestamp()))
        .bind(module.pm_review_date.map(|d| d.timestamp()))
        .bind(module.cto_review_status.as_str())
        .bind(module.client_ready_status.as_str())
        .bind(module.status.as_str())
        .bind(module.eta.map(|d| d.timestamp()))
        .bind(&module.sprint)
        .bind(&module.notes)
        .bind(module.created_at.timestamp())
        .bind(module.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Module>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM project_modules WHERE id = ?",
            MODULE_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_module(&r)).transpose()
    }

    pub async fn find_by_project(&self, project_id: Uuid) -> DbErrorResult<Vec<Module>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM project_modules WHERE project_id = ? ORDER BY created_at",
            MODULE_COLUMNS
        ))
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_module).collect()
    }

    /// Modules of a project the actor may read. Privileged readers and
    /// project members see all of them; anyone else only modules assigned
    /// to them.
    pub async fn find_visible_by_project(
        &self,
        actor: &User,
        project_id: Uuid,
    ) -> DbErrorResult<Vec<Module>> {
        let rows = if policy::is_privileged_reader(actor.role) {
            sqlx::query(&format!(
                "SELECT {} FROM project_modules WHERE project_id = ? ORDER BY created_at",
                MODULE_COLUMNS
            ))
            .bind(project_id.to_string())
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!(
                r#"
                    SELECT {} FROM project_modules mo
                    WHERE mo.project_id = ?
                      AND (
                        EXISTS (
                            SELECT 1 FROM project_members m
                            WHERE m.project_id = mo.project_id AND m.user_id = ?
                        )
                        OR mo.assigned_dev_id = ?
                      )
                    ORDER BY mo.created_at
                "#,
                MODULE_COLUMNS
            ))
            .bind(project_id.to_string())
            .bind(actor.id.to_string())
            .bind(actor.id.to_string())
            .fetch_all(&self.pool)
            .await?
        };

        rows.iter().map(map_module).collect()
    }

    /// Apply field-scoped changes after re-checking each against the
    /// policy table. The first denied field aborts the whole batch before
    /// anything is written.
    pub async fn update_fields(
        &self,
        actor: &User,
        module: &Module,
        changes: &[ModuleChange],
    ) -> DbErrorResult<()> {
        for change in changes {
            let field = change.field();
            if !policy::can_edit_module_field(actor, field, module) {
                return Err(DbError::policy(format!(
                    "role {} may not update module field {}",
                    actor.role, field
                )));
            }
        }
        if changes.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE project_modules SET ");
        let mut sep = qb.separated(", ");
        for change in changes {
            match change {
                ModuleChange::ModuleName(v) => {
                    sep.push("module_name = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ModuleChange::PlatformStack(v) => {
                    sep.push("platform_stack = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ModuleChange::AssignedDev(v) => {
                    sep.push("assigned_dev_id = ");
                    sep.push_bind_unseparated(v.map(|id| id.to_string()));
                }
                ModuleChange::DesignLockedDate(v) => {
                    sep.push("design_locked_date = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::DevStartDate(v) => {
                    sep.push("dev_start_date = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::SelfQaDate(v) => {
                    sep.push("self_qa_date = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::LeadSignoffDate(v) => {
                    sep.push("lead_signoff_date = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::PmReviewDate(v) => {
                    sep.push("pm_review_date = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::CtoReviewStatus(v) => {
                    sep.push("cto_review_status = ");
                    sep.push_bind_unseparated(v.as_str());
                }
                ModuleChange::ClientReadyStatus(v) => {
                    sep.push("client_ready_status = ");
                    sep.push_bind_unseparated(v.as_str());
                }
                ModuleChange::Status(v) => {
                    sep.push("status = ");
                    sep.push_bind_unseparated(v.as_str());
                }
                ModuleChange::Eta(v) => {
                    sep.push("eta = ");
                    sep.push_bind_unseparated(v.map(|d| d.timestamp()));
                }
                ModuleChange::Sprint(v) => {
                    sep.push("sprint = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ModuleChange::Notes(v) => {
                    sep.push("notes = ");
                    sep.push_bind_unseparated(v.clone());
                }
            }
        }
        sep.push("updated_at = ");
        sep.push_bind_unseparated(Utc::now().timestamp());

        qb.push(" WHERE id = ");
        qb.push_bind(module.id.to_string());

        qb.build().execute(&self.pool).await?;

        Ok(())
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> DbErrorResult<bool> {
        if !policy::can_delete_module(actor) {
            return Err(DbError::policy(format!(
                "role {} may not delete modules",
                actor.role
            )));
        }

        let result = sqlx::query("DELETE FROM project_modules WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_module(row: &SqliteRow) -> DbErrorResult<Module> {
    let id: String = row.try_get("id")?;
    let project_id: String = row.try_get("project_id")?;
    let assigned_dev_id: Option<String> = row.try_get("assigned_dev_id")?;
    let design_locked_date: Option<i64> = row.try_get("design_locked_date")?;
    let dev_start_date: Option<i64> = row.try_get("dev_start_date")?;
    let self_qa_date: Option<i64> = row.try_get("self_qa_date")?;
    let lead_signoff_date: Option<i64> = row.try_get("lead_signoff_date")?;
    let pm_review_date: Option<i64> = row.try_get("pm_review_date")?;
    let cto_review_status: String = row.try_get("cto_review_status")?;
    let client_ready_status: String = row.try_get("client_ready_status")?;
    let status: String = row.try_get("status")?;
    let eta: Option<i64> = row.try_get("eta")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Module {
        id: parse_uuid(&id, "module.id")?,
        project_id: parse_uuid(&project_id, "module.project_id")?,
        module_name: row.try_get("module_name")?,
        platform_stack: row.try_get("platform_stack")?,
        assigned_dev_id: parse_opt_uuid(assigned_dev_id.as_deref(), "module.assigned_dev_id")?,
        design_locked_date: parse_opt_ts(design_locked_date, "module.design_locked_date")?,
        dev_start_date: parse_opt_ts(dev_start_date, "module.dev_start_date")?,
        self_qa_date: parse_opt_ts(self_qa_date, "module.self_qa_date")?,
        lead_signoff_date: parse_opt_ts(lead_signoff_date, "module.lead_signoff_date")?,
        pm_review_date: parse_opt_ts(pm_review_date, "module.pm_review_date")?,
        cto_review_status: ReviewStatus::from_str(&cto_review_status).map_err(|e| {
            DbError::Initialization {
                message: format!("Invalid review status in module.cto_review_status: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        client_ready_status: ReviewStatus::from_str(&client_ready_status).map_err(|e| {
            DbError::Initialization {
                message: format!("Invalid review status in module.client_ready_status: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?,
        status: WorkStatus::from_str(&status).map_err(|e| DbError::Initialization {
            message: format!("Invalid status in module.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        eta: parse_opt_ts(eta, "module.eta")?,
        sprint: row.try_get("sprint")?,
        notes: row.try_get("notes")?,
        created_at: parse_ts(created_at, "module.created_at")?,
        updated_at: parse_ts(updated_at, "module.updated_at")?,
    })
}
