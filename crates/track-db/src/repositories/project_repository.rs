//! Project repository.
//!
//! Mutations re-check the authorization policy before touching the store
//! (defense in depth with the HTTP layer, both reading the same policy
//! module), and reads are row-filtered from the same role constants.

use crate::row::{parse_ts, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use track_core::{Project, ProjectChange, User, WorkStatus, policy};

use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

const PROJECT_COLUMNS: &str =
    "id, title, stack, sprint, notes, status, created_by, created_at, updated_at";

pub struct ProjectRepository {
    pool: SqlitePool,
}

impl ProjectRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor: &User, project: &Project) -> DbErrorResult<()> {
        if !policy::can_create_project(actor) {
            return Err(DbError::policy(format!(
                "role {} may not create projects",
                actor.role
            )));
        }

        sqlx::query(
            r#"
                INSERT INTO projects (id, title, stack, sprint, notes, status, created_by, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(project.id.to_string())
        .bind(&project.title)
        .bind(&project.stack)
        .bind(&project.sprint)
        .bind(&project.notes)
        .bind(project.status.as_str())
        .bind(project.created_by.to_string())
        .bind(project.created_at.timestamp())
        .bind(project.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Project>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM projects WHERE id = ?",
            PROJECT_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_project(&r)).transpose()
    }

    /// Projects the actor may read: privileged reader roles see every row,
    /// everyone else only rows they hold a membership link for.
    pub async fn find_visible(&self, actor: &User) -> DbErrorResult<Vec<Project>> {
        let rows = if policy::is_privileged_reader(actor.role) {
            sqlx::query(&format!(
                "SELECT {} FROM projects ORDER BY created_at DESC",
                PROJECT_COLUMNS
            ))
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query(&format!(
                r#"
                    SELECT {} FROM projects p
                    WHERE EXISTS (
                        SELECT 1 FROM project_members m
                        WHERE m.project_id = p.id AND m.user_id = ?
                    )
                    ORDER BY p.created_at DESC
                "#,
                PROJECT_COLUMNS
            ))
            .bind(actor.id.to_string())
            .fetch_all(&self.pool)
            .await?
        };

        rows.iter().map(map_project).collect()
    }

    /// Apply field-scoped changes; untouched columns are never written.
    pub async fn update_fields(
        &self,
        actor: &User,
        project_id: Uuid,
        changes: &[ProjectChange],
    ) -> DbErrorResult<()> {
        if !policy::can_update_project(actor) {
            return Err(DbError::policy(format!(
                "role {} may not update projects",
                actor.role
            )));
        }
        if changes.is_empty() {
            return Ok(());
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE projects SET ");
        let mut sep = qb.separated(", ");
        for change in changes {
            match change {
                ProjectChange::Title(v) => {
                    sep.push("title = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ProjectChange::Stack(v) => {
                    sep.push("stack = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ProjectChange::Sprint(v) => {
                    sep.push("sprint = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ProjectChange::Notes(v) => {
                    sep.push("notes = ");
                    sep.push_bind_unseparated(v.clone());
                }
                ProjectChange::Status(v) => {
                    sep.push("status = ");
                    sep.push_bind_unseparated(v.as_str());
                }
            }
        }
        sep.push("updated_at = ");
        sep.push_bind_unseparated(Utc::now().timestamp());

        qb.push(" WHERE id = ");
        qb.push_bind(project_id.to_string());

        qb.build().execute(&self.pool).await?;

        Ok(())
    }

    /// Removes the project; modules and member links cascade with it.
    pub async fn delete(&self, actor: &User, id: Uuid) -> DbErrorResult<bool> {
        if !policy::can_delete_project(actor) {
            return Err(DbError::policy(format!(
                "role {} may not delete projects",
                actor.role
            )));
        }

        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_project(row: &SqliteRow) -> DbErrorResult<Project> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    let created_by: String = row.try_get("created_by")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Project {
        id: parse_uuid(&id, "project.id")?,
        title: row.try_get("title")?,
        stack: row.try_get("stack")?,
        sprint: row.try_get("sprint")?,
        notes: row.try_get("notes")?,
        status: WorkStatus::from_str(&status).map_err(|e| DbError::Initialization {
            message: format!("Invalid status in project.status: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?,
        created_by: parse_uuid(&created_by, "project.created_by")?,
        created_at: parse_ts(created_at, "project.created_at")?,
        updated_at: parse_ts(updated_at, "project.updated_at")?,
    })
}
