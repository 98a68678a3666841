use crate::row::{parse_ts, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use track_core::{ProjectMember, User, policy};

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct ProjectMemberRepository {
    pool: SqlitePool,
}

impl ProjectMemberRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, actor: &User, member: &ProjectMember) -> DbErrorResult<()> {
        if !policy::can_manage_members(actor) {
            return Err(DbError::policy(format!(
                "role {} may not manage project members",
                actor.role
            )));
        }

        sqlx::query(
            r#"
                INSERT INTO project_members (id, project_id, user_id, role_in_project, created_at)
                VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(member.id.to_string())
        .bind(member.project_id.to_string())
        .bind(member.user_id.to_string())
        .bind(&member.role_in_project)
        .bind(member.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<ProjectMember>> {
        let row = sqlx::query(
            r#"
                SELECT id, project_id, user_id, role_in_project, created_at
                FROM project_members
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_member(&r)).transpose()
    }

    pub async fn find_by_project(&self, project_id: Uuid) -> DbErrorResult<Vec<ProjectMember>> {
        let rows = sqlx::query(
            r#"
                SELECT id, project_id, user_id, role_in_project, created_at
                FROM project_members
                WHERE project_id = ?
                ORDER BY created_at
            "#,
        )
        .bind(project_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_member).collect()
    }

    pub async fn find_by_user_and_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> DbErrorResult<Option<ProjectMember>> {
        let row = sqlx::query(
            r#"
                SELECT id, project_id, user_id, role_in_project, created_at
                FROM project_members
                WHERE user_id = ? AND project_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(project_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_member(&r)).transpose()
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> DbErrorResult<bool> {
        if !policy::can_manage_members(actor) {
            return Err(DbError::policy(format!(
                "role {} may not manage project members",
                actor.role
            )));
        }

        let result = sqlx::query("DELETE FROM project_members WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_member(row: &SqliteRow) -> DbErrorResult<ProjectMember> {
    let id: String = row.try_get("id")?;
    let project_id: String = row.try_get("project_id")?;
    let user_id: String = row.try_get("user_id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(ProjectMember {
        id: parse_uuid(&id, "project_member.id")?,
        project_id: parse_uuid(&project_id, "project_member.project_id")?,
        user_id: parse_uuid(&user_id, "project_member.user_id")?,
        role_in_project: row.try_get("role_in_project")?,
        created_at: parse_ts(created_at, "project_member.created_at")?,
    })
}
