//! User repository.
//!
//! Role text is read back leniently: a value this build does not recognize
//! maps to `Role::Unknown` (no permissions) instead of failing the load.

use crate::row::{parse_ts, parse_uuid};
use crate::{DbError, Result as DbErrorResult};

use track_core::{Role, User, policy};

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user: &User) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO users (id, auth_id, name, email, role, avatar_url, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.to_string())
        .bind(user.auth_id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.avatar_url)
        .bind(user.created_at.timestamp())
        .bind(user.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, auth_id, name, email, role, avatar_url, created_at, updated_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    /// Profile lookup for the session layer: auth identity -> User (incl. role).
    pub async fn find_by_auth_id(&self, auth_id: Uuid) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, auth_id, name, email, role, avatar_url, created_at, updated_at
                FROM users
                WHERE auth_id = ?
            "#,
        )
        .bind(auth_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<User>> {
        let row = sqlx::query(
            r#"
                SELECT id, auth_id, name, email, role, avatar_url, created_at, updated_at
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_user(&r)).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<User>> {
        let rows = sqlx::query(
            r#"
                SELECT id, auth_id, name, email, role, avatar_url, created_at, updated_at
                FROM users
                ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_user).collect()
    }

    pub async fn count(&self) -> DbErrorResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("n")?)
    }

    pub async fn update_name(&self, actor: &User, target: &User, name: &str) -> DbErrorResult<()> {
        if !policy::can_update_user(actor, target) {
            return Err(DbError::policy(format!(
                "role {} may not update user {}",
                actor.role, target.id
            )));
        }

        sqlx::query("UPDATE users SET name = ?, updated_at = ? WHERE id = ?")
            .bind(name)
            .bind(Utc::now().timestamp())
            .bind(target.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_avatar(
        &self,
        actor: &User,
        target: &User,
        avatar_url: Option<&str>,
    ) -> DbErrorResult<()> {
        if !policy::can_update_user(actor, target) {
            return Err(DbError::policy(format!(
                "role {} may not update user {}",
                actor.role, target.id
            )));
        }

        sqlx::query("UPDATE users SET avatar_url = ?, updated_at = ? WHERE id = ?")
            .bind(avatar_url)
            .bind(Utc::now().timestamp())
            .bind(target.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_role(&self, actor: &User, target: &User, role: Role) -> DbErrorResult<()> {
        if !policy::can_change_role(actor) {
            return Err(DbError::policy(format!(
                "role {} may not change roles",
                actor.role
            )));
        }

        sqlx::query("UPDATE users SET role = ?, updated_at = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(Utc::now().timestamp())
            .bind(target.id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, actor: &User, id: Uuid) -> DbErrorResult<bool> {
        if !policy::can_delete_user(actor) {
            return Err(DbError::policy(format!(
                "role {} may not delete users",
                actor.role
            )));
        }

        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_user(row: &SqliteRow) -> DbErrorResult<User> {
    let id: String = row.try_get("id")?;
    let auth_id: String = row.try_get("auth_id")?;
    let role: String = row.try_get("role")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(User {
        id: parse_uuid(&id, "user.id")?,
        auth_id: parse_uuid(&auth_id, "user.auth_id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        role: Role::from_stored(&role),
        avatar_url: row.try_get("avatar_url")?,
        created_at: parse_ts(created_at, "user.created_at")?,
        updated_at: parse_ts(updated_at, "user.updated_at")?,
    })
}
