//! Stored login credentials, the in-process realization of the external
//! auth collaborator. Only the bcrypt hash is ever persisted.

use crate::Result as DbErrorResult;
use crate::row::{parse_ts, parse_uuid};

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Credential {
    pub auth_id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

pub struct CredentialRepository {
    pool: SqlitePool,
}

impl CredentialRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        auth_id: Uuid,
        email: &str,
        password_hash: &str,
    ) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO auth_credentials (auth_id, email, password_hash, created_at)
                VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(auth_id.to_string())
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now().timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Credential>> {
        let row = sqlx::query(
            r#"
                SELECT auth_id, email, password_hash, created_at
                FROM auth_credentials
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| map_credential(&r)).transpose()
    }

    pub async fn delete(&self, auth_id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM auth_credentials WHERE auth_id = ?")
            .bind(auth_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_credential(row: &SqliteRow) -> DbErrorResult<Credential> {
    let auth_id: String = row.try_get("auth_id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(Credential {
        auth_id: parse_uuid(&auth_id, "auth_credentials.auth_id")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        created_at: parse_ts(created_at, "auth_credentials.created_at")?,
    })
}
