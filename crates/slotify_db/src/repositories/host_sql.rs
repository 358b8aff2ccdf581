//! SQL implementation of the host repository

use crate::error::DbError;
use crate::repositories::host::HostRepository;
use crate::DbClient;
use slotify_common::models::Host;
use slotify_common::time::{from_storage, to_storage};
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::debug;

/// SQL implementation of the host repository
#[derive(Debug, Clone)]
pub struct SqlHostRepository {
    db_client: DbClient,
}

impl SqlHostRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_host(row: &AnyRow) -> Result<Host, DbError> {
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;

    Ok(Host {
        email: row
            .try_get("email")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        created_at: from_storage(&created_at)
            .map_err(|e| DbError::DecodeError(format!("created_at: {e}")))?,
    })
}

impl HostRepository for SqlHostRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing host schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS hosts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, host: Host) -> Result<Host, DbError> {
        sqlx::query("INSERT INTO hosts (email, name, created_at) VALUES ($1, $2, $3)")
            .bind(&host.email)
            .bind(&host.name)
            .bind(to_storage(host.created_at))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(host)
    }

    async fn exists(&self, email: &str) -> Result<bool, DbError> {
        let row = sqlx::query("SELECT COUNT(1) AS n FROM hosts WHERE email = $1")
            .bind(email)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let count: i64 = row
            .try_get("n")
            .map_err(|e| DbError::DecodeError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Host>, DbError> {
        let row = sqlx::query("SELECT * FROM hosts WHERE email = $1")
            .bind(email)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_host).transpose()
    }
}
