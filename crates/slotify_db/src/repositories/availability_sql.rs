//! SQL implementation of the availability repository

use crate::error::DbError;
use crate::repositories::availability::AvailabilityRepository;
use crate::DbClient;
use chrono::{DateTime, Utc};
use slotify_common::models::{Availability, AvailabilityStatus};
use slotify_common::time::{from_storage, to_storage};
use sqlx::any::AnyRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::debug;

/// SQL implementation of the availability repository
#[derive(Debug, Clone)]
pub struct SqlAvailabilityRepository {
    db_client: DbClient,
}

impl SqlAvailabilityRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_availability(row: &AnyRow) -> Result<Availability, DbError> {
    let status: String = row
        .try_get("status")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let metadata: Option<String> = row.try_get::<Option<String>, _>("metadata").ok().flatten();

    Ok(Availability {
        availability_id: row
            .try_get("availability_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        host_email: row
            .try_get("host_email")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        title: row
            .try_get("title")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        date: row
            .try_get("date")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        day_start_time: parse_instant(row, "day_start_time")?,
        day_end_time: parse_instant(row, "day_end_time")?,
        per_slot_duration: row
            .try_get::<i64, _>("per_slot_duration")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        status: AvailabilityStatus::from_str(&status).map_err(DbError::DecodeError)?,
        created_at: parse_instant(row, "created_at")?,
        updated_at: parse_instant(row, "updated_at")?,
        metadata: metadata
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
    })
}

fn parse_instant(row: &AnyRow, column: &str) -> Result<DateTime<Utc>, DbError> {
    let raw: String = row
        .try_get(column)
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    from_storage(&raw).map_err(|e| DbError::DecodeError(format!("{column}: {e}")))
}

impl AvailabilityRepository for SqlAvailabilityRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing availability schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS availabilities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                availability_id TEXT NOT NULL UNIQUE,
                host_email TEXT NOT NULL,
                title TEXT NOT NULL,
                date TEXT NOT NULL,
                day_start_time TEXT NOT NULL,
                day_end_time TEXT NOT NULL,
                per_slot_duration INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                metadata TEXT
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn create(&self, availability: Availability) -> Result<Availability, DbError> {
        debug!(
            "Creating availability {} for host {}",
            availability.availability_id, availability.host_email
        );

        let metadata = availability
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO availabilities
                (availability_id, host_email, title, date, day_start_time,
                 day_end_time, per_slot_duration, status, created_at, updated_at, metadata)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(&availability.availability_id)
        .bind(&availability.host_email)
        .bind(&availability.title)
        .bind(&availability.date)
        .bind(to_storage(availability.day_start_time))
        .bind(to_storage(availability.day_end_time))
        .bind(availability.per_slot_duration)
        .bind(availability.status.as_str())
        .bind(to_storage(availability.created_at))
        .bind(to_storage(availability.updated_at))
        .bind(metadata)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(availability)
    }

    async fn find_by_id(&self, availability_id: &str) -> Result<Option<Availability>, DbError> {
        let row = sqlx::query("SELECT * FROM availabilities WHERE availability_id = $1")
            .bind(availability_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_availability).transpose()
    }

    async fn find_by_host(&self, host_email: &str) -> Result<Vec<Availability>, DbError> {
        let rows = sqlx::query("SELECT * FROM availabilities WHERE host_email = $1 ORDER BY date DESC")
            .bind(host_email)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_availability).collect()
    }

    async fn exists_for_host_date(&self, host_email: &str, date: &str) -> Result<bool, DbError> {
        let row = sqlx::query(
            "SELECT COUNT(1) AS n FROM availabilities WHERE host_email = $1 AND date = $2",
        )
        .bind(host_email)
        .bind(date)
        .fetch_one(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        let count: i64 = row
            .try_get("n")
            .map_err(|e| DbError::DecodeError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn mark_inactive_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE availabilities
            SET status = 'inactive', updated_at = $1
            WHERE day_start_time < $2 AND status = 'active'
            "#,
        )
        .bind(to_storage(now))
        .bind(to_storage(cutoff))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected())
    }
}
