//! SQL implementation of the slot repository

use crate::error::DbError;
use crate::repositories::slot::SlotRepository;
use crate::DbClient;
use chrono::{DateTime, Utc};
use slotify_common::models::{Slot, SlotStatus};
use slotify_common::time::{from_storage, to_storage};
use sqlx::any::AnyRow;
use sqlx::Row;
use std::str::FromStr;
use tracing::debug;

/// SQL implementation of the slot repository
#[derive(Debug, Clone)]
pub struct SqlSlotRepository {
    db_client: DbClient,
}

impl SqlSlotRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }
}

fn row_to_slot(row: &AnyRow) -> Result<Slot, DbError> {
    let status: String = row
        .try_get("status")
        .map_err(|e| DbError::DecodeError(e.to_string()))?;
    let metadata: Option<String> = row.try_get::<Option<String>, _>("metadata").ok().flatten();

    Ok(Slot {
        slot_id: row
            .try_get("slot_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        availability_id: row
            .try_get("availability_id")
            .map_err(|e| DbError::DecodeError(e.to_string()))?,
        slot_start_time: parse_instant(row, "slot_start_time")?,
        slot_end_time: parse_instant(row, "slot_end_time")?,
        status: SlotStatus::from_str(&status).map_err(DbError::DecodeError)?,
        meeting_link: row.try_get::<Option<String>, _>("meeting_link").ok().flatten(),
        attendee_email: row
            .try_get::<Option<String>, _>("attendee_email")
            .ok()
            .flatten(),
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

impl SlotRepository for SqlSlotRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing slot schema");

        let query = r#"
            CREATE TABLE IF NOT EXISTS slots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                slot_id TEXT NOT NULL UNIQUE,
                availability_id TEXT NOT NULL,
                slot_start_time TEXT NOT NULL,
                slot_end_time TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'available',
                meeting_link TEXT,
                attendee_email TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                metadata TEXT
            )
        "#;

        self.db_client.execute(query).await?;
        Ok(())
    }

    async fn insert_many(&self, slots: Vec<Slot>) -> Result<Vec<Slot>, DbError> {
        if slots.is_empty() {
            return Ok(slots);
        }

        debug!("Bulk inserting {} slots", slots.len());

        // One multi-row statement: the whole batch lands or none of it does.
        const COLUMNS: usize = 10;
        let mut sql = String::from(
            "INSERT INTO slots (slot_id, availability_id, slot_start_time, slot_end_time, \
             status, meeting_link, attendee_email, created_at, updated_at, metadata) VALUES ",
        );
        for i in 0..slots.len() {
            if i > 0 {
                sql.push_str(", ");
            }
            let base = i * COLUMNS;
            sql.push('(');
            for j in 1..=COLUMNS {
                if j > 1 {
                    sql.push_str(", ");
                }
                sql.push_str(&format!("${}", base + j));
            }
            sql.push(')');
        }

        let mut query = sqlx::query(&sql);
        for slot in &slots {
            let metadata = slot
                .metadata
                .as_ref()
                .map(serde_json::to_string)
                .transpose()
                .map_err(|e| DbError::QueryError(e.to_string()))?;
            query = query
                .bind(slot.slot_id.clone())
                .bind(slot.availability_id.clone())
                .bind(to_storage(slot.slot_start_time))
                .bind(to_storage(slot.slot_end_time))
                .bind(slot.status.as_str())
                .bind(slot.meeting_link.clone())
                .bind(slot.attendee_email.clone())
                .bind(to_storage(slot.created_at))
                .bind(to_storage(slot.updated_at))
                .bind(metadata);
        }

        query
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(slots)
    }

    async fn find_by_id(&self, slot_id: &str) -> Result<Option<Slot>, DbError> {
        let row = sqlx::query("SELECT * FROM slots WHERE slot_id = $1")
            .bind(slot_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.as_ref().map(row_to_slot).transpose()
    }

    async fn find_by_availability(&self, availability_id: &str) -> Result<Vec<Slot>, DbError> {
        let rows = sqlx::query(
            "SELECT * FROM slots WHERE availability_id = $1 ORDER BY slot_start_time",
        )
        .bind(availability_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_slot).collect()
    }

    async fn find_booked_by_availability(
        &self,
        availability_id: &str,
    ) -> Result<Vec<Slot>, DbError> {
        let rows = sqlx::query(
            "SELECT * FROM slots WHERE availability_id = $1 AND status = 'booked' \
             ORDER BY slot_start_time",
        )
        .bind(availability_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(row_to_slot).collect()
    }

    async fn delete_available(&self, slot_id: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM slots WHERE slot_id = $1 AND status = 'available'")
            .bind(slot_id)
            .execute(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    async fn book_if_available(
        &self,
        slot_id: &str,
        meeting_link: &str,
        attendee_email: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Slot>, DbError> {
        // Status-guarded write: losing a race against another booking or
        // the sweep shows up as zero affected rows, never as a lost update.
        let result = sqlx::query(
            r#"
            UPDATE slots
            SET status = 'booked', meeting_link = $1, attendee_email = $2, updated_at = $3
            WHERE slot_id = $4 AND status = 'available'
            "#,
        )
        .bind(meeting_link)
        .bind(attendee_email)
        .bind(to_storage(now))
        .bind(slot_id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(slot_id).await
    }

    async fn mark_unavailable_started_before(
        &self,
        cutoff: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE slots
            SET status = 'unavailable', updated_at = $1
            WHERE slot_start_time < $2 AND status IN ('available', 'booked')
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
