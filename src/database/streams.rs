//! Channel streams and event streams
//!
//! Both tables have the same shape and differ only in the owning column, so
//! they share one set of queries parameterized by [`StreamOwner`].

use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use super::Database;
use crate::errors::AppResult;
use crate::models::{
    EventStream, Stream, StreamFields, StreamUpdateRequest, DEFAULT_URL_TYPE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamOwner {
    Channel,
    Event,
}

impl StreamOwner {
    fn table(self) -> &'static str {
        match self {
            Self::Channel => "streams",
            Self::Event => "event_streams",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            Self::Channel => "channel_id",
            Self::Event => "event_id",
        }
    }
}

/// A stream row with its owner id, whichever table it came from
#[derive(Debug, Clone, PartialEq)]
pub struct StreamRecord {
    pub id: i64,
    pub owner_id: i64,
    pub fields: StreamFields,
}

impl From<StreamRecord> for Stream {
    fn from(record: StreamRecord) -> Self {
        Self {
            id: record.id,
            channel_id: record.owner_id,
            fields: record.fields,
        }
    }
}

impl From<StreamRecord> for EventStream {
    fn from(record: StreamRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.owner_id,
            fields: record.fields,
        }
    }
}

fn record_from_row(row: &SqliteRow) -> Result<StreamRecord, sqlx::Error> {
    Ok(StreamRecord {
        id: row.try_get("id")?,
        owner_id: row.try_get("owner_id")?,
        fields: StreamFields {
            name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
            url: row.try_get::<Option<String>, _>("url")?.unwrap_or_default(),
            url_type: row
                .try_get::<Option<i64>, _>("url_type")?
                .unwrap_or(DEFAULT_URL_TYPE),
            user_agent: row
                .try_get::<Option<String>, _>("user_agent")?
                .unwrap_or_default(),
            referer: row.try_get::<Option<String>, _>("referer")?.unwrap_or_default(),
            headers: row
                .try_get::<Option<String>, _>("headers")?
                .unwrap_or_else(|| "{}".to_string()),
            drm: row.try_get("drm")?,
        },
    })
}

impl Database {
    async fn select_streams(
        &self,
        owner: StreamOwner,
        owner_id: i64,
        order: &str,
    ) -> AppResult<Vec<StreamRecord>> {
        let sql = format!(
            "SELECT id, {owner_col} AS owner_id, name, url, url_type, user_agent, referer, headers, drm
             FROM {table} WHERE {owner_col} = ? ORDER BY id {order}",
            owner_col = owner.owner_column(),
            table = owner.table(),
        );

        let rows = sqlx::query(&sql).bind(owner_id).fetch_all(&self.pool).await?;
        Ok(rows
            .iter()
            .map(record_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Newest first, for the admin panel
    pub async fn list_streams(&self, owner: StreamOwner, owner_id: i64) -> AppResult<Vec<StreamRecord>> {
        self.select_streams(owner, owner_id, "DESC").await
    }

    /// Oldest first, for client apps
    pub async fn list_public_streams(
        &self,
        owner: StreamOwner,
        owner_id: i64,
    ) -> AppResult<Vec<StreamRecord>> {
        self.select_streams(owner, owner_id, "ASC").await
    }

    pub async fn create_stream(
        &self,
        owner: StreamOwner,
        owner_id: i64,
        stream: &StreamFields,
    ) -> AppResult<i64> {
        let sql = format!(
            "INSERT INTO {table} ({owner_col}, name, url, url_type, user_agent, referer, headers, drm)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            table = owner.table(),
            owner_col = owner.owner_column(),
        );

        let result = sqlx::query(&sql)
            .bind(owner_id)
            .bind(&stream.name)
            .bind(&stream.url)
            .bind(stream.url_type)
            .bind(&stream.user_agent)
            .bind(&stream.referer)
            .bind(&stream.headers)
            .bind(&stream.drm)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!(
            "Created {} row {} for {} {}",
            owner.table(),
            id,
            owner.owner_column(),
            owner_id
        );
        Ok(id)
    }

    pub async fn update_stream(
        &self,
        owner: StreamOwner,
        id: i64,
        update: &StreamUpdateRequest,
    ) -> AppResult<u64> {
        let sql = format!(
            "UPDATE {table} SET
                name = COALESCE(?, name),
                url = COALESCE(?, url),
                url_type = COALESCE(?, url_type),
                user_agent = COALESCE(?, user_agent),
                referer = COALESCE(?, referer),
                headers = COALESCE(?, headers),
                drm = COALESCE(?, drm)
             WHERE id = ?",
            table = owner.table(),
        );

        let result = sqlx::query(&sql)
            .bind(&update.name)
            .bind(&update.url)
            .bind(update.url_type)
            .bind(&update.user_agent)
            .bind(&update.referer)
            .bind(update.headers_text()?)
            .bind(&update.drm)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_stream(&self, owner: StreamOwner, id: i64) -> AppResult<u64> {
        let sql = format!("DELETE FROM {} WHERE id = ?", owner.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
