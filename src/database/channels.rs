use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use super::Database;
use crate::errors::AppResult;
use crate::models::{Channel, ChannelUpdateRequest, NewChannel};

const CHANNEL_COLUMNS: &str = "id, category_id, name, logo, is_hide, priority";

fn channel_from_row(row: &SqliteRow) -> Result<Channel, sqlx::Error> {
    Ok(Channel {
        id: row.try_get("id")?,
        category_id: row.try_get("category_id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        logo: row.try_get::<Option<String>, _>("logo")?.unwrap_or_default(),
        is_hide: row.try_get::<Option<i64>, _>("is_hide")?.unwrap_or(0),
        priority: row.try_get::<Option<i64>, _>("priority")?.unwrap_or(0),
    })
}

impl Database {
    pub async fn list_channels(&self, category_id: i64) -> AppResult<Vec<Channel>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE category_id = ?
             ORDER BY priority DESC, id DESC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(channel_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Client ordering: highest priority first, then oldest first
    pub async fn list_public_channels(&self, category_id: i64) -> AppResult<Vec<Channel>> {
        let rows = sqlx::query(&format!(
            "SELECT {CHANNEL_COLUMNS} FROM channels WHERE category_id = ?
             ORDER BY priority DESC, id ASC"
        ))
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(channel_from_row)
            .collect::<Result<_, _>>()?)
    }

    pub async fn create_channel(&self, category_id: i64, channel: &NewChannel) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO channels (category_id, name, logo, is_hide, priority)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(category_id)
        .bind(&channel.name)
        .bind(&channel.logo)
        .bind(channel.is_hide)
        .bind(channel.priority)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            "Created channel '{}' ({}) in category {}",
            channel.name, id, category_id
        );
        Ok(id)
    }

    pub async fn update_channel(&self, id: i64, update: &ChannelUpdateRequest) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE channels SET
                name = COALESCE(?, name),
                logo = COALESCE(?, logo),
                is_hide = COALESCE(?, is_hide),
                priority = COALESCE(?, priority)
             WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.logo)
        .bind(update.is_hide_flag())
        .bind(update.priority)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Streams of the channel go with it (storage-layer cascade)
    pub async fn delete_channel(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM channels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted channel {}", id);
        }
        Ok(result.rows_affected())
    }
}
