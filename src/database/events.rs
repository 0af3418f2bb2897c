use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use super::Database;
use crate::errors::AppResult;
use crate::models::{Event, EventUpdateRequest, NewEvent, TeamInput};

const EVENT_COLUMNS: &str = "id, start_time, end_time, champions, commentary,
    team1_name, team1_logo, team2_name, team2_logo, channel";

fn event_from_row(row: &SqliteRow) -> Result<Event, sqlx::Error> {
    let text = |column: &str| -> Result<String, sqlx::Error> {
        Ok(row.try_get::<Option<String>, _>(column)?.unwrap_or_default())
    };

    Ok(Event {
        id: row.try_get("id")?,
        start_time: row.try_get("start_time")?,
        end_time: row.try_get("end_time")?,
        champions: text("champions")?,
        commentary: text("commentary")?,
        team1_name: text("team1_name")?,
        team1_logo: text("team1_logo")?,
        team2_name: text("team2_name")?,
        team2_logo: text("team2_logo")?,
        channel: text("channel")?,
    })
}

impl Database {
    /// Latest kick-off first, for the admin panel
    pub async fn list_events(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_time DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(event_from_row).collect::<Result<_, _>>()?)
    }

    /// Chronological, for client apps
    pub async fn list_public_events(&self) -> AppResult<Vec<Event>> {
        let rows = sqlx::query(&format!(
            "SELECT {EVENT_COLUMNS} FROM events ORDER BY start_time ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(event_from_row).collect::<Result<_, _>>()?)
    }

    pub async fn create_event(&self, event: &NewEvent) -> AppResult<i64> {
        let result = sqlx::query(
            "INSERT INTO events (start_time, end_time, champions, commentary,
                team1_name, team1_logo, team2_name, team2_logo, channel)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(&event.champions)
        .bind(&event.commentary)
        .bind(&event.team1_name)
        .bind(&event.team1_logo)
        .bind(&event.team2_name)
        .bind(&event.team2_logo)
        .bind(&event.channel)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        info!(
            "Created event {} ({} vs {})",
            id, event.team1_name, event.team2_name
        );
        Ok(id)
    }

    pub async fn update_event(&self, id: i64, update: &EventUpdateRequest) -> AppResult<u64> {
        let team_1 = update.team_1.clone().unwrap_or_default();
        let team_2 = update.team_2.clone().unwrap_or_default();
        let TeamInput {
            name: team1_name,
            logo: team1_logo,
        } = team_1;
        let TeamInput {
            name: team2_name,
            logo: team2_logo,
        } = team_2;

        let result = sqlx::query(
            "UPDATE events SET
                start_time = COALESCE(?, start_time),
                end_time = COALESCE(?, end_time),
                champions = COALESCE(?, champions),
                commentary = COALESCE(?, commentary),
                team1_name = COALESCE(?, team1_name),
                team1_logo = COALESCE(?, team1_logo),
                team2_name = COALESCE(?, team2_name),
                team2_logo = COALESCE(?, team2_logo),
                channel = COALESCE(?, channel)
             WHERE id = ?",
        )
        .bind(update.start_time)
        .bind(update.end_time)
        .bind(&update.champions)
        .bind(&update.commentary)
        .bind(team1_name)
        .bind(team1_logo)
        .bind(team2_name)
        .bind(team2_logo)
        .bind(&update.channel)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete an event and its event streams. The two deletes share one
    /// transaction; this is the only multi-statement write in the crate.
    pub async fn delete_event(&self, id: i64) -> AppResult<u64> {
        let mut transaction = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(&mut *transaction)
            .await?;

        let streams = sqlx::query("DELETE FROM event_streams WHERE event_id = ?")
            .bind(id)
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;

        if result.rows_affected() > 0 {
            info!(
                "Deleted event {} and {} event streams",
                id,
                streams.rows_affected()
            );
        }
        Ok(result.rows_affected())
    }
}
