use sqlx::{sqlite::SqliteRow, Row};
use tracing::info;

use super::Database;
use crate::errors::AppResult;
use crate::models::{Category, CategoryUpdateRequest, NewCategory};

fn category_from_row(row: &SqliteRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
        logo: row.try_get::<Option<String>, _>("logo")?.unwrap_or_default(),
    })
}

impl Database {
    /// Newest first, for the admin panel
    pub async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, logo FROM categories ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(category_from_row)
            .collect::<Result<_, _>>()?)
    }

    /// Oldest first, for client apps
    pub async fn list_public_categories(&self) -> AppResult<Vec<Category>> {
        let rows = sqlx::query("SELECT id, name, logo FROM categories ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(category_from_row)
            .collect::<Result<_, _>>()?)
    }

    pub async fn create_category(&self, category: &NewCategory) -> AppResult<i64> {
        let result = sqlx::query("INSERT INTO categories (name, logo) VALUES (?, ?)")
            .bind(&category.name)
            .bind(&category.logo)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        info!("Created category '{}' ({})", category.name, id);
        Ok(id)
    }

    pub async fn update_category(&self, id: i64, update: &CategoryUpdateRequest) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE categories SET name = COALESCE(?, name), logo = COALESCE(?, logo) WHERE id = ?",
        )
        .bind(&update.name)
        .bind(&update.logo)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Channels and their streams go with it (storage-layer cascade)
    pub async fn delete_category(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            info!("Deleted category {}", id);
        }
        Ok(result.rows_affected())
    }
}
