use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use stash_core::error::AppError;
use stash_core::models::{Item, NewItem};
use stash_core::traits::ItemStore;

/// Item store backed by the `items` table, one JSONB document per row.
#[derive(Clone)]
pub struct ItemRepository {
    pool: Pool<Postgres>,
}

impl ItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// -- Internal row type for sqlx deserialization --

#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    owner: Uuid,
    document: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            owner: row.owner,
            fields: row.document.0,
            created_at: row.created_at,
        }
    }
}

impl ItemStore for ItemRepository {
    async fn insert_item(&self, item: &NewItem) -> Result<Uuid, AppError> {
        let row: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO items (owner, document)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(item.owner)
        .bind(Json(&item.document))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A valid token can outlive its account; the owner FK catches that.
            if e
                .as_database_error()
                .is_some_and(|db| db.is_foreign_key_violation())
            {
                tracing::warn!(owner = %item.owner, "Item owner does not exist");
                AppError::Unauthorized(format!("owner {} does not exist", item.owner))
            } else {
                tracing::error!(error = %e, owner = %item.owner, "Failed to insert item");
                AppError::DatabaseError(e.to_string())
            }
        })?;

        Ok(row.0)
    }

    async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<Item>, AppError> {
        let rows = sqlx::query_as::<_, ItemRow>(
            r#"
            SELECT id, owner, document, created_at
            FROM items
            WHERE owner = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
