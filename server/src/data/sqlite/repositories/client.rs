//! Client repository for SQLite operations
//!
//! Clients are created and read only. There is no delete.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::ClientRow;
use crate::utils::time::now_micros;

type ClientTuple = (i64, String, i64, i64);

fn to_row((id, name, organization_id, created_at): ClientTuple) -> ClientRow {
    ClientRow {
        id,
        name,
        organization_id,
        created_at,
    }
}

/// Create a client under an organization
pub async fn create_client(
    pool: &SqlitePool,
    name: &str,
    organization_id: i64,
) -> Result<ClientRow, SqliteError> {
    let now = now_micros();

    let result =
        sqlx::query("INSERT INTO clients (name, organization_id, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(organization_id)
            .bind(now)
            .execute(pool)
            .await
            .map_err(|e| SqliteError::from_write(e, "Organization was removed concurrently"))?;

    Ok(ClientRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        organization_id,
        created_at: now,
    })
}

/// Get a client by ID
pub async fn get_client(pool: &SqlitePool, id: i64) -> Result<Option<ClientRow>, SqliteError> {
    let row = sqlx::query_as::<_, ClientTuple>(
        "SELECT id, name, organization_id, created_at FROM clients WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(to_row))
}

/// List clients of an organization, oldest first
pub async fn list_for_org(
    pool: &SqlitePool,
    organization_id: i64,
) -> Result<Vec<ClientRow>, SqliteError> {
    let rows = sqlx::query_as::<_, ClientTuple>(
        r#"
        SELECT id, name, organization_id, created_at
        FROM clients
        WHERE organization_id = ?
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(to_row).collect())
}
