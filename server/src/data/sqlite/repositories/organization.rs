//! Organization repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::OrganizationRow;
use crate::utils::time::now_micros;

use super::project::delete_project_tree;

/// Create a new organization. Names are unique across the store.
pub async fn create_organization(
    pool: &SqlitePool,
    name: &str,
) -> Result<OrganizationRow, SqliteError> {
    let now = now_micros();

    let result = sqlx::query("INSERT INTO organizations (name, created_at) VALUES (?, ?)")
        .bind(name)
        .bind(now)
        .execute(pool)
        .await
        .map_err(|e| SqliteError::from_write(e, "Organization name already exists"))?;

    Ok(OrganizationRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        created_at: now,
    })
}

/// Get an organization by ID
pub async fn get_organization(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<OrganizationRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String, i64)>(
        "SELECT id, name, created_at FROM organizations WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, name, created_at)| OrganizationRow {
        id,
        name,
        created_at,
    }))
}

/// List all organizations, oldest first
pub async fn list_organizations(pool: &SqlitePool) -> Result<Vec<OrganizationRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String, i64)>(
        "SELECT id, name, created_at FROM organizations ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, created_at)| OrganizationRow {
            id,
            name,
            created_at,
        })
        .collect())
}

/// Delete an organization and everything it owns in one transaction.
///
/// Projects are removed with their personas, requirements and turns, then
/// clients, then the organization's users (their persona links on other
/// organizations' projects are nulled first).
pub async fn delete_organization(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;

    let project_ids =
        sqlx::query_as::<_, (i64,)>("SELECT id FROM projects WHERE organization_id = ?")
            .bind(id)
            .fetch_all(&mut *tx)
            .await?;

    for (project_id,) in &project_ids {
        delete_project_tree(&mut *tx, *project_id).await?;
    }

    sqlx::query("DELETE FROM clients WHERE organization_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "UPDATE personas SET user_id = NULL WHERE user_id IN (SELECT id FROM users WHERE organization_id = ?)",
    )
    .bind(id)
    .execute(&mut *tx)
    .await?;

    sqlx::query("DELETE FROM users WHERE organization_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM organizations WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tx.commit().await?;
        tracing::debug!(
            organization_id = id,
            projects = project_ids.len(),
            "Organization deleted"
        );
    } else {
        tx.rollback().await?;
    }

    Ok(deleted)
}
