//! Persona repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{NewPersona, PersonaChanges, PersonaRole, PersonaRow};
use crate::utils::time::now_micros;

type PersonaTuple = (String, i64, Option<i64>, String, String, i64, i64);

fn to_row(
    (id, project_id, user_id, role, display_name, created_at, updated_at): PersonaTuple,
) -> Result<PersonaRow, SqliteError> {
    let role = PersonaRole::parse(&role).ok_or(SqliteError::InvalidData {
        column: "personas.role",
        value: role,
    })?;

    Ok(PersonaRow {
        id,
        project_id,
        user_id,
        role,
        display_name,
        created_at,
        updated_at,
    })
}

/// Create a persona with a fresh UUID
pub async fn create_persona(
    pool: &SqlitePool,
    persona: &NewPersona,
) -> Result<PersonaRow, SqliteError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_micros();

    sqlx::query(
        "INSERT INTO personas (id, project_id, user_id, role, display_name, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(persona.project_id)
    .bind(persona.user_id)
    .bind(persona.role.as_str())
    .bind(&persona.display_name)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SqliteError::from_write(e, "Persona parent was removed concurrently"))?;

    Ok(PersonaRow {
        id,
        project_id: persona.project_id,
        user_id: persona.user_id,
        role: persona.role,
        display_name: persona.display_name.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Get a persona by ID
pub async fn get_persona(pool: &SqlitePool, id: &str) -> Result<Option<PersonaRow>, SqliteError> {
    let row = sqlx::query_as::<_, PersonaTuple>(
        r#"
        SELECT id, project_id, user_id, role, display_name, created_at, updated_at
        FROM personas
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(to_row).transpose()
}

/// List personas of a project in creation order
pub async fn list_for_project(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<PersonaRow>, SqliteError> {
    let rows = sqlx::query_as::<_, PersonaTuple>(
        r#"
        SELECT id, project_id, user_id, role, display_name, created_at, updated_at
        FROM personas
        WHERE project_id = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(to_row).collect()
}

/// Apply a change set to a persona. Returns `None` when the persona is gone.
pub async fn update_persona(
    pool: &SqlitePool,
    id: &str,
    changes: &PersonaChanges,
) -> Result<Option<PersonaRow>, SqliteError> {
    let result = sqlx::query(
        r#"
        UPDATE personas SET
            role = COALESCE(?, role),
            display_name = COALESCE(?, display_name),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(changes.role.map(|r| r.as_str()))
    .bind(changes.display_name.as_deref())
    .bind(now_micros())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_persona(pool, id).await
}

/// Delete a persona with its requirements and conversation turns
pub async fn delete_persona(pool: &SqlitePool, id: &str) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM requirements WHERE persona_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM conversation_turns WHERE persona_id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM personas WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tx.commit().await?;
    } else {
        tx.rollback().await?;
    }

    Ok(deleted)
}
