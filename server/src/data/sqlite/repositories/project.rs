//! Project repository for SQLite operations
//!
//! Listing rollups are computed with outer-joined grouped counts so projects
//! without personas or requirements still appear with zero.

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::{
    NewProject, ProjectChanges, ProjectFilter, ProjectRow, ProjectStatus, ProjectSummaryRow,
    RequirementType,
};
use crate::utils::time::now_micros;

type ProjectTuple = (i64, String, Option<String>, String, i64, Option<i64>, i64);

/// Project columns followed by persona and requirement counts
type SummaryTuple = (i64, String, Option<String>, String, i64, Option<i64>, i64, i64, i64);

fn to_row(
    (id, name, description, status, organization_id, client_id, created_at): ProjectTuple,
) -> Result<ProjectRow, SqliteError> {
    let status = ProjectStatus::parse(&status).ok_or(SqliteError::InvalidData {
        column: "projects.status",
        value: status,
    })?;

    Ok(ProjectRow {
        id,
        name,
        description,
        status,
        organization_id,
        client_id,
        created_at,
    })
}

/// Create a new project
pub async fn create_project(
    pool: &SqlitePool,
    project: &NewProject,
) -> Result<ProjectRow, SqliteError> {
    let now = now_micros();

    let result = sqlx::query(
        "INSERT INTO projects (name, description, status, organization_id, client_id, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&project.name)
    .bind(project.description.as_deref())
    .bind(project.status.as_str())
    .bind(project.organization_id)
    .bind(project.client_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SqliteError::from_write(e, "Project parent was removed concurrently"))?;

    Ok(ProjectRow {
        id: result.last_insert_rowid(),
        name: project.name.clone(),
        description: project.description.clone(),
        status: project.status,
        organization_id: project.organization_id,
        client_id: project.client_id,
        created_at: now,
    })
}

/// Get a project by ID
pub async fn get_project(pool: &SqlitePool, id: i64) -> Result<Option<ProjectRow>, SqliteError> {
    let row = sqlx::query_as::<_, ProjectTuple>(
        r#"
        SELECT id, name, description, status, organization_id, client_id, created_at
        FROM projects
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(to_row).transpose()
}

/// List projects of an organization with persona and requirement counts
///
/// `client_id` narrows to one client. `user_id` keeps projects where any
/// persona is assigned to that user. Results are oldest first.
pub async fn list_summaries(
    pool: &SqlitePool,
    filter: &ProjectFilter,
) -> Result<Vec<ProjectSummaryRow>, SqliteError> {
    let rows = sqlx::query_as::<_, SummaryTuple>(
        r#"
        SELECT p.id, p.name, p.description, p.status, p.organization_id, p.client_id, p.created_at,
               COALESCE(pc.persona_count, 0), COALESCE(rc.requirement_count, 0)
        FROM projects p
        LEFT JOIN (
            SELECT project_id, COUNT(*) AS persona_count FROM personas GROUP BY project_id
        ) pc ON pc.project_id = p.id
        LEFT JOIN (
            SELECT project_id, COUNT(*) AS requirement_count FROM requirements GROUP BY project_id
        ) rc ON rc.project_id = p.id
        WHERE p.organization_id = ?1
          AND (?2 IS NULL OR p.client_id = ?2)
          AND (?3 IS NULL OR p.id IN (SELECT project_id FROM personas WHERE user_id = ?3))
        ORDER BY p.created_at ASC, p.id ASC
        "#,
    )
    .bind(filter.organization_id)
    .bind(filter.client_id)
    .bind(filter.user_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let (id, name, description, status, org_id, client_id, created_at, personas, reqs) =
                row;
            Ok(ProjectSummaryRow {
                project: to_row((id, name, description, status, org_id, client_id, created_at))?,
                persona_count: personas as u64,
                requirement_count: reqs as u64,
            })
        })
        .collect()
}

/// Requirement counts for one project, one entry per type that has any
pub async fn requirement_type_counts(
    pool: &SqlitePool,
    project_id: i64,
) -> Result<Vec<(RequirementType, u64)>, SqliteError> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT type, COUNT(*) FROM requirements WHERE project_id = ? GROUP BY type ORDER BY type",
    )
    .bind(project_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(kind, count)| {
            let kind = RequirementType::parse(&kind).ok_or(SqliteError::InvalidData {
                column: "requirements.type",
                value: kind,
            })?;
            Ok((kind, count as u64))
        })
        .collect()
}

/// Apply a change set to a project. Returns `None` when the project is gone.
pub async fn update_project(
    pool: &SqlitePool,
    id: i64,
    changes: &ProjectChanges,
) -> Result<Option<ProjectRow>, SqliteError> {
    let (set_description, description) = match &changes.description {
        Some(value) => (true, value.as_deref()),
        None => (false, None),
    };

    let result = sqlx::query(
        r#"
        UPDATE projects SET
            name = COALESCE(?1, name),
            description = CASE WHEN ?2 THEN ?3 ELSE description END,
            status = COALESCE(?4, status)
        WHERE id = ?5
        "#,
    )
    .bind(changes.name.as_deref())
    .bind(set_description)
    .bind(description)
    .bind(changes.status.map(|s| s.as_str()))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_project(pool, id).await
}

/// Delete a project with its personas, requirements and conversation turns
pub async fn delete_project(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;
    let deleted = delete_project_tree(&mut *tx, id).await?;

    if deleted {
        tx.commit().await?;
        tracing::debug!(project_id = id, "Project deleted");
    } else {
        tx.rollback().await?;
    }

    Ok(deleted)
}

/// Remove a project and all dependents on an open connection (no commit)
pub(crate) async fn delete_project_tree(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<bool, SqliteError> {
    sqlx::query("DELETE FROM requirements WHERE project_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM conversation_turns WHERE project_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    sqlx::query("DELETE FROM personas WHERE project_id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    let result = sqlx::query("DELETE FROM projects WHERE id = ?")
        .bind(id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
