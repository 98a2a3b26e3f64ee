//! Requirement repository for SQLite operations

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::{NewRequirement, RequirementChanges, RequirementRow, RequirementType};
use crate::utils::time::now_micros;

type RequirementTuple = (
    String,
    i64,
    String,
    String,
    String,
    Option<f64>,
    Option<String>,
    i64,
    i64,
);

const SELECT_COLUMNS: &str = "SELECT id, project_id, persona_id, text, type, confidence, \
    cluster_id, created_at, updated_at FROM requirements";

fn to_row(row: RequirementTuple) -> Result<RequirementRow, SqliteError> {
    let (id, project_id, persona_id, text, kind, confidence, cluster_id, created_at, updated_at) =
        row;
    let requirement_type = RequirementType::parse(&kind).ok_or(SqliteError::InvalidData {
        column: "requirements.type",
        value: kind,
    })?;

    Ok(RequirementRow {
        id,
        project_id,
        persona_id,
        text,
        requirement_type,
        confidence,
        cluster_id,
        created_at,
        updated_at,
    })
}

async fn insert(
    conn: &mut SqliteConnection,
    requirement: &NewRequirement,
) -> Result<RequirementRow, SqliteError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_micros();

    sqlx::query(
        "INSERT INTO requirements (id, project_id, persona_id, text, type, confidence, cluster_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(requirement.project_id)
    .bind(&requirement.persona_id)
    .bind(&requirement.text)
    .bind(requirement.requirement_type.as_str())
    .bind(requirement.confidence)
    .bind(requirement.cluster_id.as_deref())
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await
    .map_err(|e| SqliteError::from_write(e, "Requirement parent was removed concurrently"))?;

    Ok(RequirementRow {
        id,
        project_id: requirement.project_id,
        persona_id: requirement.persona_id.clone(),
        text: requirement.text.clone(),
        requirement_type: requirement.requirement_type,
        confidence: requirement.confidence,
        cluster_id: requirement.cluster_id.clone(),
        created_at: now,
        updated_at: now,
    })
}

/// Create a single requirement
pub async fn create_requirement(
    pool: &SqlitePool,
    requirement: &NewRequirement,
) -> Result<RequirementRow, SqliteError> {
    let mut conn = pool.acquire().await?;
    insert(&mut *conn, requirement).await
}

/// Create several requirements atomically, preserving input order
pub async fn create_requirements(
    pool: &SqlitePool,
    requirements: &[NewRequirement],
) -> Result<Vec<RequirementRow>, SqliteError> {
    let mut tx = pool.begin().await?;

    let mut created = Vec::with_capacity(requirements.len());
    for requirement in requirements {
        created.push(insert(&mut *tx, requirement).await?);
    }

    tx.commit().await?;
    Ok(created)
}

/// Get a requirement by ID
pub async fn get_requirement(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<RequirementRow>, SqliteError> {
    let row = sqlx::query_as::<_, RequirementTuple>(&format!("{SELECT_COLUMNS} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(to_row).transpose()
}

/// List requirements of a project, optionally for one persona, oldest first
pub async fn list_for_project(
    pool: &SqlitePool,
    project_id: i64,
    persona_id: Option<&str>,
) -> Result<Vec<RequirementRow>, SqliteError> {
    let sql = format!(
        "{SELECT_COLUMNS} WHERE project_id = ?1 AND (?2 IS NULL OR persona_id = ?2) ORDER BY created_at ASC, rowid ASC"
    );
    let rows = sqlx::query_as::<_, RequirementTuple>(&sql)
        .bind(project_id)
        .bind(persona_id)
        .fetch_all(pool)
        .await?;

    rows.into_iter().map(to_row).collect()
}

/// Apply a change set to a requirement. Returns `None` when it is gone.
pub async fn update_requirement(
    pool: &SqlitePool,
    id: &str,
    changes: &RequirementChanges,
) -> Result<Option<RequirementRow>, SqliteError> {
    let (set_confidence, confidence) = match changes.confidence {
        Some(value) => (true, value),
        None => (false, None),
    };

    let result = sqlx::query(
        r#"
        UPDATE requirements SET
            type = COALESCE(?1, type),
            confidence = CASE WHEN ?2 THEN ?3 ELSE confidence END,
            updated_at = ?4
        WHERE id = ?5
        "#,
    )
    .bind(changes.requirement_type.map(|t| t.as_str()))
    .bind(set_confidence)
    .bind(confidence)
    .bind(now_micros())
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_requirement(pool, id).await
}

/// Delete a requirement by ID
pub async fn delete_requirement(pool: &SqlitePool, id: &str) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM requirements WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{organization, persona, project};
    use crate::data::sqlite::setup_test_pool;
    use crate::data::types::{NewPersona, NewProject, PersonaRole, ProjectStatus};

    async fn setup(pool: &SqlitePool) -> (i64, String) {
        let org = organization::create_organization(pool, "Acme")
            .await
            .unwrap();
        let project = project::create_project(
            pool,
            &NewProject {
                name: "Portal".into(),
                description: None,
                organization_id: org.id,
                client_id: None,
                status: ProjectStatus::Active,
            },
        )
        .await
        .unwrap();
        let persona = persona::create_persona(
            pool,
            &NewPersona {
                project_id: project.id,
                user_id: None,
                role: PersonaRole::Client,
                display_name: "Buyer".into(),
            },
        )
        .await
        .unwrap();
        (project.id, persona.id)
    }

    fn new_requirement(project_id: i64, persona_id: &str, text: &str) -> NewRequirement {
        NewRequirement {
            project_id,
            persona_id: persona_id.to_string(),
            text: text.into(),
            requirement_type: RequirementType::Feature,
            confidence: Some(0.5),
            cluster_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_requirement() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;

        let created = create_requirement(&pool, &new_requirement(project_id, &persona_id, "Login"))
            .await
            .unwrap();
        assert_eq!(created.confidence, Some(0.5));

        let fetched = get_requirement(&pool, &created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_create_requirements_batch_keeps_order() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;

        let batch = vec![
            new_requirement(project_id, &persona_id, "Enable offline access"),
            new_requirement(project_id, &persona_id, "Support automatic backups"),
        ];
        let created = create_requirements(&pool, &batch).await.unwrap();
        assert_eq!(created.len(), 2);

        let listed = list_for_project(&pool, project_id, Some(&persona_id))
            .await
            .unwrap();
        let texts: Vec<_> = listed.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(
            texts,
            ["Enable offline access", "Support automatic backups"]
        );
    }

    #[tokio::test]
    async fn test_create_requirements_batch_is_atomic() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;

        let batch = vec![
            new_requirement(project_id, &persona_id, "Fine"),
            new_requirement(project_id, "no-such-persona", "Broken"),
        ];
        assert!(create_requirements(&pool, &batch).await.is_err());
        assert!(
            list_for_project(&pool, project_id, None)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_persona() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;
        let other = persona::create_persona(
            &pool,
            &NewPersona {
                project_id,
                user_id: None,
                role: PersonaRole::Developer,
                display_name: "Dev".into(),
            },
        )
        .await
        .unwrap();

        create_requirement(&pool, &new_requirement(project_id, &persona_id, "Mine"))
            .await
            .unwrap();
        create_requirement(&pool, &new_requirement(project_id, &other.id, "Theirs"))
            .await
            .unwrap();

        assert_eq!(
            list_for_project(&pool, project_id, None)
                .await
                .unwrap()
                .len(),
            2
        );
        let mine = list_for_project(&pool, project_id, Some(&persona_id))
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].text, "Mine");
    }

    #[tokio::test]
    async fn test_update_requirement_clears_confidence() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;
        let created = create_requirement(&pool, &new_requirement(project_id, &persona_id, "Login"))
            .await
            .unwrap();

        let retype = RequirementChanges {
            requirement_type: Some(RequirementType::Bug),
            confidence: None,
        };
        let updated = update_requirement(&pool, &created.id, &retype)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.requirement_type, RequirementType::Bug);
        assert_eq!(updated.confidence, Some(0.5));

        let clear = RequirementChanges {
            requirement_type: None,
            confidence: Some(None),
        };
        let cleared = update_requirement(&pool, &created.id, &clear)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.confidence, None);
        assert_eq!(cleared.requirement_type, RequirementType::Bug);
    }

    #[tokio::test]
    async fn test_delete_requirement() {
        let pool = setup_test_pool().await;
        let (project_id, persona_id) = setup(&pool).await;
        let created = create_requirement(&pool, &new_requirement(project_id, &persona_id, "Login"))
            .await
            .unwrap();

        assert!(delete_requirement(&pool, &created.id).await.unwrap());
        assert!(!delete_requirement(&pool, &created.id).await.unwrap());
    }
}
