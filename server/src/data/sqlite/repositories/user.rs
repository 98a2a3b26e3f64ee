//! User repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::UserRow;
use crate::utils::time::now_micros;

type UserTuple = (i64, String, Option<i64>, i64);

fn to_row((id, email, organization_id, created_at): UserTuple) -> UserRow {
    UserRow {
        id,
        email,
        organization_id,
        created_at,
    }
}

/// Create a new user. Emails are unique across the store.
pub async fn create_user(
    pool: &SqlitePool,
    email: &str,
    organization_id: Option<i64>,
) -> Result<UserRow, SqliteError> {
    let now = now_micros();

    let result =
        sqlx::query("INSERT INTO users (email, organization_id, created_at) VALUES (?, ?, ?)")
            .bind(email)
            .bind(organization_id)
            .bind(now)
            .execute(pool)
            .await
            .map_err(|e| SqliteError::from_write(e, "User email already exists"))?;

    Ok(UserRow {
        id: result.last_insert_rowid(),
        email: email.to_string(),
        organization_id,
        created_at: now,
    })
}

/// Get a user by ID
pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<Option<UserRow>, SqliteError> {
    let row = sqlx::query_as::<_, UserTuple>(
        "SELECT id, email, organization_id, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(to_row))
}

/// List users, optionally restricted to one organization
pub async fn list_users(
    pool: &SqlitePool,
    organization_id: Option<i64>,
) -> Result<Vec<UserRow>, SqliteError> {
    let rows = sqlx::query_as::<_, UserTuple>(
        r#"
        SELECT id, email, organization_id, created_at
        FROM users
        WHERE (?1 IS NULL OR organization_id = ?1)
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(organization_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(to_row).collect())
}

/// Delete a user. Personas pointing at the user stay, with the link nulled.
pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let mut tx = pool.begin().await?;

    sqlx::query("UPDATE personas SET user_id = NULL, updated_at = ? WHERE user_id = ?")
        .bind(now_micros())
        .bind(id)
        .execute(&mut *tx)
        .await?;

    let result = sqlx::query("DELETE FROM users WHERE id = ?")
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{organization, persona, project};
    use crate::data::sqlite::setup_test_pool;
    use crate::data::types::{NewPersona, NewProject, PersonaRole, ProjectStatus};

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = setup_test_pool().await;
        let user = create_user(&pool, "ana@example.com", None).await.unwrap();

        assert!(user.id > 0);
        assert_eq!(user.organization_id, None);

        let fetched = get_user(&pool, user.id).await.unwrap();
        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let pool = setup_test_pool().await;
        create_user(&pool, "ana@example.com", None).await.unwrap();

        let err = create_user(&pool, "ana@example.com", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_users_by_organization() {
        let pool = setup_test_pool().await;
        let org = organization::create_organization(&pool, "Acme")
            .await
            .unwrap();
        create_user(&pool, "a@acme.test", Some(org.id))
            .await
            .unwrap();
        create_user(&pool, "loner@example.com", None).await.unwrap();
        create_user(&pool, "b@acme.test", Some(org.id))
            .await
            .unwrap();

        let all = list_users(&pool, None).await.unwrap();
        assert_eq!(all.len(), 3);

        let members = list_users(&pool, Some(org.id)).await.unwrap();
        let emails: Vec<_> = members.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, ["a@acme.test", "b@acme.test"]);
    }

    #[tokio::test]
    async fn test_delete_user_nulls_persona_link() {
        let pool = setup_test_pool().await;
        let org = organization::create_organization(&pool, "Acme")
            .await
            .unwrap();
        let user = create_user(&pool, "a@acme.test", Some(org.id))
            .await
            .unwrap();
        let project = project::create_project(
            &pool,
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
            &pool,
            &NewPersona {
                project_id: project.id,
                user_id: Some(user.id),
                role: PersonaRole::Client,
                display_name: "Buyer".into(),
            },
        )
        .await
        .unwrap();

        assert!(delete_user(&pool, user.id).await.unwrap());
        assert!(get_user(&pool, user.id).await.unwrap().is_none());

        let persona = persona::get_persona(&pool, &persona.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(persona.user_id, None);
        assert!(!delete_user(&pool, user.id).await.unwrap());
    }
}
