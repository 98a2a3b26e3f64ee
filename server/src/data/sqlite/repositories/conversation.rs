//! Conversation turn repository for SQLite operations
//!
//! Turns are append-only. The embedding vector is stored as a JSON array.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{ConversationTurnRow, NewConversationTurn};
use crate::utils::time::now_micros;

type TurnTuple = (String, i64, String, String, String, i64);

fn to_row(
    (id, project_id, persona_id, text, embedding, created_at): TurnTuple,
) -> Result<ConversationTurnRow, SqliteError> {
    let embedding = serde_json::from_str(&embedding).map_err(|_| SqliteError::InvalidData {
        column: "conversation_turns.embedding",
        value: embedding.clone(),
    })?;

    Ok(ConversationTurnRow {
        id,
        project_id,
        persona_id,
        text,
        embedding,
        created_at,
    })
}

/// Append a conversation turn
pub async fn create_turn(
    pool: &SqlitePool,
    turn: &NewConversationTurn,
) -> Result<ConversationTurnRow, SqliteError> {
    let id = uuid::Uuid::new_v4().to_string();
    let now = now_micros();
    let embedding = serde_json::to_string(&turn.embedding).map_err(|e| {
        SqliteError::InvalidData {
            column: "conversation_turns.embedding",
            value: e.to_string(),
        }
    })?;

    sqlx::query(
        "INSERT INTO conversation_turns (id, project_id, persona_id, text, embedding, created_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(turn.project_id)
    .bind(&turn.persona_id)
    .bind(&turn.text)
    .bind(&embedding)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SqliteError::from_write(e, "Conversation parent was removed concurrently"))?;

    Ok(ConversationTurnRow {
        id,
        project_id: turn.project_id,
        persona_id: turn.persona_id.clone(),
        text: turn.text.clone(),
        embedding: turn.embedding.clone(),
        created_at: now,
    })
}

/// List turns of a project, optionally for one persona, oldest first
pub async fn list_for_project(
    pool: &SqlitePool,
    project_id: i64,
    persona_id: Option<&str>,
) -> Result<Vec<ConversationTurnRow>, SqliteError> {
    let rows = sqlx::query_as::<_, TurnTuple>(
        r#"
        SELECT id, project_id, persona_id, text, embedding, created_at
        FROM conversation_turns
        WHERE project_id = ?1 AND (?2 IS NULL OR persona_id = ?2)
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(project_id)
    .bind(persona_id)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(to_row).collect()
}
