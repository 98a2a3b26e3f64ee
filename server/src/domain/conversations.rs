//! Conversation turns (append-only)

use crate::data::TransactionalRepository;
use crate::data::types::{ConversationTurnRow, NewConversationTurn};

use super::error::{DomainError, DomainResult};
use super::intake::embed_text;
use super::validate::{require_persona_in_project, require_project};

/// Record a turn for a persona of the project, embedding its text
pub async fn create_turn(
    repo: &dyn TransactionalRepository,
    project_id: i64,
    persona_id: &str,
    text: &str,
) -> DomainResult<ConversationTurnRow> {
    if text.trim().is_empty() {
        return Err(DomainError::validation("Conversation text must not be empty"));
    }
    require_persona_in_project(repo, persona_id, project_id).await?;

    let turn = NewConversationTurn {
        project_id,
        persona_id: persona_id.to_string(),
        text: text.to_string(),
        embedding: embed_text(text),
    };
    Ok(repo.create_conversation_turn(&turn).await?)
}

pub async fn list_turns(
    repo: &dyn TransactionalRepository,
    project_id: i64,
    persona_id: Option<&str>,
) -> DomainResult<Vec<ConversationTurnRow>> {
    match persona_id {
        Some(persona_id) => {
            require_persona_in_project(repo, persona_id, project_id).await?;
        }
        None => {
            require_project(repo, project_id).await?;
        }
    }
    Ok(repo.list_conversation_turns(project_id, persona_id).await?)
}
