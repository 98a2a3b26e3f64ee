//! Workflow activities

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActivityError {
    #[error("Activity not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Input for the intake processing activity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeInput {
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
}

pub async fn echo_activity(message: String) -> Result<String, ActivityError> {
    tracing::debug!(len = message.len(), "echo_activity");
    Ok(message)
}

/// Requirement processing behind the intake workflow. Not wired to storage yet.
pub async fn process_intake_activity(input: IntakeInput) -> Result<Vec<String>, ActivityError> {
    tracing::debug!(project_id = input.project_id, "process_intake_activity");
    Err(ActivityError::NotImplemented("process_intake_activity"))
}
