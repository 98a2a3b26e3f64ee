//! Row and change-set types for the transactional store
//!
//! Organization, user, client and project ids are integer surrogates.
//! Persona, requirement and conversation turn ids are UUID v4 strings.
//! Timestamps are unix microseconds.

use serde::{Deserialize, Serialize};

use super::enums::{PersonaRole, ProjectStatus, RequirementType};

// ============================================================================
// Organization / User / Client
// ============================================================================

/// Organization row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationRow {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}

/// User row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    /// NULL when the user is not attached to an organization
    pub organization_id: Option<i64>,
    pub created_at: i64,
}

/// Client row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRow {
    pub id: i64,
    pub name: String,
    pub organization_id: i64,
    pub created_at: i64,
}

// ============================================================================
// Project
// ============================================================================

/// Project row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub organization_id: i64,
    pub client_id: Option<i64>,
    pub created_at: i64,
}

/// Project with listing rollups (outer-joined counts, zero when absent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummaryRow {
    pub project: ProjectRow,
    pub persona_count: u64,
    pub requirement_count: u64,
}

/// Filters for project listing. The organization is always required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectFilter {
    pub organization_id: i64,
    pub client_id: Option<i64>,
    /// Matches projects with at least one persona assigned to this user
    pub user_id: Option<i64>,
}

/// Fields for a new project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub organization_id: i64,
    pub client_id: Option<i64>,
    pub status: ProjectStatus,
}

/// Project fields to change. `None` leaves a column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectChanges {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub status: Option<ProjectStatus>,
}

impl ProjectChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.status.is_none()
    }
}

// ============================================================================
// Persona
// ============================================================================

/// Persona row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaRow {
    pub id: String,
    pub project_id: i64,
    /// NULL when unassigned or the user was deleted
    pub user_id: Option<i64>,
    pub role: PersonaRole,
    pub display_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields for a new persona
#[derive(Debug, Clone)]
pub struct NewPersona {
    pub project_id: i64,
    pub user_id: Option<i64>,
    pub role: PersonaRole,
    pub display_name: String,
}

/// Persona fields to change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersonaChanges {
    pub role: Option<PersonaRole>,
    pub display_name: Option<String>,
}

impl PersonaChanges {
    pub fn is_empty(&self) -> bool {
        self.role.is_none() && self.display_name.is_none()
    }
}

// ============================================================================
// Requirement
// ============================================================================

/// Requirement row from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementRow {
    pub id: String,
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    pub requirement_type: RequirementType,
    pub confidence: Option<f64>,
    pub cluster_id: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Fields for a new requirement
#[derive(Debug, Clone)]
pub struct NewRequirement {
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    pub requirement_type: RequirementType,
    pub confidence: Option<f64>,
    pub cluster_id: Option<String>,
}

/// Requirement fields to change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementChanges {
    pub requirement_type: Option<RequirementType>,
    /// `Some(None)` clears the confidence
    pub confidence: Option<Option<f64>>,
}

impl RequirementChanges {
    pub fn is_empty(&self) -> bool {
        self.requirement_type.is_none() && self.confidence.is_none()
    }
}

// ============================================================================
// Conversation turn
// ============================================================================

/// Conversation turn row from database (append-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurnRow {
    pub id: String,
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    pub embedding: Vec<f64>,
    pub created_at: i64,
}

/// Fields for a new conversation turn
#[derive(Debug, Clone)]
pub struct NewConversationTurn {
    pub project_id: i64,
    pub persona_id: String,
    pub text: String,
    pub embedding: Vec<f64>,
}
