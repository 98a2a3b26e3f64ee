//! Closed enumerations stored as lowercase text
//!
//! Each enum parses from its storage string with [`parse`](ProjectStatus::parse)
//! and renders back with `as_str`. Unknown strings never map to a variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

// ============================================================================
// Project status
// ============================================================================

/// Project lifecycle status
///
/// Transitions are unconstrained: any status may follow any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    #[default]
    Active,
    Paused,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub const ALL: [Self; 5] = [
        Self::Planned,
        Self::Active,
        Self::Paused,
        Self::Completed,
        Self::Archived,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Persona role
// ============================================================================

/// Stakeholder role a persona plays on a project
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum PersonaRole {
    Client,
    Lead,
    Developer,
    PmAgent,
}

impl PersonaRole {
    pub const ALL: [Self; 4] = [Self::Client, Self::Lead, Self::Developer, Self::PmAgent];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Lead => "lead",
            Self::Developer => "developer",
            Self::PmAgent => "pm_agent",
        }
    }
}

impl fmt::Display for PersonaRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Requirement type
// ============================================================================

/// Requirement classification used for rollups
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RequirementType {
    #[default]
    Feature,
    Bug,
    Improvement,
    Constraint,
}

impl RequirementType {
    pub const ALL: [Self; 4] = [Self::Feature, Self::Bug, Self::Improvement, Self::Constraint];

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Bug => "bug",
            Self::Improvement => "improvement",
            Self::Constraint => "constraint",
        }
    }
}

impl fmt::Display for RequirementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
