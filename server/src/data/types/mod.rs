//! Shared data types for the transactional store

mod enums;
mod transactional;

pub use enums::{PersonaRole, ProjectStatus, RequirementType};

pub use transactional::{
    ClientRow, ConversationTurnRow, NewConversationTurn, NewPersona, NewProject, NewRequirement,
    OrganizationRow, PersonaChanges, PersonaRow, ProjectChanges, ProjectFilter, ProjectRow,
    ProjectSummaryRow, RequirementChanges, RequirementRow, UserRow,
};
