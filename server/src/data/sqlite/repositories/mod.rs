//! SQLite repositories
//!
//! Types (ProjectRow, PersonaRow, etc.) should be imported from `crate::data::types`.

pub mod client;
pub mod conversation;
pub mod organization;
pub mod persona;
pub mod project;
pub mod requirement;
pub mod user;

pub use client::{create_client, get_client, list_for_org as list_clients_for_org};
pub use conversation::{create_turn, list_for_project as list_turns_for_project};
pub use organization::{
    create_organization, delete_organization, get_organization, list_organizations,
};
pub use persona::{
    create_persona, delete_persona, get_persona, list_for_project as list_personas_for_project,
    update_persona,
};
pub use project::{
    create_project, delete_project, get_project, list_summaries, requirement_type_counts,
    update_project,
};
pub use requirement::{
    create_requirement, create_requirements, delete_requirement, get_requirement,
    list_for_project as list_requirements_for_project, update_requirement,
};
pub use user::{create_user, delete_user, get_user, list_users};
