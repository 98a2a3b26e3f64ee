//! API route handlers

pub mod auth;
pub mod clients;
pub mod conversations;
pub mod health;
pub mod intake;
pub mod organizations;
pub mod personas;
pub mod projects;
pub mod requirements;
pub mod users;
