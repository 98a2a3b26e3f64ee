//! Development identity headers
//!
//! `x-dev-user: email|role1,role2`, or `x-dev-user: email` together with
//! `x-dev-roles: role1,role2`. The roles header wins when both are sent.

use crate::core::constants::{ALLOWED_ROLES, DEFAULT_ROLE};

/// Reason a development header could not be turned into an identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevHeaderError {
    MissingEmail,
}

/// Keep known roles in first-seen order. Falls back to the default role.
pub fn parse_roles(raw: Option<&str>) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for item in raw.unwrap_or_default().split(',') {
        let role = item.trim().to_lowercase();
        if ALLOWED_ROLES.contains(&role.as_str()) && !roles.contains(&role) {
            roles.push(role);
        }
    }
    if roles.is_empty() {
        roles.push(DEFAULT_ROLE.to_string());
    }
    roles
}

/// Split `email|roles` into the email and its parsed roles
pub fn parse_dev_user(value: &str) -> Result<(String, Vec<String>), DevHeaderError> {
    let (email, roles) = match value.split_once('|') {
        Some((email, roles)) => (email, Some(roles)),
        None => (value, None),
    };
    let email = email.trim();
    if email.is_empty() {
        return Err(DevHeaderError::MissingEmail);
    }
    Ok((email.to_string(), parse_roles(roles)))
}
