//! Authentication module
//!
//! Development-mode identity only. Bearer tokens are recognised but not
//! verified.

mod dev;
mod extractors;

pub use dev::{parse_dev_user, parse_roles};
pub use extractors::AuthenticatedUser;
