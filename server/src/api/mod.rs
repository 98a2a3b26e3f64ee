//! API server and routes

pub mod auth;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
mod server;
pub mod types;

pub use server::{ApiServer, router};
