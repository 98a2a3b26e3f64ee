//! Core application infrastructure

pub(crate) mod banner;
pub mod cli;
pub mod config;
pub mod constants;
pub mod shutdown;
pub mod storage;
pub mod telemetry;

pub use crate::app::CoreApp;
pub use cli::{CliConfig, Commands};
pub use config::{AppConfig, DatabaseLocation, ServerConfig, WorkerConfig};
pub use storage::{AppStorage, DataSubdir};

// Re-export service enums from data layer
pub use crate::data::{SqliteService, TransactionalService};

pub use shutdown::ShutdownService;
