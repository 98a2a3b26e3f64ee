// =============================================================================
// Application Identity
// =============================================================================

/// Application name in title case (for display and platform directories)
pub const APP_NAME: &str = "AiPm";

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "aipm";

/// Unix-style dotfile folder name
pub const APP_DOT_FOLDER: &str = ".aipm";

/// API version reported by the health probe and the OpenAPI document
pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name (looked up in the working directory)
pub const CONFIG_FILE_NAME: &str = "aipm.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "AIPM_CONFIG";

// =============================================================================
// Environment Variables - Server
// =============================================================================

/// Environment variable for server host
pub const ENV_HOST: &str = "AIPM_HOST";

/// Environment variable for server port
pub const ENV_PORT: &str = "AIPM_PORT";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "AIPM_LOG";

/// Deployment environment name (development, staging, production)
pub const ENV_ENVIRONMENT: &str = "ENVIRONMENT";

// =============================================================================
// Server Defaults
// =============================================================================

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default deployment environment
pub const DEFAULT_ENVIRONMENT: &str = "development";

// =============================================================================
// Environment Variables - Storage
// =============================================================================

/// Environment variable to override data directory
pub const ENV_DATA_DIR: &str = "AIPM_DATA_DIR";

/// Database connection string (`sqlite://path`, `sqlite:///abs/path`, `sqlite::memory:`)
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";

// =============================================================================
// SQLite
// =============================================================================

/// SQLite database filename inside the data directory
pub const SQLITE_DB_FILENAME: &str = "aipm.db";

/// Maximum pooled connections
pub const SQLITE_MAX_CONNECTIONS: u32 = 5;

/// Busy timeout before a locked write fails
pub const SQLITE_BUSY_TIMEOUT_SECS: u64 = 30;

/// Page cache size (negative = KiB)
pub const SQLITE_CACHE_SIZE: &str = "-64000";

/// WAL pages before an automatic checkpoint
pub const SQLITE_WAL_AUTOCHECKPOINT: &str = "1000";

/// Interval for the background WAL checkpoint task
pub const SQLITE_CHECKPOINT_INTERVAL_SECS: u64 = 300;

// =============================================================================
// API
// =============================================================================

/// Default request body limit
pub const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Development identity header (`email|role1,role2`)
pub const HEADER_DEV_USER: &str = "x-dev-user";

/// Development roles header (`role1,role2`)
pub const HEADER_DEV_ROLES: &str = "x-dev-roles";

/// Roles accepted from the development identity headers
pub const ALLOWED_ROLES: &[&str] = &["admin", "lead", "client"];

/// Role assigned when none of the supplied roles are recognised
pub const DEFAULT_ROLE: &str = "client";

// =============================================================================
// Field Limits
// =============================================================================

/// Maximum length for names and display names
pub const MAX_NAME_LEN: u64 = 255;

/// Maximum length for project descriptions
pub const MAX_DESCRIPTION_LEN: u64 = 2000;

// =============================================================================
// Workflow Worker
// =============================================================================

/// Task queue served by the worker
pub const DEFAULT_TASK_QUEUE: &str = "ai-pm-default";

/// Workflow namespace
pub const DEFAULT_NAMESPACE: &str = "default";

/// Schedule-to-close timeout for a single activity
pub const DEFAULT_ACTIVITY_TIMEOUT_SECS: u64 = 10;

/// Pending workflow requests buffered before senders wait
pub const WORKFLOW_QUEUE_CAPACITY: usize = 256;

// =============================================================================
// Shutdown
// =============================================================================

/// Maximum time to wait for background tasks on shutdown
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 30;
