//! SQLite schema definitions
//!
//! Fresh databases receive the complete schema at [`SCHEMA_VERSION`].
//! Older databases are brought forward by the versioned migrations.

/// Current schema version
pub const SCHEMA_VERSION: i32 = 2;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Organizations
-- =============================================================================
CREATE TABLE IF NOT EXISTS organizations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE CHECK(length(name) >= 1 AND length(name) <= 255),
    created_at INTEGER NOT NULL
);

-- =============================================================================
-- 2. Users (organization optional)
-- =============================================================================
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT NOT NULL UNIQUE CHECK(length(email) >= 3 AND length(email) <= 255),
    organization_id INTEGER REFERENCES organizations(id) ON DELETE SET NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_users_organization ON users(organization_id);

-- =============================================================================
-- 3. Clients
-- =============================================================================
CREATE TABLE IF NOT EXISTS clients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 255),
    organization_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_clients_organization ON clients(organization_id);

-- =============================================================================
-- 4. Projects
-- =============================================================================
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK(length(name) >= 1 AND length(name) <= 255),
    description TEXT CHECK(description IS NULL OR length(description) <= 2000),
    status TEXT NOT NULL DEFAULT 'active'
        CHECK(status IN ('planned', 'active', 'paused', 'completed', 'archived')),
    organization_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
    client_id INTEGER REFERENCES clients(id) ON DELETE SET NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_projects_organization ON projects(organization_id, created_at);
CREATE INDEX IF NOT EXISTS idx_projects_client ON projects(client_id);

-- =============================================================================
-- 5. Personas (project-owned, optionally linked to a user)
-- =============================================================================
CREATE TABLE IF NOT EXISTS personas (
    id TEXT PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    user_id INTEGER REFERENCES users(id) ON DELETE SET NULL,
    role TEXT NOT NULL CHECK(role IN ('client', 'lead', 'developer', 'pm_agent')),
    display_name TEXT NOT NULL CHECK(length(display_name) >= 1 AND length(display_name) <= 255),
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_personas_project ON personas(project_id, created_at);
CREATE INDEX IF NOT EXISTS idx_personas_user ON personas(user_id);

-- =============================================================================
-- 6. Requirements (owned jointly by project and persona)
-- =============================================================================
CREATE TABLE IF NOT EXISTS requirements (
    id TEXT PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    persona_id TEXT NOT NULL REFERENCES personas(id) ON DELETE CASCADE,
    text TEXT NOT NULL CHECK(length(text) >= 1),
    type TEXT NOT NULL CHECK(type IN ('feature', 'bug', 'improvement', 'constraint')),
    confidence REAL CHECK(confidence IS NULL OR (confidence >= 0.0 AND confidence <= 1.0)),
    cluster_id TEXT,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_requirements_project ON requirements(project_id, created_at);
CREATE INDEX IF NOT EXISTS idx_requirements_persona ON requirements(persona_id);
CREATE INDEX IF NOT EXISTS idx_requirements_cluster ON requirements(cluster_id);

-- =============================================================================
-- 7. Conversation turns (append-only)
-- =============================================================================
CREATE TABLE IF NOT EXISTS conversation_turns (
    id TEXT PRIMARY KEY,
    project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
    persona_id TEXT NOT NULL REFERENCES personas(id) ON DELETE CASCADE,
    text TEXT NOT NULL,
    embedding TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_conversation_turns_project ON conversation_turns(project_id, created_at);
CREATE INDEX IF NOT EXISTS idx_conversation_turns_persona ON conversation_turns(persona_id);
"#;

/// Version 2: index requirements by cluster for grouping lookups
pub const MIGRATION_V2: &str =
    "CREATE INDEX IF NOT EXISTS idx_requirements_cluster ON requirements(cluster_id)";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn test_schema_version_is_positive() {
        assert!(SCHEMA_VERSION > 0);
    }

    #[test]
    fn test_schema_contains_required_tables() {
        let required_tables = [
            "schema_version",
            "schema_migrations",
            "organizations",
            "users",
            "clients",
            "projects",
            "personas",
            "requirements",
            "conversation_turns",
        ];

        for table in required_tables {
            assert!(
                SCHEMA.contains(&format!("CREATE TABLE IF NOT EXISTS {}", table)),
                "Schema missing table: {}",
                table
            );
        }
    }

    #[test]
    fn test_latest_migration_is_part_of_schema() {
        assert!(SCHEMA.contains(MIGRATION_V2));
    }
}
