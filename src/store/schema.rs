/// Catalog tables shared by every workspace.
pub const CORE_SCHEMA: &str = r#"
-- Workspaces; each one owns a data database attached under schema_name
CREATE TABLE IF NOT EXISTS workspaces (
    id TEXT PRIMARY KEY,
    display_name TEXT NOT NULL,
    schema_name TEXT NOT NULL UNIQUE,
    is_template INTEGER NOT NULL DEFAULT 0,
    prefilled_at TEXT,               -- NULL = prefill never ran
    created_at TEXT DEFAULT (datetime('now'))
);

-- Admin tokens
CREATE TABLE IF NOT EXISTS tokens (
    id TEXT PRIMARY KEY,
    token_hash TEXT NOT NULL,          -- argon2id hash with embedded salt
    token_lookup TEXT NOT NULL,        -- first 8 chars of ID for fast lookup
    is_admin INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    expires_at TEXT,            -- NULL = never
    last_used_at TEXT
);

-- Objects of a workspace's data model
CREATE TABLE IF NOT EXISTS object_metadata (
    id TEXT PRIMARY KEY,
    workspace_id TEXT NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
    standard_id TEXT,                -- NULL only for custom objects
    name_singular TEXT NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(workspace_id, name_singular)
);

CREATE TABLE IF NOT EXISTS field_metadata (
    id TEXT PRIMARY KEY,
    object_metadata_id TEXT NOT NULL REFERENCES object_metadata(id) ON DELETE CASCADE,
    workspace_id TEXT NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
    standard_id TEXT,
    name TEXT NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),

    UNIQUE(object_metadata_id, name)
);

CREATE TABLE IF NOT EXISTS feature_flags (
    id TEXT PRIMARY KEY,
    key TEXT NOT NULL,
    value INTEGER NOT NULL DEFAULT 0,
    workspace_id TEXT NOT NULL REFERENCES workspaces(id) ON DELETE CASCADE,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT,

    UNIQUE(workspace_id, key)
);

CREATE UNIQUE INDEX IF NOT EXISTS idx_workspaces_template ON workspaces(is_template) WHERE is_template = 1;
CREATE UNIQUE INDEX IF NOT EXISTS idx_tokens_lookup ON tokens(token_lookup);
CREATE INDEX IF NOT EXISTS idx_object_metadata_workspace ON object_metadata(workspace_id);
CREATE INDEX IF NOT EXISTS idx_field_metadata_object ON field_metadata(object_metadata_id);
CREATE INDEX IF NOT EXISTS idx_feature_flags_workspace ON feature_flags(workspace_id);
"#;

/// Tables of one workspace's data database. Executed on a connection opened
/// directly on the workspace file, so names stay unqualified.
pub const WORKSPACE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS view (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    object_metadata_id TEXT NOT NULL,
    type TEXT NOT NULL DEFAULT 'table',
    key TEXT,                        -- 'INDEX' for an object's default view
    icon TEXT,
    position REAL NOT NULL DEFAULT 0,
    is_compact INTEGER NOT NULL DEFAULT 0,
    kanban_field_metadata_id TEXT,
    kanban_aggregate_operation TEXT,
    kanban_aggregate_operation_field_metadata_id TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS view_field (
    id TEXT PRIMARY KEY,
    view_id TEXT NOT NULL REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    field_metadata_id TEXT NOT NULL,
    position REAL NOT NULL DEFAULT 0,
    is_visible INTEGER NOT NULL DEFAULT 1,
    size INTEGER NOT NULL DEFAULT 100,
    aggregate_operation TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS view_filter_group (
    id TEXT PRIMARY KEY,
    view_id TEXT NOT NULL REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    parent_view_filter_group_id TEXT REFERENCES view_filter_group(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    logical_operator TEXT NOT NULL DEFAULT 'AND',
    position_in_view_filter_group INTEGER,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS view_filter (
    id TEXT PRIMARY KEY,
    view_id TEXT NOT NULL REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    field_metadata_id TEXT NOT NULL,
    operand TEXT NOT NULL,
    value TEXT NOT NULL DEFAULT '',
    display_value TEXT,
    view_filter_group_id TEXT REFERENCES view_filter_group(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    position_in_view_filter_group INTEGER,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS view_group (
    id TEXT PRIMARY KEY,
    view_id TEXT NOT NULL REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    field_metadata_id TEXT NOT NULL,
    field_value TEXT NOT NULL DEFAULT '',
    is_visible INTEGER NOT NULL DEFAULT 1,
    position REAL NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS view_sort (
    id TEXT PRIMARY KEY,
    view_id TEXT NOT NULL REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    field_metadata_id TEXT NOT NULL,
    direction TEXT NOT NULL DEFAULT 'asc',
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS favorite_folder (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    position REAL NOT NULL DEFAULT 0,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS favorite (
    id TEXT PRIMARY KEY,
    position REAL NOT NULL DEFAULT 0,
    view_id TEXT REFERENCES view(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    favorite_folder_id TEXT REFERENCES favorite_folder(id) ON DELETE CASCADE DEFERRABLE INITIALLY DEFERRED,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE TABLE IF NOT EXISTS webhook (
    id TEXT PRIMARY KEY,
    target_url TEXT NOT NULL,
    secret TEXT NOT NULL,
    operations TEXT NOT NULL DEFAULT '["*.*"]',   -- JSON array of strings
    description TEXT,
    created_at TEXT DEFAULT (datetime('now')),
    updated_at TEXT DEFAULT (datetime('now')),
    deleted_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_view_field_view ON view_field(view_id);
CREATE INDEX IF NOT EXISTS idx_view_filter_view ON view_filter(view_id);
CREATE INDEX IF NOT EXISTS idx_view_filter_group_view ON view_filter_group(view_id);
CREATE INDEX IF NOT EXISTS idx_view_group_view ON view_group(view_id);
CREATE INDEX IF NOT EXISTS idx_view_sort_view ON view_sort(view_id);
CREATE INDEX IF NOT EXISTS idx_favorite_view ON favorite(view_id);
"#;
