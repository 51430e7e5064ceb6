use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("already exists")]
    AlreadyExists,

    #[error("token lookup collision")]
    TokenLookupCollision,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A built-in object or field was seeded without a standard id.
    #[error("standard {kind} '{name}' has no standard id")]
    MissingStandardId { kind: &'static str, name: String },

    #[error("malformed {table} row '{id}': {reason}")]
    MalformedRow {
        table: &'static str,
        id: String,
        reason: String,
    },

    #[error("workspace {0} has already been prefilled")]
    AlreadyPrefilled(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("invalid token format")]
    InvalidTokenFormat,

    #[error("bad request: {0}")]
    BadRequest(String),
}

pub type Result<T> = std::result::Result<T, Error>;
