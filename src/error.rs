//! Crate-wide error type.
//!
//! Every operation returns [`Result`]; the variants mirror the failure
//! kinds of the analysis pipeline, the gamification engine and the
//! reporting layer, plus the ambient I/O and configuration failures.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Clone failed: unreachable remote, bad credentials or invalid reference.
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The clone contained no file with the configured source extension.
    #[error("no analyzable .{extension} files were found in the repository")]
    NoAnalyzableFiles { extension: String },

    /// A linter could not be spawned, crashed, or produced unreadable output.
    /// A non-zero exit status alone is not reported through this variant.
    #[error("{tool} could not be run: {reason}")]
    ToolInvocation { tool: String, reason: String },

    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Precondition(String),

    #[error("incorrect username or password")]
    Auth,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Error::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn tool(tool: &str, reason: impl Into<String>) -> Self {
        Error::ToolInvocation {
            tool: tool.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit code for the CLI: user-caused failures get their own
    /// codes, everything unexpected collapses to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Precondition(_) => 2,
            Error::Auth => 3,
            Error::NotFound { .. } => 4,
            _ => 1,
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
