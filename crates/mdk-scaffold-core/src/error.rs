//! Error taxonomy for a regeneration run
//!
//! Nothing in the core retries or recovers. Every variant aborts the run and
//! a second run repairs whatever was left half-written.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem operation that failed, carried for error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    List,
    Read,
    Remove,
    Write,
    Rename,
    CreateDir,
    Copy,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FsOp::List => "list",
            FsOp::Read => "read",
            FsOp::Remove => "remove",
            FsOp::Write => "write",
            FsOp::Rename => "rename",
            FsOp::CreateDir => "create directory",
            FsOp::Copy => "copy",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Failed to {op} {}: {source}", .path.display())]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Folder not found: {}", .0.display())]
    MissingFolder(PathBuf),

    #[error("Template '{template}' has no value for placeholder '{{{placeholder}}}'")]
    Render {
        template: &'static str,
        placeholder: String,
    },

    #[error("Build identifier {0} was allocated twice in one solution")]
    DuplicateIdentifier(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse {}: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("External tool `{command}` failed with exit code {code}")]
    ExternalTool { command: String, code: i32 },

    #[error("Failed to start `{command}`: {source}")]
    ExternalToolSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fetch error: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, ScaffoldError>;

impl ScaffoldError {
    /// Wrap an io error with the operation and path it came from
    pub fn fs(op: FsOp, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        ScaffoldError::Filesystem {
            op,
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ScaffoldError::Filesystem { .. } | ScaffoldError::MissingFolder(_) => "FILESYSTEM_ERROR",
            ScaffoldError::Render { .. } => "RENDER_ERROR",
            ScaffoldError::DuplicateIdentifier(_) => "DUPLICATE_IDENTIFIER",
            ScaffoldError::Config(_) | ScaffoldError::Yaml { .. } => "CONFIG_ERROR",
            ScaffoldError::ExternalTool { .. }
            | ScaffoldError::ExternalToolSpawn { .. }
            | ScaffoldError::Fetch(_) => "EXTERNAL_TOOL_ERROR",
        }
    }
}
