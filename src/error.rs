//! Error taxonomy for the filesystem tools.
//!
//! Handlers return these typed variants; the text rendering callers see
//! happens once, at the dispatch boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by tool handlers and the dispatcher.
#[derive(Error, Debug)]
pub enum FsError {
    /// The request arguments were malformed or carried unsupported values.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),
    /// The path is outside all allowed root directories.
    #[error("access denied: {} is outside the allowed directories", .0.display())]
    AccessDenied(PathBuf),
    /// The file exceeds the read size ceiling.
    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    FileTooLarge { size: u64, limit: u64 },
    /// An error from the underlying filesystem call.
    #[error("{0}")]
    Filesystem(#[from] std::io::Error),
    /// The requested tool name is not registered.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}
