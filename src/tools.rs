//! Tool catalog for the filesystem server.
//!
//! The parameter structs double as the advertised input schemas: rmcp
//! derives the shape from `JsonSchema`, with field doc comments as
//! descriptions. The `#[tool]` methods are thin wrappers handing the
//! validated parameters to the typed handlers in [`crate::handlers`].

use rmcp::{
    handler::server::wrapper::Parameters,
    schemars::{self, JsonSchema},
    tool, tool_router,
};
use serde::Deserialize;

use crate::FsServer;
use crate::handlers;

/// Parameters for reading a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Path to the file to read.
    pub path: String,
    /// Text encoding of the file (default: "utf-8").
    pub encoding: Option<String>,
}

/// Parameters for writing a file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct WriteFileParams {
    /// Path to the file to write.
    pub path: String,
    /// Content to write.
    pub content: String,
    /// Text encoding of the content (default: "utf-8").
    pub encoding: Option<String>,
    /// Append to the file instead of replacing it (default: false).
    pub append: Option<bool>,
}

/// Parameters for listing directory contents.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListFilesParams {
    /// Directory to list.
    pub path: String,
    /// Glob pattern to match entries against (e.g. "*.txt").
    pub pattern: Option<String>,
    /// Recurse into subdirectories (default: false).
    pub recursive: Option<bool>,
}

/// Parameters for getting file metadata.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct FileInfoParams {
    /// Path to the file or directory.
    pub path: String,
}

/// Parameters for creating a directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateDirectoryParams {
    /// Path of the directory to create.
    pub path: String,
    /// Create missing parent directories as needed (default: true).
    pub recursive: Option<bool>,
}

/// Parameters for deleting a file or directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteFileParams {
    /// Path to the file or directory to delete.
    pub path: String,
    /// Delete directories recursively (default: false).
    pub recursive: Option<bool>,
}

/// Parameters for moving a file or directory.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MoveFileParams {
    /// Source path.
    pub source: String,
    /// Destination path.
    pub destination: String,
}

/// Parameters for copying a single file.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CopyFileParams {
    /// Source path.
    pub source: String,
    /// Destination path.
    pub destination: String,
}

#[tool_router]
impl FsServer {
    /// Create a new server with the given allowed root directories.
    pub fn new(allowed_dirs: Vec<std::path::PathBuf>) -> Self {
        let allowed_dirs = crate::validate::normalize_dirs(allowed_dirs);
        Self {
            allowed_dirs,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "Read the complete contents of a file as text")]
    async fn read_file(
        &self,
        Parameters(params): Parameters<ReadFileParams>,
    ) -> Result<String, String> {
        handlers::read_file(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "Write content to a file, replacing it or appending, creating parent directories as needed"
    )]
    async fn write_file(
        &self,
        Parameters(params): Parameters<WriteFileParams>,
    ) -> Result<String, String> {
        handlers::write_file(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(
        description = "List directory contents with type tags, sizes and modification times, optionally filtered by a glob pattern or recursive"
    )]
    async fn list_files(
        &self,
        Parameters(params): Parameters<ListFilesParams>,
    ) -> Result<String, String> {
        handlers::list_files(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Get detailed metadata about a file or directory as JSON")]
    async fn file_info(
        &self,
        Parameters(params): Parameters<FileInfoParams>,
    ) -> Result<String, String> {
        handlers::file_info(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Create a new directory")]
    async fn create_directory(
        &self,
        Parameters(params): Parameters<CreateDirectoryParams>,
    ) -> Result<String, String> {
        handlers::create_directory(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Delete a file, or a directory (recursively only when requested)")]
    async fn delete_file(
        &self,
        Parameters(params): Parameters<DeleteFileParams>,
    ) -> Result<String, String> {
        handlers::delete_file(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Move or rename a file or directory")]
    async fn move_file(
        &self,
        Parameters(params): Parameters<MoveFileParams>,
    ) -> Result<String, String> {
        handlers::move_file(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }

    #[tool(description = "Copy a single file")]
    async fn copy_file(
        &self,
        Parameters(params): Parameters<CopyFileParams>,
    ) -> Result<String, String> {
        handlers::copy_file(&self.allowed_dirs, params)
            .await
            .map_err(|e| e.to_string())
    }
}
