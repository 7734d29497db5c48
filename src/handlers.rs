//! Typed implementations of the filesystem tools.
//!
//! Each handler receives schema-validated parameters plus the allowed-roots
//! set, authorizes every path it touches, performs the filesystem action,
//! and returns either a human-readable success text or an [`FsError`].

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;
use tokio::io::AsyncWriteExt;

use crate::error::FsError;
use crate::tools::{
    CopyFileParams, CreateDirectoryParams, DeleteFileParams, FileInfoParams, ListFilesParams,
    MoveFileParams, ReadFileParams, WriteFileParams,
};
use crate::validate::{is_allowed, validate_path};

/// Largest file `read_file` will load into memory.
pub const MAX_READ_SIZE: u64 = 10 * 1024 * 1024;

/// Metadata returned by `file_info`.
#[derive(Debug, Serialize)]
struct FileInfo {
    path: String,
    exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    created: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modified: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accessed: Option<String>,
    #[cfg(unix)]
    #[serde(skip_serializing_if = "Option::is_none")]
    permissions: Option<String>,
}

fn check_encoding(encoding: Option<&str>) -> Result<(), FsError> {
    match encoding {
        None => Ok(()),
        Some(name) if name.eq_ignore_ascii_case("utf-8") || name.eq_ignore_ascii_case("utf8") => {
            Ok(())
        }
        Some(other) => Err(FsError::InvalidArguments(format!(
            "unsupported encoding: {other}"
        ))),
    }
}

pub(crate) async fn read_file(
    allowed_dirs: &[PathBuf],
    params: ReadFileParams,
) -> Result<String, FsError> {
    check_encoding(params.encoding.as_deref())?;
    let path = validate_path(&params.path, allowed_dirs)?;
    let meta = tokio::fs::metadata(&path).await?;
    if meta.len() > MAX_READ_SIZE {
        return Err(FsError::FileTooLarge {
            size: meta.len(),
            limit: MAX_READ_SIZE,
        });
    }
    let bytes = tokio::fs::read(&path).await?;
    let content = String::from_utf8_lossy(&bytes);
    Ok(format!("{}:\n{}", path.display(), content))
}

pub(crate) async fn write_file(
    allowed_dirs: &[PathBuf],
    params: WriteFileParams,
) -> Result<String, FsError> {
    check_encoding(params.encoding.as_deref())?;
    let path = validate_path(&params.path, allowed_dirs)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    if params.append.unwrap_or(false) {
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        file.write_all(params.content.as_bytes()).await?;
        file.flush().await?;
        Ok(format!("Successfully appended to {}", path.display()))
    } else {
        // Stage into a sibling temp file, then rename over the target.
        let tmp = temp_sibling(&path);
        tokio::fs::write(&tmp, params.content.as_bytes()).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            tokio::fs::remove_file(&tmp).await.ok();
            return Err(e.into());
        }
        Ok(format!("Successfully wrote to {}", path.display()))
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "file".into());
    name.push(".fsgate-tmp");
    path.with_file_name(name)
}

pub(crate) async fn list_files(
    allowed_dirs: &[PathBuf],
    params: ListFilesParams,
) -> Result<String, FsError> {
    let dir = validate_path(&params.path, allowed_dirs)?;
    let recursive = params.recursive.unwrap_or(false);

    let mut candidates: Vec<PathBuf> = match params.pattern.as_deref() {
        Some(pattern) => glob_candidates(&dir, pattern, recursive)?,
        None if recursive => glob_candidates(&dir, "*", true)?,
        None => {
            let mut entries = Vec::new();
            let mut read_dir = tokio::fs::read_dir(&dir).await?;
            while let Some(entry) = read_dir.next_entry().await? {
                entries.push(entry.path());
            }
            entries
        }
    };
    candidates.retain(|p| is_allowed(p, allowed_dirs));
    candidates.sort();

    // Best-effort stat fan-out; entries that fail to stat are dropped.
    let stats =
        futures::future::join_all(candidates.iter().map(|p| tokio::fs::metadata(p))).await;

    let lines: Vec<String> = candidates
        .iter()
        .zip(stats)
        .filter_map(|(path, meta)| meta.ok().map(|m| format_entry(path, &m)))
        .collect();
    Ok(lines.join("\n"))
}

fn glob_candidates(dir: &Path, pattern: &str, recursive: bool) -> Result<Vec<PathBuf>, FsError> {
    let full = if recursive {
        dir.join("**").join(pattern)
    } else {
        dir.join(pattern)
    };
    let paths = glob::glob(&full.to_string_lossy())
        .map_err(|e| FsError::InvalidArguments(format!("invalid glob pattern: {e}")))?
        .filter_map(Result::ok)
        .collect();
    Ok(paths)
}

fn format_entry(path: &Path, meta: &std::fs::Metadata) -> String {
    let tag = if meta.is_dir() { "[DIR]" } else { "[FILE]" };
    let modified = meta
        .modified()
        .ok()
        .and_then(to_rfc3339)
        .unwrap_or_else(|| "unknown".into());
    format!(
        "{tag} {} ({} bytes, modified {})",
        path.display(),
        meta.len(),
        modified
    )
}

fn to_rfc3339(t: SystemTime) -> Option<String> {
    let d = t.duration_since(std::time::UNIX_EPOCH).ok()?;
    chrono::DateTime::from_timestamp(d.as_secs() as i64, d.subsec_nanos())
        .map(|dt| dt.to_rfc3339())
}

pub(crate) async fn file_info(
    allowed_dirs: &[PathBuf],
    params: FileInfoParams,
) -> Result<String, FsError> {
    let path = validate_path(&params.path, allowed_dirs)?;
    let info = match tokio::fs::metadata(&path).await {
        Ok(meta) => {
            let kind = if meta.is_dir() {
                "directory"
            } else if meta.is_file() {
                "file"
            } else {
                "other"
            };
            FileInfo {
                path: path.display().to_string(),
                exists: true,
                kind: Some(kind),
                size: Some(meta.len()),
                created: meta.created().ok().and_then(to_rfc3339),
                modified: meta.modified().ok().and_then(to_rfc3339),
                accessed: meta.accessed().ok().and_then(to_rfc3339),
                #[cfg(unix)]
                permissions: Some({
                    use std::os::unix::fs::PermissionsExt;
                    format!("{:03o}", meta.permissions().mode() & 0o777)
                }),
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileInfo {
            path: path.display().to_string(),
            exists: false,
            kind: None,
            size: None,
            created: None,
            modified: None,
            accessed: None,
            #[cfg(unix)]
            permissions: None,
        },
        Err(e) => return Err(e.into()),
    };
    serde_json::to_string_pretty(&info).map_err(std::io::Error::from).map_err(FsError::from)
}

pub(crate) async fn create_directory(
    allowed_dirs: &[PathBuf],
    params: CreateDirectoryParams,
) -> Result<String, FsError> {
    let path = validate_path(&params.path, allowed_dirs)?;
    if params.recursive.unwrap_or(true) {
        tokio::fs::create_dir_all(&path).await?;
    } else {
        tokio::fs::create_dir(&path).await?;
    }
    Ok(format!("Successfully created directory {}", path.display()))
}

pub(crate) async fn delete_file(
    allowed_dirs: &[PathBuf],
    params: DeleteFileParams,
) -> Result<String, FsError> {
    let path = validate_path(&params.path, allowed_dirs)?;
    let meta = tokio::fs::metadata(&path).await?;
    if meta.is_dir() {
        if params.recursive.unwrap_or(false) {
            tokio::fs::remove_dir_all(&path).await?;
        } else {
            tokio::fs::remove_dir(&path).await?;
        }
    } else {
        tokio::fs::remove_file(&path).await?;
    }
    Ok(format!("Successfully deleted {}", path.display()))
}

pub(crate) async fn move_file(
    allowed_dirs: &[PathBuf],
    params: MoveFileParams,
) -> Result<String, FsError> {
    let source = validate_path(&params.source, allowed_dirs)?;
    let dest = validate_path(&params.destination, allowed_dirs)?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::rename(&source, &dest).await?;
    Ok(format!("Moved {} -> {}", source.display(), dest.display()))
}

pub(crate) async fn copy_file(
    allowed_dirs: &[PathBuf],
    params: CopyFileParams,
) -> Result<String, FsError> {
    let source = validate_path(&params.source, allowed_dirs)?;
    let dest = validate_path(&params.destination, allowed_dirs)?;
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::copy(&source, &dest).await?;
    Ok(format!("Copied {} -> {}", source.display(), dest.display()))
}
