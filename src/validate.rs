//! Path authorization for the filesystem server.
//!
//! Every filesystem operation resolves its path through [`validate_path`]
//! before touching the filesystem.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::error::FsError;

/// Resolve a path to absolute form and lexically collapse `.` and `..`.
///
/// Relative paths resolve against the process current directory. Symlinks
/// are not followed and the path itself need not exist. `..` above the
/// filesystem root stays at the root.
pub fn normalize_path(path: &Path) -> io::Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

/// Whether `path` falls under one of the allowed root directories.
///
/// `Path::starts_with` compares whole components, so `/home/alice2` is not
/// inside an allowed `/home/alice`.
pub fn is_allowed(path: &Path, allowed_dirs: &[PathBuf]) -> bool {
    allowed_dirs.iter().any(|dir| path.starts_with(dir))
}

/// Normalize and authorize a raw path from a tool request.
///
/// Fails with [`FsError::AccessDenied`] (carrying the normalized path) when
/// the path is outside every allowed root.
pub fn validate_path(raw: &str, allowed_dirs: &[PathBuf]) -> Result<PathBuf, FsError> {
    if raw.contains('\0') {
        return Err(FsError::InvalidArguments("path contains a NUL byte".into()));
    }
    let normalized = normalize_path(Path::new(raw))?;
    if !is_allowed(&normalized, allowed_dirs) {
        return Err(FsError::AccessDenied(normalized));
    }
    Ok(normalized)
}

/// Normalize the allowed root set once at startup, dropping entries that
/// cannot be made absolute.
pub fn normalize_dirs(dirs: Vec<PathBuf>) -> Vec<PathBuf> {
    dirs.into_iter()
        .filter_map(|d| normalize_path(&d).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::error::FsError;
    use crate::validate::{is_allowed, normalize_dirs, normalize_path, validate_path};

    #[test]
    fn collapses_dot_and_dotdot() {
        let p = normalize_path(Path::new("/a/b/../c/./d")).unwrap();
        assert_eq!(p, PathBuf::from("/a/c/d"));
    }

    #[test]
    fn resolves_relative_against_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let p = normalize_path(Path::new("some/file.txt")).unwrap();
        assert_eq!(p, cwd.join("some/file.txt"));
    }

    #[test]
    fn dotdot_clamps_at_root() {
        let p = normalize_path(Path::new("/../../etc")).unwrap();
        assert_eq!(p, PathBuf::from("/etc"));
    }

    #[test]
    fn allows_path_inside_root() {
        let allowed = vec![PathBuf::from("/srv/data")];
        assert!(is_allowed(Path::new("/srv/data/reports/q3.txt"), &allowed));
    }

    #[test]
    fn rejects_path_outside_roots() {
        let allowed = vec![PathBuf::from("/srv/data")];
        assert!(!is_allowed(Path::new("/etc/passwd"), &allowed));
    }

    #[test]
    fn rejects_sibling_with_matching_prefix() {
        let allowed = vec![PathBuf::from("/home/alice")];
        assert!(!is_allowed(Path::new("/home/alice2/notes.txt"), &allowed));
        assert!(is_allowed(Path::new("/home/alice/notes.txt"), &allowed));
    }

    #[test]
    fn validate_path_denies_traversal_escape() {
        let allowed = vec![PathBuf::from("/srv/data")];
        let err = validate_path("/srv/data/../secrets", &allowed).unwrap_err();
        assert!(matches!(err, FsError::AccessDenied(_)));
    }

    #[test]
    fn validate_path_rejects_nul_byte() {
        let allowed = vec![PathBuf::from("/srv/data")];
        let err = validate_path("/srv/data/a\0b", &allowed).unwrap_err();
        assert!(matches!(err, FsError::InvalidArguments(_)));
    }

    #[test]
    fn validate_path_returns_normalized_path() {
        let allowed = vec![PathBuf::from("/srv/data")];
        let p = validate_path("/srv/data/./a/../b.txt", &allowed).unwrap();
        assert_eq!(p, PathBuf::from("/srv/data/b.txt"));
    }

    #[test]
    fn normalize_dirs_makes_relative_roots_absolute() {
        let dirs = normalize_dirs(vec![PathBuf::from("rel/root")]);
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].is_absolute());
    }
}
