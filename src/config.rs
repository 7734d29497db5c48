//! Allowed-roots configuration.
//!
//! The allowed set is established once at process start and never changes
//! for the process lifetime.

use std::path::PathBuf;

/// Environment variable holding a colon-separated list of allowed roots.
pub const ALLOWED_DIRS_ENV: &str = "FSGATE_ALLOWED_DIRS";

/// Parse a colon-separated root list, falling back to the defaults (the
/// current working directory plus the user's home directory) when unset.
pub fn parse_allowed_dirs(raw: Option<&str>) -> Vec<PathBuf> {
    match raw {
        Some(list) => list
            .split(':')
            .filter(|entry| !entry.is_empty())
            .map(PathBuf::from)
            .collect(),
        None => {
            let mut defaults = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                defaults.push(cwd);
            }
            if let Some(home) = dirs::home_dir() {
                defaults.push(home);
            }
            defaults
        }
    }
}

/// Read the allowed roots from the environment.
pub fn allowed_dirs_from_env() -> Vec<PathBuf> {
    let raw = std::env::var(ALLOWED_DIRS_ENV).ok();
    parse_allowed_dirs(raw.as_deref())
}
