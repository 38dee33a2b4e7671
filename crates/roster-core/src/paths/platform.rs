//! Platform-specific path resolution.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Get the root directory for application data.
///
/// Resolution order:
/// 1. `ROSTER_DATA_DIR` environment variable
/// 2. System data directory (e.g., `~/.local/share/roster`)
///
/// The directory is created if it doesn't exist.
pub fn data_root() -> Result<PathBuf, PathError> {
    let root = match env::var("ROSTER_DATA_DIR") {
        Ok(path) => normalize_user_path(&path)?,
        Err(_) => dirs::data_local_dir()
            .ok_or(PathError::NoDataDir)?
            .join("roster"),
    };
    ensure_dir(&root)?;
    Ok(root)
}

pub(super) fn ensure_dir(dir: &Path) -> Result<(), PathError> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| PathError::CreateFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Normalize a user-provided path, expanding `~` and making it absolute.
pub(super) fn normalize_user_path(raw: &str) -> Result<PathBuf, PathError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PathError::EmptyPath);
    }

    let expanded = if trimmed == "~" {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?
    } else if let Some(rest) = trimmed.strip_prefix("~/") {
        dirs::home_dir().ok_or(PathError::NoHomeDir)?.join(rest)
    } else {
        PathBuf::from(trimmed)
    };

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        env::current_dir()
            .map(|cwd| cwd.join(expanded))
            .map_err(|e| PathError::CurrentDirError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rejects_blank_paths() {
        assert!(matches!(normalize_user_path("   "), Err(PathError::EmptyPath)));
    }

    #[test]
    fn normalize_makes_relative_paths_absolute() {
        let path = normalize_user_path("roster.db").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("roster.db"));
    }

    #[test]
    fn ensure_dir_creates_missing_directories() {
        let base = tempfile::tempdir().unwrap();
        let nested = base.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
    }
}
