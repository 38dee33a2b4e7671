//! Database path resolution.

use std::env;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, ensure_dir, normalize_user_path};

pub const DATABASE_FILE_NAME: &str = "roster.db";

/// Get the path to the roster database file.
///
/// `ROSTER_DB_PATH` wins when set; otherwise `roster.db` in the data root.
pub fn database_path() -> Result<PathBuf, PathError> {
    resolve_database_path(env::var("ROSTER_DB_PATH").ok().as_deref())
}

/// Resolve the database path from an explicit override, falling back to
/// the data root.
///
/// The parent directory is created if it doesn't exist.
pub fn resolve_database_path(explicit: Option<&str>) -> Result<PathBuf, PathError> {
    let path = match explicit {
        Some(raw) => normalize_user_path(raw)?,
        None => data_root()?.join(DATABASE_FILE_NAME),
    };
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_path_is_used_as_is() {
        let base = tempfile::tempdir().unwrap();
        let dir = base.path().join("nested");
        let wanted = dir.join("custom.db");
        let resolved = resolve_database_path(wanted.to_str()).unwrap();
        assert_eq!(resolved, wanted);
        assert!(dir.is_dir());
    }

    #[test]
    fn blank_override_is_rejected() {
        assert!(matches!(
            resolve_database_path(Some("")),
            Err(PathError::EmptyPath)
        ));
    }
}
