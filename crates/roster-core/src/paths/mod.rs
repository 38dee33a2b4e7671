//! Path utilities for roster data locations.
//!
//! - Database location (`ROSTER_DB_PATH` override)
//! - Application data root (`ROSTER_DATA_DIR` override)
//!
//! Returns `PathBuf` and `PathError`; OS-specific logic stays private in
//! `platform`.

mod database;
mod error;
mod platform;

pub use database::{DATABASE_FILE_NAME, database_path, resolve_database_path};
pub use error::PathError;
pub use platform::data_root;
