//! Store configuration supplied by the embedding layer.
//!
//! The core reads no environment variables; callers build a [`StoreConfig`]
//! in code and pass it to [`open_store`](crate::open_store).

use crate::logging::default_log_level;
use crate::persist::DEFAULT_RECORD_KEY;
use std::path::{Path, PathBuf};

/// File name used by [`StoreConfig::in_dir`].
pub const DEFAULT_DB_FILE_NAME: &str = "deptproto.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file holding the key-value record.
    pub db_path: PathBuf,
    /// Key under which the snapshot record is written.
    pub record_key: String,
    pub log_level: String,
    /// Absolute directory for rolling log files. `None` leaves logging off.
    pub log_dir: Option<PathBuf>,
}

impl StoreConfig {
    /// Default settings with the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            record_key: DEFAULT_RECORD_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }

    /// Default settings with [`DEFAULT_DB_FILE_NAME`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn with_record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = key.into();
        self
    }

    pub fn with_logging(mut self, level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        self.log_level = level.into();
        self.log_dir = Some(log_dir.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{StoreConfig, DEFAULT_DB_FILE_NAME};
    use crate::persist::DEFAULT_RECORD_KEY;
    use std::path::Path;

    #[test]
    fn in_dir_uses_default_file_and_key() {
        let config = StoreConfig::in_dir("/data");
        assert_eq!(config.db_path, Path::new("/data").join(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.record_key, DEFAULT_RECORD_KEY);
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn builders_override_defaults() {
        let config = StoreConfig::new("/tmp/x.db")
            .with_record_key("alt")
            .with_logging("warn", "/tmp/logs");
        assert_eq!(config.record_key, "alt");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir.as_deref(), Some(Path::new("/tmp/logs")));
    }
}
