//! Builder for creating and configuring SQLite backends.

use std::path::{Path, PathBuf};

use tokio::task;

use super::SqliteBackend;
use crate::{
    db::Database,
    error::{join_error, BoardError, Result},
};

/// Builder for creating and configuring [`SqliteBackend`] instances.
#[derive(Debug, Clone)]
pub struct StoreBuilder {
    database_path: Option<PathBuf>,
}

impl StoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/stageboard/stageboard.db` or
    /// `~/.local/share/stageboard/stageboard.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured backend, creating the database file and schema
    /// if needed.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `BoardError::Database` if database initialization fails
    pub async fn build(self) -> Result<SqliteBackend> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), BoardError>(())
        })
        .await
        .map_err(join_error)??;

        log::debug!("Opened board store at {}", db_path.display());

        Ok(SqliteBackend::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("stageboard")
            .place_data_file("stageboard.db")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }
}

impl Default for StoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
