//! Database operations and SQLite management for stages and items.
//!
//! This module is the storage half of the reference backend: it owns the
//! SQLite connection, the schema and the queries. Everything here is
//! synchronous; [`crate::backend::SqliteBackend`] moves calls onto the
//! blocking pool.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod item_queries;
pub mod migrations;
pub mod stage_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
