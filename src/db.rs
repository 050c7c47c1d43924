use crate::error::AppError;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use uuid::Uuid;

const SCHEMA: &str = include_str!("schema.sql");

/// Stamped into `PRAGMA user_version`. Bump when `schema.sql` changes shape.
pub const SCHEMA_VERSION: i64 = 1;

/// Leaderboard store: one SQLite connection shared by all request handlers.
pub struct Db {
    conn: Mutex<Connection>,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")?;
        let db = Db::init(conn)?;
        tracing::info!(path = %path.display(), "leaderboard store opened");
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, AppError> {
        Db::init(Connection::open_in_memory()?)
    }

    /// Applies the schema, refusing stores written by a newer build.
    fn init(conn: Connection) -> Result<Self, AppError> {
        let found: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if found > SCHEMA_VERSION {
            return Err(AppError::Internal(format!(
                "store schema version {} is newer than supported version {}",
                found, SCHEMA_VERSION
            )));
        }
        conn.execute_batch(SCHEMA)?;
        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        Ok(Db {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T, rusqlite::Error>
    where
        F: FnOnce(&Connection) -> Result<T, rusqlite::Error>,
    {
        // Statements are atomic in SQLite, so a poisoned lock still guards a usable connection.
        let conn = self.conn.lock().unwrap_or_else(PoisonError::into_inner);
        f(&conn)
    }

    /// Raw bytes of a consistent standalone copy of the store.
    ///
    /// Uses `VACUUM INTO` a scratch file, so it works for in-memory stores too.
    pub fn snapshot(&self) -> Result<Vec<u8>, AppError> {
        let path = std::env::temp_dir().join(format!("whack-board-export-{}.db", Uuid::new_v4()));
        let path_str = path
            .to_str()
            .ok_or_else(|| AppError::Internal("temporary path is not valid UTF-8".into()))?
            .to_string();

        self.with_conn(|conn| conn.execute("VACUUM INTO ?1", params![path_str]))?;
        let raw = std::fs::read(&path);
        let _ = std::fs::remove_file(&path);
        Ok(raw?)
    }
}
