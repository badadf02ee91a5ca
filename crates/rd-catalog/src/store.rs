//! SQLite-backed catalog storage: servers, flavor options, atmosphere options.

use crate::CatalogError;
use rd_core::catalog::{AtmosphereOption, FlavorOption, LocalizedText, Server};
use rusqlite::{Connection, ErrorCode};
use std::path::Path;
use std::sync::Mutex;

/// Catalog store backed by a single SQLite database.
/// Uses Mutex<Connection> for thread safety (rusqlite::Connection is !Sync).
pub struct CatalogStore {
    conn: Mutex<Connection>,
}

impl CatalogStore {
    /// Open (or create) the catalog database at the given path.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let conn = Connection::open(path).map_err(|e| CatalogError::Database(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Create an in-memory catalog (useful for testing).
    pub fn in_memory() -> Result<Self, CatalogError> {
        let conn =
            Connection::open_in_memory().map_err(|e| CatalogError::Database(e.to_string()))?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS servers (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );

            CREATE TABLE IF NOT EXISTS flavor_options (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text_fr TEXT NOT NULL UNIQUE,
                text_en TEXT,
                text_es TEXT,
                text_it TEXT,
                category TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS atmosphere_options (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                text_fr TEXT NOT NULL UNIQUE,
                text_en TEXT,
                text_es TEXT,
                text_it TEXT
            );",
        )
        .map_err(|e| CatalogError::Database(e.to_string()))?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CatalogError> {
        self.conn
            .lock()
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Servers
    // ------------------------------------------------------------------

    pub fn insert_server(&self, name: &str) -> Result<Server, CatalogError> {
        let name = required(name.trim(), "server name")?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO servers (name) VALUES (?1)",
            rusqlite::params![name],
        )
        .map_err(|e| write_error(e, name))?;
        Ok(Server {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    pub fn delete_server(&self, name: &str) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        let affected = conn
            .execute(
                "DELETE FROM servers WHERE name = ?1",
                rusqlite::params![name.trim()],
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        if affected == 0 {
            return Err(CatalogError::NotFound(format!("server {name}")));
        }
        Ok(())
    }

    /// All servers, ordered by name.
    pub fn list_servers(&self) -> Result<Vec<Server>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT id, name FROM servers ORDER BY name ASC")
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Server {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Flavor options
    // ------------------------------------------------------------------

    pub fn insert_flavor(
        &self,
        category: &str,
        text: &LocalizedText,
    ) -> Result<FlavorOption, CatalogError> {
        let category = required(category, "flavor category")?;
        let canonical = required(&text.canonical, "canonical text")?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO flavor_options (text_fr, text_en, text_es, text_it, category)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![canonical, text.en, text.es, text.it, category],
        )
        .map_err(|e| write_error(e, canonical))?;
        Ok(FlavorOption {
            id: conn.last_insert_rowid(),
            category: category.to_string(),
            text: LocalizedText {
                canonical: canonical.to_string(),
                ..text.clone()
            },
        })
    }

    pub fn delete_flavor(&self, id: i64) -> Result<(), CatalogError> {
        self.delete_by_id("flavor_options", id)
    }

    /// All flavor options in creation order.
    pub fn list_flavors(&self) -> Result<Vec<FlavorOption>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, text_fr, text_en, text_es, text_it, category
                 FROM flavor_options ORDER BY id ASC",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(FlavorOption {
                    id: row.get(0)?,
                    text: LocalizedText {
                        canonical: row.get(1)?,
                        en: row.get(2)?,
                        es: row.get(3)?,
                        it: row.get(4)?,
                    },
                    category: row.get(5)?,
                })
            })
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    // ------------------------------------------------------------------
    // Atmosphere options
    // ------------------------------------------------------------------

    pub fn insert_atmosphere(&self, text: &LocalizedText) -> Result<AtmosphereOption, CatalogError> {
        let canonical = required(&text.canonical, "canonical text")?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO atmosphere_options (text_fr, text_en, text_es, text_it)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![canonical, text.en, text.es, text.it],
        )
        .map_err(|e| write_error(e, canonical))?;
        Ok(AtmosphereOption {
            id: conn.last_insert_rowid(),
            text: LocalizedText {
                canonical: canonical.to_string(),
                ..text.clone()
            },
        })
    }

    pub fn delete_atmosphere(&self, id: i64) -> Result<(), CatalogError> {
        self.delete_by_id("atmosphere_options", id)
    }

    /// All atmosphere options in creation order.
    pub fn list_atmospheres(&self) -> Result<Vec<AtmosphereOption>, CatalogError> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, text_fr, text_en, text_es, text_it
                 FROM atmosphere_options ORDER BY id ASC",
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                Ok(AtmosphereOption {
                    id: row.get(0)?,
                    text: LocalizedText {
                        canonical: row.get(1)?,
                        en: row.get(2)?,
                        es: row.get(3)?,
                        it: row.get(4)?,
                    },
                })
            })
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| CatalogError::Database(e.to_string()))
    }

    // `table` is always one of the fixed names above, never caller input.
    fn delete_by_id(&self, table: &str, id: i64) -> Result<(), CatalogError> {
        let conn = self.lock()?;
        let affected = conn
            .execute(
                &format!("DELETE FROM {table} WHERE id = ?1"),
                rusqlite::params![id],
            )
            .map_err(|e| CatalogError::Database(e.to_string()))?;
        if affected == 0 {
            return Err(CatalogError::NotFound(format!("{table} id={id}")));
        }
        Ok(())
    }
}

/// Reject blank values; non-blank values pass through unchanged.
fn required<'a>(value: &'a str, what: &str) -> Result<&'a str, CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!("{what} must not be empty")));
    }
    Ok(value)
}

fn write_error(e: rusqlite::Error, key: &str) -> CatalogError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _) if err.code == ErrorCode::ConstraintViolation => {
            CatalogError::Duplicate(key.to_string())
        }
        _ => CatalogError::Database(e.to_string()),
    }
}
