//! Reference SQLite layout the compiled search queries run against, plus a
//! settings table for persisting the search configuration.

use crate::config::SearchConfig;
use crate::sql::CompiledQuery;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::path::Path;
use tracing::{debug, warn};

mod error;

pub use error::{DbError, DbErrorCode, DbResult};

const SEARCH_CONFIG_KEY: &str = "searchConfigV1";

fn map_db_err<E: std::fmt::Display>(
    code: DbErrorCode,
    context: impl FnOnce() -> String,
) -> impl FnOnce(E) -> DbError {
    move |error| DbError::wrap(code, context(), error)
}

fn ensure_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS search_metadata (
            manga_id INTEGER PRIMARY KEY,
            uploader TEXT
        );
        CREATE TABLE IF NOT EXISTS search_tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            manga_id INTEGER NOT NULL,
            namespace TEXT,
            name TEXT NOT NULL,
            type INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS search_tags_manga_id_index ON search_tags (manga_id);
        CREATE INDEX IF NOT EXISTS search_tags_namespace_name_index ON search_tags (namespace, name);
        CREATE TABLE IF NOT EXISTS search_titles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            manga_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            type INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS search_titles_manga_id_index ON search_titles (manga_id);
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );",
    )
    .map_err(map_db_err(DbErrorCode::SchemaInitFailed, || {
        "Failed to init schema".to_string()
    }))?;
    Ok(())
}

pub fn open(path: &Path) -> DbResult<Connection> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(map_db_err(DbErrorCode::OpenFailed, || {
            format!("Failed to create data dir {}", parent.display())
        }))?;
    }
    let conn = Connection::open(path).map_err(map_db_err(DbErrorCode::OpenFailed, || {
        "Failed to open db".to_string()
    }))?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> DbResult<Connection> {
    let conn = Connection::open_in_memory().map_err(map_db_err(DbErrorCode::OpenFailed, || {
        "Failed to open in-memory db".to_string()
    }))?;
    ensure_schema(&conn)?;
    Ok(conn)
}

pub fn insert_metadata(conn: &Connection, manga_id: i64, uploader: Option<&str>) -> DbResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO search_metadata (manga_id, uploader) VALUES (?1, ?2)",
        params![manga_id, uploader],
    )
    .map_err(map_db_err(DbErrorCode::WriteFailed, || {
        format!("Failed to insert metadata for {manga_id}")
    }))?;
    Ok(())
}

pub fn insert_tag(
    conn: &Connection,
    manga_id: i64,
    namespace: Option<&str>,
    name: &str,
    tag_type: i32,
) -> DbResult<()> {
    conn.execute(
        "INSERT INTO search_tags (manga_id, namespace, name, type) VALUES (?1, ?2, ?3, ?4)",
        params![manga_id, namespace, name, tag_type],
    )
    .map_err(map_db_err(DbErrorCode::WriteFailed, || {
        format!("Failed to insert tag for {manga_id}")
    }))?;
    Ok(())
}

pub fn insert_title(conn: &Connection, manga_id: i64, title: &str, title_type: i32) -> DbResult<()> {
    conn.execute(
        "INSERT INTO search_titles (manga_id, title, type) VALUES (?1, ?2, ?3)",
        params![manga_id, title, title_type],
    )
    .map_err(map_db_err(DbErrorCode::WriteFailed, || {
        format!("Failed to insert title for {manga_id}")
    }))?;
    Ok(())
}

/// Runs a compiled search and returns matching manga ids in ascending order.
pub fn search_manga_ids(conn: &Connection, query: &CompiledQuery) -> DbResult<Vec<i64>> {
    let mut stmt = conn
        .prepare(&query.text)
        .map_err(map_db_err(DbErrorCode::ReadFailed, || {
            "Failed to prepare search query".to_string()
        }))?;
    let rows = stmt
        .query_map(params_from_iter(query.params.iter()), |row: &Row| {
            row.get::<_, i64>(0)
        })
        .map_err(map_db_err(DbErrorCode::ReadFailed, || {
            "Failed to query search results".to_string()
        }))?;
    let mut ids = Vec::new();
    for row in rows {
        ids.push(row.map_err(map_db_err(DbErrorCode::ReadFailed, || {
            "Failed to read search result".to_string()
        }))?);
    }
    debug!(params = query.params.len(), matches = ids.len(), "search query executed");
    Ok(ids)
}

pub fn set_setting_string(conn: &Connection, key: &str, value: &str) -> DbResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
        params![key, value],
    )
    .map_err(map_db_err(DbErrorCode::WriteFailed, || {
        format!("Failed to store setting {key}")
    }))?;
    Ok(())
}

pub fn get_setting_string(conn: &Connection, key: &str) -> DbResult<Option<String>> {
    conn.query_row(
        "SELECT value FROM settings WHERE key = ?1",
        params![key],
        |row: &Row| row.get::<_, String>(0),
    )
    .optional()
    .map_err(map_db_err(DbErrorCode::ReadFailed, || {
        format!("Failed to read setting {key}")
    }))
}

pub fn save_search_config(conn: &Connection, config: &SearchConfig) -> DbResult<()> {
    let json = serde_json::to_string(config).map_err(map_db_err(DbErrorCode::SerializeFailed, || {
        "Failed to serialize search config".to_string()
    }))?;
    set_setting_string(conn, SEARCH_CONFIG_KEY, &json)
}

/// Stored config, or `None` when absent or unreadable.
pub fn load_search_config(conn: &Connection) -> DbResult<Option<SearchConfig>> {
    let Some(raw) = get_setting_string(conn, SEARCH_CONFIG_KEY)? else {
        return Ok(None);
    };
    match serde_json::from_str::<SearchConfig>(&raw) {
        Ok(config) => Ok(Some(config)),
        Err(e) => {
            warn!(error = %e, "ignoring unreadable stored search config");
            Ok(None)
        }
    }
}
