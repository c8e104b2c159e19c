//! On-disk HTTP response cache
//!
//! This module provides a SQLite-backed store mapping a request URL to a
//! previously fetched response. Entries never expire on their own; the
//! cache is emptied only by an explicit user-triggered clear.

use crate::Result;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// A response previously stored in the cache
#[derive(Debug, Clone)]
pub struct CachedResponse {
    /// HTTP status code of the original response
    pub status: u16,

    /// Raw response body
    pub body: Vec<u8>,

    /// RFC 3339 timestamp of when the response was fetched
    pub fetched_at: String,
}

/// SQLite response cache
pub struct ResponseCache {
    conn: Connection,
}

impl ResponseCache {
    /// Opens (or creates) the cache database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory cache (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Looks up a cached response by URL.
    pub fn get(&self, url: &str) -> Result<Option<CachedResponse>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status, body, fetched_at FROM responses WHERE url = ?1")?;

        let cached = stmt
            .query_row(params![url], |row| {
                Ok(CachedResponse {
                    status: row.get(0)?,
                    body: row.get(1)?,
                    fetched_at: row.get(2)?,
                })
            })
            .optional()?;

        Ok(cached)
    }

    /// Stores a response, replacing any previous entry for the same URL.
    pub fn put(&self, url: &str, status: u16, body: &[u8]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT OR REPLACE INTO responses (url, status, body, fetched_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![url, status, body, now],
        )?;
        Ok(())
    }

    /// Removes every cached response. Returns the number of entries
    /// that were dropped.
    pub fn clear(&self) -> Result<usize> {
        let dropped = self.conn.execute("DELETE FROM responses", [])?;
        Ok(dropped)
    }

    /// Number of cached responses
    pub fn len(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM responses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// True when the cache holds no responses
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

fn initialize_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS responses (
            url        TEXT PRIMARY KEY,
            status     INTEGER NOT NULL,
            body       BLOB NOT NULL,
            fetched_at TEXT NOT NULL
        );
    ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_returns_none() {
        let cache = ResponseCache::open_in_memory().unwrap();
        assert!(cache.get("https://example.com/").unwrap().is_none());
    }

    #[test]
    fn test_put_then_get() {
        let cache = ResponseCache::open_in_memory().unwrap();
        cache.put("https://example.com/", 200, b"hello").unwrap();

        let cached = cache.get("https://example.com/").unwrap().unwrap();
        assert_eq!(cached.status, 200);
        assert_eq!(cached.body, b"hello");
        assert!(!cached.fetched_at.is_empty());
    }

    #[test]
    fn test_put_replaces_existing_entry() {
        let cache = ResponseCache::open_in_memory().unwrap();
        cache.put("https://example.com/", 200, b"old").unwrap();
        cache.put("https://example.com/", 200, b"new").unwrap();

        let cached = cache.get("https://example.com/").unwrap().unwrap();
        assert_eq!(cached.body, b"new");
        assert_eq!(cache.len().unwrap(), 1);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = ResponseCache::open_in_memory().unwrap();
        cache.put("https://example.com/a", 200, b"a").unwrap();
        cache.put("https://example.com/b", 200, b"b").unwrap();

        let dropped = cache.clear().unwrap();
        assert_eq!(dropped, 2);
        assert!(cache.is_empty().unwrap());
        assert!(cache.get("https://example.com/a").unwrap().is_none());
    }
}
