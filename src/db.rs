// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::store::StateStore;
use crate::types::timestamp::Timestamp;

/// The name of the database file kept beside the deck.
pub const DATABASE_FILE: &str = "kanjicards.db";

/// SQLite-backed session state store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &Path) -> Fallible<Self> {
        let database_path: &str = database_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid database path"))?;
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    /// When the state under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Fallible<Option<Timestamp>> {
        let conn = self.acquire();
        let sql = "select updated_at from session_state where state_key = ?;";
        let ts: Option<Timestamp> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(ts)
    }

    fn acquire(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for Database {
    fn load(&self, key: &str) -> Fallible<Option<String>> {
        let conn = self.acquire();
        let sql = "select blob from session_state where state_key = ?;";
        let blob: Option<String> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(blob)
    }

    fn save(&mut self, key: &str, blob: &str) -> Fallible<()> {
        let mut conn = self.acquire();
        let tx = conn.transaction()?;
        let sql = "insert into session_state (state_key, blob, updated_at) values (?, ?, ?) on conflict (state_key) do update set blob = excluded.blob, updated_at = excluded.updated_at;";
        tx.execute(sql, (key, blob, Timestamp::now()))?;
        tx.commit()?;
        Ok(())
    }
}

fn schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["session_state"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_missing_key() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.load("n2")?, None);
        assert_eq!(db.updated_at("n2")?, None);
        Ok(())
    }

    #[test]
    fn test_save_overwrites() -> Fallible<()> {
        let mut db = Database::in_memory()?;
        db.save("n2", "first")?;
        db.save("n2", "second")?;
        db.save("n3", "other")?;
        assert_eq!(db.load("n2")?, Some("second".to_string()));
        assert_eq!(db.load("n3")?, Some("other".to_string()));
        assert!(db.updated_at("n2")?.is_some());
        Ok(())
    }

    #[test]
    fn test_reopen_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join(DATABASE_FILE);
        {
            let mut db = Database::new(&path)?;
            db.save("n2", "blob")?;
        }
        let db = Database::new(&path)?;
        assert_eq!(db.load("n2")?, Some("blob".to_string()));
        Ok(())
    }
}
