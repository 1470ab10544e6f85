use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::CoreError;
use crate::models::{AuthSession, AuthUser, FavoriteSet};

const SCHEMA_V1: &str = include_str!("../../../migrations/001_initial.sql");

/// SQLite-backed durable storage: per-user favorites and the persisted
/// sign-in session.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    // ── Favorites ───────────────────────────────────────────────

    /// Load a user's favorite set. A missing key yields the empty set;
    /// so does a row whose stored JSON no longer parses.
    pub fn load_favorites(&self, user_id: &str) -> Result<FavoriteSet, CoreError> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT ids FROM favorites WHERE key = ?1",
                params![favorites_key(user_id)],
                |row| row.get(0),
            )
            .optional()?;

        Ok(stored
            .and_then(|json| {
                serde_json::from_str::<Vec<String>>(&json)
                    .map_err(|e| tracing::error!("discarding corrupt favorites row: {e}"))
                    .ok()
            })
            .map(FavoriteSet::from_ids)
            .unwrap_or_default())
    }

    /// Persist a user's full favorite set, replacing any prior value.
    pub fn save_favorites(&self, user_id: &str, set: &FavoriteSet) -> Result<(), CoreError> {
        let json = serde_json::to_string(set.ids()).unwrap_or_else(|_| "[]".into());
        self.conn.execute(
            "INSERT OR REPLACE INTO favorites (key, ids) VALUES (?1, ?2)",
            params![favorites_key(user_id), json],
        )?;
        Ok(())
    }

    // ── Auth Session ────────────────────────────────────────────

    /// Store the sign-in session, replacing any prior one.
    pub fn save_session(&self, session: &AuthSession) -> Result<(), CoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO auth_session
             (id, user_id, email, id_token, refresh_token, expires_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)",
            params![
                session.user.uid,
                session.user.email,
                session.id_token,
                session.refresh_token,
                session.expires_at,
            ],
        )?;
        Ok(())
    }

    /// Get the persisted sign-in session, if any.
    pub fn get_session(&self) -> Result<Option<AuthSession>, CoreError> {
        self.conn
            .query_row(
                "SELECT user_id, email, id_token, refresh_token, expires_at
                 FROM auth_session WHERE id = 1",
                [],
                |row| {
                    Ok(AuthSession {
                        user: AuthUser {
                            uid: row.get(0)?,
                            email: row.get(1)?,
                        },
                        id_token: row.get(2)?,
                        refresh_token: row.get(3)?,
                        expires_at: row.get(4)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Remove the persisted sign-in session. Favorites rows are untouched.
    pub fn clear_session(&self) -> Result<(), CoreError> {
        self.conn.execute("DELETE FROM auth_session", [])?;
        Ok(())
    }
}

/// Storage key for a user's favorites row.
fn favorites_key(user_id: &str) -> String {
    format!("favorites_{user_id}")
}

// ── Migrations ──────────────────────────────────────────────────

/// Run schema migrations using `PRAGMA user_version` for version tracking.
fn run_migrations(conn: &Connection) -> Result<(), CoreError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}
