//! SQLite-backed storage.
//!
//! Provides persistent storage for:
//! - Users and their streak records
//! - The workout log (activity history)
//! - Issued sign-in challenges
//!
//! Timestamps are stored as fixed-width RFC 3339 UTC strings with full
//! nanosecond precision, so text comparison orders them correctly and a
//! value reads back exactly as written; calendar dates as `YYYY-MM-DD`.

use std::path::Path;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use super::models::{FeedEntry, LeaderboardEntry, NonceRecord, User, WorkoutEntry, WorkoutQuery};
use super::store::{ActivityLog, NonceStore, StreakStore, Store, UserStore};
use crate::error::{DatabaseError, Result};
use crate::streak::StreakRecord;

const DB_FILE: &str = "castletics.db";

/// Page size used when an offset is given without a limit.
const DEFAULT_PAGE_SIZE: usize = 10;

/// SQLite database for users, streaks, workouts and challenges.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/castletics/castletics.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or the database cannot be
    /// opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for tests and dry runs).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "PRAGMA foreign_keys = ON;

                CREATE TABLE IF NOT EXISTS users (
                    id            TEXT PRIMARY KEY,
                    farcaster_id  INTEGER NOT NULL UNIQUE,
                    username      TEXT,
                    display_name  TEXT,
                    bio           TEXT,
                    pfp_url       TEXT,
                    created_at    TEXT NOT NULL,
                    updated_at    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS streaks (
                    user_id           TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                    current_streak    INTEGER NOT NULL DEFAULT 0,
                    longest_streak    INTEGER NOT NULL DEFAULT 0,
                    last_workout_date TEXT,
                    updated_at        TEXT NOT NULL,
                    CHECK (longest_streak >= current_streak)
                );

                CREATE TABLE IF NOT EXISTS workouts (
                    id               TEXT PRIMARY KEY,
                    user_id          TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                    workout_type     TEXT NOT NULL,
                    duration_minutes INTEGER,
                    calories_burned  INTEGER,
                    notes            TEXT,
                    completed_at     TEXT NOT NULL,
                    created_at       TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS auth_nonces (
                    nonce       TEXT PRIMARY KEY,
                    issued_at   TEXT NOT NULL,
                    consumed_at TEXT
                );

                -- Create indexes for common query patterns
                CREATE INDEX IF NOT EXISTS idx_workouts_user_completed ON workouts(user_id, completed_at);
                CREATE INDEX IF NOT EXISTS idx_workouts_completed_at ON workouts(completed_at);
                CREATE INDEX IF NOT EXISTS idx_streaks_current ON streaks(current_streak);
                CREATE INDEX IF NOT EXISTS idx_nonces_issued_at ON auth_nonces(issued_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }
}

impl UserStore for Database {
    fn user_by_id(&self, id: &str) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![id],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn user_by_fid(&self, fid: u64) -> Result<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE farcaster_id = ?1"),
                params![fid],
                user_from_row,
            )
            .optional()?;
        Ok(user)
    }

    fn insert_user(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "INSERT INTO users (id, farcaster_id, username, display_name, bio, pfp_url, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                user.id,
                user.farcaster_id,
                user.username,
                user.display_name,
                user.bio,
                user.pfp_url,
                ts(user.created_at),
                ts(user.updated_at),
            ],
        )?;
        Ok(())
    }

    fn update_user(&self, user: &User) -> Result<()> {
        self.conn.execute(
            "UPDATE users
             SET username = ?2, display_name = ?3, bio = ?4, pfp_url = ?5, updated_at = ?6
             WHERE id = ?1",
            params![
                user.id,
                user.username,
                user.display_name,
                user.bio,
                user.pfp_url,
                ts(user.updated_at),
            ],
        )?;
        Ok(())
    }
}

impl StreakStore for Database {
    fn load_streak(&self, user_id: &str) -> Result<Option<StreakRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT current_streak, longest_streak, last_workout_date FROM streaks WHERE user_id = ?1",
                params![user_id],
                |row| streak_from_row(row, 0),
            )
            .optional()?;
        Ok(record)
    }

    fn save_streak(&self, user_id: &str, record: &StreakRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO streaks (user_id, current_streak, longest_streak, last_workout_date, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(user_id) DO UPDATE SET
                current_streak = excluded.current_streak,
                longest_streak = excluded.longest_streak,
                last_workout_date = excluded.last_workout_date,
                updated_at = excluded.updated_at",
            params![
                user_id,
                record.current_streak,
                record.longest_streak,
                record.last_activity_date.map(|d| d.format(DATE_FORMAT).to_string()),
                ts(Utc::now()),
            ],
        )?;
        Ok(())
    }

    fn streak_leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT s.current_streak, s.longest_streak, s.last_workout_date,
                    s.user_id, COALESCE(u.username, ''), COALESCE(u.display_name, '')
             FROM streaks s
             LEFT JOIN users u ON u.id = s.user_id
             ORDER BY s.current_streak DESC, s.longest_streak DESC, s.user_id
             LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![sql_limit(limit)], |row| {
            Ok(LeaderboardEntry {
                streak: streak_from_row(row, 0)?,
                user_id: row.get(3)?,
                username: row.get(4)?,
                display_name: row.get(5)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}

impl ActivityLog for Database {
    fn insert_workout(&self, entry: &WorkoutEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO workouts (id, user_id, workout_type, duration_minutes, calories_burned, notes, completed_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                entry.id,
                entry.user_id,
                entry.workout_type,
                entry.duration_minutes,
                entry.calories_burned,
                entry.notes,
                ts(entry.completed_at),
                ts(entry.created_at),
            ],
        )?;
        Ok(())
    }

    fn workout_by_id(&self, workout_id: &str) -> Result<Option<WorkoutEntry>> {
        let entry = self
            .conn
            .query_row(
                &format!("SELECT {WORKOUT_COLUMNS} FROM workouts WHERE workouts.id = ?1"),
                params![workout_id],
                |row| workout_from_row(row, 0),
            )
            .optional()?;
        Ok(entry)
    }

    fn update_workout(&self, entry: &WorkoutEntry) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE workouts
             SET workout_type = ?3, duration_minutes = ?4, calories_burned = ?5,
                 notes = ?6, completed_at = ?7
             WHERE id = ?1 AND user_id = ?2",
            params![
                entry.id,
                entry.user_id,
                entry.workout_type,
                entry.duration_minutes,
                entry.calories_burned,
                entry.notes,
                ts(entry.completed_at),
            ],
        )?;
        Ok(updated > 0)
    }

    fn user_workouts(&self, user_id: &str, query: &WorkoutQuery) -> Result<Vec<WorkoutEntry>> {
        let limit = match (query.limit, query.offset) {
            (Some(limit), _) => sql_limit(limit),
            (None, Some(_)) => sql_limit(DEFAULT_PAGE_SIZE),
            (None, None) => -1,
        };
        let offset = query.offset.map(sql_limit).unwrap_or(0);

        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORKOUT_COLUMNS} FROM workouts
             WHERE user_id = ?1
               AND (?2 IS NULL OR completed_at >= ?2)
               AND (?3 IS NULL OR completed_at <= ?3)
             ORDER BY completed_at DESC, created_at DESC
             LIMIT ?4 OFFSET ?5"
        ))?;
        let rows = stmt.query_map(
            params![
                user_id,
                query.start.map(ts),
                query.end.map(ts),
                limit,
                offset
            ],
            |row| workout_from_row(row, 0),
        )?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn recent_workouts(&self, limit: usize) -> Result<Vec<FeedEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {WORKOUT_COLUMNS}, u.username, u.display_name, u.pfp_url
             FROM workouts
             LEFT JOIN users u ON u.id = workouts.user_id
             ORDER BY workouts.completed_at DESC
             LIMIT ?1"
        ))?;
        let rows = stmt.query_map(params![sql_limit(limit)], |row| {
            Ok(FeedEntry {
                workout: workout_from_row(row, 0)?,
                username: row.get(8)?,
                display_name: row.get(9)?,
                pfp_url: row.get(10)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn delete_workout(&self, workout_id: &str, user_id: &str) -> Result<bool> {
        let deleted = self.conn.execute(
            "DELETE FROM workouts WHERE id = ?1 AND user_id = ?2",
            params![workout_id, user_id],
        )?;
        Ok(deleted > 0)
    }
}

impl NonceStore for Database {
    fn insert_nonce(&self, nonce: &str, issued_at: DateTime<Utc>) -> Result<()> {
        self.conn.execute(
            "INSERT INTO auth_nonces (nonce, issued_at) VALUES (?1, ?2)",
            params![nonce, ts(issued_at)],
        )?;
        Ok(())
    }

    fn load_nonce(&self, nonce: &str) -> Result<Option<NonceRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT nonce, issued_at, consumed_at FROM auth_nonces WHERE nonce = ?1",
                params![nonce],
                |row| {
                    let consumed: Option<String> = row.get(2)?;
                    Ok(NonceRecord {
                        nonce: row.get(0)?,
                        issued_at: parse_ts(1, &row.get::<_, String>(1)?)?,
                        consumed_at: consumed.map(|s| parse_ts(2, &s)).transpose()?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn mark_nonce_consumed(&self, nonce: &str, at: DateTime<Utc>) -> Result<bool> {
        let updated = self.conn.execute(
            "UPDATE auth_nonces SET consumed_at = ?2 WHERE nonce = ?1 AND consumed_at IS NULL",
            params![nonce, ts(at)],
        )?;
        Ok(updated == 1)
    }

    fn purge_nonces_before(&self, cutoff: DateTime<Utc>) -> Result<usize> {
        let purged = self.conn.execute(
            "DELETE FROM auth_nonces WHERE issued_at < ?1",
            params![ts(cutoff)],
        )?;
        Ok(purged)
    }
}

impl Store for Database {
    fn atomically<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let out = f(self)?;
        tx.commit()?;
        Ok(out)
    }
}

// ── Row mapping ──────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

const USER_COLUMNS: &str =
    "id, farcaster_id, username, display_name, bio, pfp_url, created_at, updated_at";

const WORKOUT_COLUMNS: &str = "workouts.id, workouts.user_id, workouts.workout_type, \
     workouts.duration_minutes, workouts.calories_burned, workouts.notes, \
     workouts.completed_at, workouts.created_at";

fn ts(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn sql_limit(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

fn parse_ts(idx: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn parse_date(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        farcaster_id: row.get(1)?,
        username: row.get(2)?,
        display_name: row.get(3)?,
        bio: row.get(4)?,
        pfp_url: row.get(5)?,
        created_at: parse_ts(6, &row.get::<_, String>(6)?)?,
        updated_at: parse_ts(7, &row.get::<_, String>(7)?)?,
    })
}

fn streak_from_row(row: &Row<'_>, base: usize) -> rusqlite::Result<StreakRecord> {
    let last: Option<String> = row.get(base + 2)?;
    Ok(StreakRecord {
        current_streak: row.get(base)?,
        longest_streak: row.get(base + 1)?,
        last_activity_date: last.map(|s| parse_date(base + 2, &s)).transpose()?,
    })
}

fn workout_from_row(row: &Row<'_>, base: usize) -> rusqlite::Result<WorkoutEntry> {
    Ok(WorkoutEntry {
        id: row.get(base)?,
        user_id: row.get(base + 1)?,
        workout_type: row.get(base + 2)?,
        duration_minutes: row.get(base + 3)?,
        calories_burned: row.get(base + 4)?,
        notes: row.get(base + 5)?,
        completed_at: parse_ts(base + 6, &row.get::<_, String>(base + 6)?)?,
        created_at: parse_ts(base + 7, &row.get::<_, String>(base + 7)?)?,
    })
}
