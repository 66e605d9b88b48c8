//! Database module - SQLite storage for workouts and logged sets
//!
//! Timestamps are stored as RFC 3339 UTC text with millisecond precision, so
//! plain text comparison orders them correctly.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analytics::progression::ProgressionExposure;
use crate::analytics::progression_rate::{select_best_sets, StrengthTrendPoint, TrendSet};
use crate::analytics::rolling_week::to_iso;
use crate::analytics::volume::{Effort, LoggedSet};
use crate::exercises::{default_rep_range, find_exercise};

const ANCHOR_KEY: &str = "first_workout_anchor";

const SET_COLUMNS: &str = "s.id, s.workout_id, s.exercise_id, s.set_order, s.reps, s.load_kg, \
    s.effort, s.is_warmup, s.target_rep_high, s.logged_at";

/// Workout record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    pub program_day: Option<String>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Logged set record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: String,
    /// 1-based order within (workout, exercise)
    pub set_order: u32,
    pub reps: u32,
    pub load_kg: f64,
    pub effort: Effort,
    pub is_warmup: bool,
    pub target_rep_high: u32,
    pub logged_at: DateTime<Utc>,
}

/// Set to insert; order is assigned by the store
#[derive(Debug, Clone)]
pub struct NewSet {
    pub workout_id: i64,
    pub exercise_id: String,
    pub reps: u32,
    pub load_kg: f64,
    pub effort: Effort,
    pub is_warmup: bool,
    /// Falls back to the top of the exercise's program rep range
    pub target_rep_high: Option<u32>,
    pub logged_at: DateTime<Utc>,
}

/// Database wrapper
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        debug!("Opened database at {}", path);
        Ok(db)
    }

    /// Private in-memory database, discarded on drop
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                program_day TEXT,
                started_at TEXT NOT NULL,
                completed_at TEXT
            );

            CREATE TABLE IF NOT EXISTS sets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                workout_id INTEGER NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT NOT NULL,
                set_order INTEGER NOT NULL,
                reps INTEGER NOT NULL,
                load_kg REAL NOT NULL,
                effort TEXT NOT NULL,
                is_warmup INTEGER NOT NULL DEFAULT 0,
                target_rep_high INTEGER NOT NULL,
                logged_at TEXT NOT NULL,
                UNIQUE (workout_id, exercise_id, set_order)
            );

            CREATE INDEX IF NOT EXISTS idx_sets_logged_at ON sets(logged_at);
            CREATE INDEX IF NOT EXISTS idx_sets_exercise ON sets(exercise_id);

            CREATE TABLE IF NOT EXISTS app_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Start a new workout
    pub fn start_workout(
        &self,
        started_at: DateTime<Utc>,
        program_day: Option<&str>,
    ) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO workouts (program_day, started_at) VALUES (?1, ?2)",
            params![program_day, to_iso(started_at)],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("Started workout {}", id);
        Ok(id)
    }

    /// Add a set, assigning the next order for its exercise in the workout
    pub fn add_set(&self, set: &NewSet) -> Result<i64> {
        if find_exercise(&set.exercise_id).is_none() {
            bail!("unknown exercise: {}", set.exercise_id);
        }

        let tx = self.conn.unchecked_transaction()?;

        let exists: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM workouts WHERE id = ?1)",
            params![set.workout_id],
            |row| row.get(0),
        )?;
        if !exists {
            bail!("workout {} not found", set.workout_id);
        }

        let set_order: u32 = tx.query_row(
            "SELECT COALESCE(MAX(set_order), 0) + 1 FROM sets
             WHERE workout_id = ?1 AND exercise_id = ?2",
            params![set.workout_id, set.exercise_id],
            |row| row.get(0),
        )?;
        let target_rep_high = set
            .target_rep_high
            .unwrap_or_else(|| default_rep_range(&set.exercise_id).1);

        tx.execute(
            "INSERT INTO sets (workout_id, exercise_id, set_order, reps, load_kg, effort,
                               is_warmup, target_rep_high, logged_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                set.workout_id,
                set.exercise_id,
                set_order,
                set.reps,
                set.load_kg,
                set.effort.as_str(),
                set.is_warmup,
                target_rep_high,
                to_iso(set.logged_at),
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!(
            "Logged set {} ({} #{}) in workout {}",
            id, set.exercise_id, set_order, set.workout_id
        );
        Ok(id)
    }

    /// Delete a set; returns false when it did not exist
    pub fn delete_set(&self, id: i64) -> Result<bool> {
        let deleted = self.conn.execute("DELETE FROM sets WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    /// Mark a workout completed and refresh the first-workout anchor
    pub fn complete_workout(&self, id: i64, completed_at: DateTime<Utc>) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        let updated = tx.execute(
            "UPDATE workouts SET completed_at = ?1 WHERE id = ?2",
            params![to_iso(completed_at), id],
        )?;
        if updated == 0 {
            bail!("workout {} not found", id);
        }
        refresh_anchor(&tx)?;
        tx.commit()?;

        info!("Completed workout {}", id);
        Ok(())
    }

    /// Delete a workout with its sets and refresh the anchor
    pub fn delete_workout(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM sets WHERE workout_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM workouts WHERE id = ?1", params![id])?;
        refresh_anchor(&tx)?;
        tx.commit()?;
        Ok(deleted > 0)
    }

    /// Recompute the anchor from scratch, e.g. after a bulk restore
    pub fn recompute_first_workout_anchor(&self) -> Result<Option<DateTime<Utc>>> {
        let tx = self.conn.unchecked_transaction()?;
        let anchor = refresh_anchor(&tx)?;
        tx.commit()?;
        Ok(anchor)
    }

    /// Earliest start among completed workouts, None before the first one
    pub fn first_workout_anchor(&self) -> Result<Option<DateTime<Utc>>> {
        let value: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM app_meta WHERE key = ?1",
                params![ANCHOR_KEY],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(v) => Ok(Some(DateTime::parse_from_rfc3339(&v)?.with_timezone(&Utc))),
            None => Ok(None),
        }
    }

    /// Most recent workouts first
    pub fn get_workouts(&self, limit: usize) -> Result<Vec<Workout>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, program_day, started_at, completed_at FROM workouts
             ORDER BY started_at DESC LIMIT ?1",
        )?;

        let workouts = stmt
            .query_map(params![limit as i64], |row| {
                Ok(Workout {
                    id: row.get(0)?,
                    program_day: row.get(1)?,
                    started_at: timestamp(row, 2)?,
                    completed_at: optional_timestamp(row, 3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(workouts)
    }

    pub fn get_workout_sets(&self, workout_id: i64) -> Result<Vec<WorkoutSet>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SET_COLUMNS} FROM sets s WHERE s.workout_id = ?1 ORDER BY s.logged_at, s.id"
        ))?;
        let sets = stmt
            .query_map(params![workout_id], set_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sets)
    }

    /// Sets of completed workouts logged in `[start, end)`, with muscle mappings
    pub fn get_sets_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<LoggedSet>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {SET_COLUMNS} FROM sets s
             JOIN workouts w ON w.id = s.workout_id
             WHERE w.completed_at IS NOT NULL AND s.logged_at >= ?1 AND s.logged_at < ?2
             ORDER BY s.logged_at, s.id"
        ))?;
        let rows = stmt
            .query_map(params![to_iso(start), to_iso(end)], set_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        let sets = rows
            .into_iter()
            .filter_map(|row| {
                let Some(exercise) = find_exercise(&row.exercise_id) else {
                    warn!("Skipping set {} with unknown exercise {}", row.id, row.exercise_id);
                    return None;
                };
                Some(LoggedSet {
                    set_id: row.id,
                    exercise_id: row.exercise_id,
                    exercise_name: exercise.name.to_string(),
                    category: exercise.category,
                    reps: row.reps,
                    load_kg: row.load_kg,
                    effort: row.effort,
                    is_warmup: row.is_warmup,
                    logged_at: row.logged_at,
                    mappings: exercise.mappings.to_vec(),
                })
            })
            .collect();

        Ok(sets)
    }

    /// Last `limit` completed workouts with working sets of the exercise,
    /// most recent first
    pub fn get_recent_exercise_exposures(
        &self,
        exercise_id: &str,
        limit: usize,
    ) -> Result<Vec<ProgressionExposure>> {
        let mut workouts_stmt = self.conn.prepare(
            "SELECT w.id, w.completed_at FROM workouts w
             WHERE w.completed_at IS NOT NULL
               AND EXISTS (
                   SELECT 1 FROM sets s
                   WHERE s.workout_id = w.id AND s.exercise_id = ?1 AND s.is_warmup = 0
               )
             ORDER BY w.completed_at DESC, w.id DESC
             LIMIT ?2",
        )?;
        let workouts = workouts_stmt
            .query_map(params![exercise_id, limit as i64], |row| {
                Ok((row.get::<_, i64>(0)?, timestamp(row, 1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut sets_stmt = self.conn.prepare(
            "SELECT reps, load_kg, target_rep_high FROM sets
             WHERE workout_id = ?1 AND exercise_id = ?2 AND is_warmup = 0
             ORDER BY set_order",
        )?;

        let mut exposures = Vec::with_capacity(workouts.len());
        for (workout_id, completed_at) in workouts {
            let sets = sets_stmt
                .query_map(params![workout_id, exercise_id], |row| {
                    Ok((row.get::<_, u32>(0)?, row.get::<_, f64>(1)?, row.get::<_, u32>(2)?))
                })?
                .collect::<Result<Vec<_>, _>>()?;

            exposures.push(ProgressionExposure {
                workout_id,
                completed_at,
                target_rep_high: sets.iter().map(|s| s.2).max().unwrap_or(0),
                working_set_reps: sets.iter().map(|s| s.0).collect(),
                top_load_kg: sets.iter().map(|s| s.1).fold(0.0, f64::max),
            });
        }

        Ok(exposures)
    }

    /// All sets of an exercise from completed workouts, warmups included
    pub fn get_trend_sets(&self, exercise_id: &str) -> Result<Vec<TrendSet>> {
        let exercise_name = find_exercise(exercise_id).map_or(exercise_id, |e| e.name);

        let mut stmt = self.conn.prepare(
            "SELECT s.workout_id, w.completed_at, s.reps, s.load_kg, s.is_warmup, s.logged_at
             FROM sets s JOIN workouts w ON w.id = s.workout_id
             WHERE w.completed_at IS NOT NULL AND s.exercise_id = ?1
             ORDER BY s.logged_at, s.id",
        )?;
        let sets = stmt
            .query_map(params![exercise_id], |row| {
                Ok(TrendSet {
                    workout_id: row.get(0)?,
                    exercise_id: exercise_id.to_string(),
                    exercise_name: exercise_name.to_string(),
                    completed_at: timestamp(row, 1)?,
                    reps: row.get(2)?,
                    load_kg: row.get(3)?,
                    is_warmup: row.get(4)?,
                    logged_at: timestamp(row, 5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(sets)
    }

    /// One best set per completed workout, oldest first
    pub fn get_strength_trend_series(&self, exercise_id: &str) -> Result<Vec<StrengthTrendPoint>> {
        Ok(select_best_sets(&self.get_trend_sets(exercise_id)?))
    }

    /// Completed workouts with `completed_at` in `[start, end)`
    pub fn count_completed_workouts_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<u32> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM workouts WHERE completed_at >= ?1 AND completed_at < ?2",
            params![to_iso(start), to_iso(end)],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

/// Store the earliest completed-workout start, or clear it when none remain
fn refresh_anchor(conn: &Connection) -> Result<Option<DateTime<Utc>>> {
    let earliest: Option<String> = conn.query_row(
        "SELECT MIN(started_at) FROM workouts WHERE completed_at IS NOT NULL",
        [],
        |row| row.get(0),
    )?;

    match earliest {
        Some(value) => {
            conn.execute(
                "INSERT INTO app_meta (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![ANCHOR_KEY, value],
            )?;
            Ok(Some(DateTime::parse_from_rfc3339(&value)?.with_timezone(&Utc)))
        }
        None => {
            conn.execute("DELETE FROM app_meta WHERE key = ?1", params![ANCHOR_KEY])?;
            Ok(None)
        }
    }
}

fn parse_column(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|d| d.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let value: String = row.get(idx)?;
    parse_column(idx, &value)
}

fn optional_timestamp(row: &Row, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let value: Option<String> = row.get(idx)?;
    value.map(|v| parse_column(idx, &v)).transpose()
}

fn set_from_row(row: &Row) -> rusqlite::Result<WorkoutSet> {
    let effort: String = row.get(6)?;
    let effort = effort
        .parse::<Effort>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, e.into()))?;

    Ok(WorkoutSet {
        id: row.get(0)?,
        workout_id: row.get(1)?,
        exercise_id: row.get(2)?,
        set_order: row.get(3)?,
        reps: row.get(4)?,
        load_kg: row.get(5)?,
        effort,
        is_warmup: row.get(7)?,
        target_rep_high: row.get(8)?,
        logged_at: timestamp(row, 9)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 17, 0, 0).unwrap() + Duration::days(n)
    }

    fn create_set(
        workout_id: i64,
        exercise_id: &str,
        reps: u32,
        load_kg: f64,
        at: DateTime<Utc>,
    ) -> NewSet {
        NewSet {
            workout_id,
            exercise_id: exercise_id.to_string(),
            reps,
            load_kg,
            effort: Effort::Hard,
            is_warmup: false,
            target_rep_high: None,
            logged_at: at,
        }
    }

    /// Completed workout on `day(n)` with the given sets of one exercise
    fn completed_workout(db: &Database, n: i64, exercise_id: &str, sets: &[(u32, f64)]) -> i64 {
        let id = db.start_workout(day(n), None).unwrap();
        for (i, (reps, load)) in sets.iter().enumerate() {
            let at = day(n) + Duration::minutes(5 * i as i64 + 5);
            db.add_set(&create_set(id, exercise_id, *reps, *load, at)).unwrap();
        }
        db.complete_workout(id, day(n) + Duration::hours(1)).unwrap();
        id
    }

    #[test]
    fn test_set_order_per_exercise_per_workout() {
        let db = Database::open_in_memory().unwrap();
        let w1 = db.start_workout(day(0), Some("A")).unwrap();
        db.add_set(&create_set(w1, "bench_press", 8, 60.0, day(0))).unwrap();
        db.add_set(&create_set(w1, "back_squat", 5, 80.0, day(0) + Duration::minutes(1))).unwrap();
        db.add_set(&create_set(w1, "bench_press", 8, 60.0, day(0) + Duration::minutes(2))).unwrap();

        let w2 = db.start_workout(day(2), Some("B")).unwrap();
        db.add_set(&create_set(w2, "bench_press", 8, 62.5, day(2))).unwrap();

        let orders: Vec<(String, u32)> = db
            .get_workout_sets(w1)
            .unwrap()
            .into_iter()
            .map(|s| (s.exercise_id, s.set_order))
            .collect();
        assert_eq!(
            orders,
            vec![
                ("bench_press".to_string(), 1),
                ("back_squat".to_string(), 1),
                ("bench_press".to_string(), 2),
            ]
        );
        assert_eq!(db.get_workout_sets(w2).unwrap()[0].set_order, 1);
    }

    #[test]
    fn test_default_target_rep_high() {
        let db = Database::open_in_memory().unwrap();
        let w = db.start_workout(day(0), None).unwrap();
        db.add_set(&create_set(w, "back_squat", 5, 80.0, day(0))).unwrap();
        let mut custom = create_set(w, "bench_press", 5, 60.0, day(0));
        custom.target_rep_high = Some(6);
        db.add_set(&custom).unwrap();

        let sets = db.get_workout_sets(w).unwrap();
        assert_eq!(sets[0].target_rep_high, 8);
        assert_eq!(sets[1].target_rep_high, 6);
    }

    #[test]
    fn test_add_set_rejects_unknown_exercise_and_workout() {
        let db = Database::open_in_memory().unwrap();
        let w = db.start_workout(day(0), None).unwrap();
        assert!(db.add_set(&create_set(w, "juggling", 5, 10.0, day(0))).is_err());
        assert!(db.add_set(&create_set(w + 100, "bench_press", 5, 60.0, day(0))).is_err());
        assert!(db.get_workout_sets(w).unwrap().is_empty());
    }

    #[test]
    fn test_anchor_is_earliest_completed_start() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.first_workout_anchor().unwrap(), None);

        let unfinished = db.start_workout(day(-10), None).unwrap();
        let later = completed_workout(&db, 5, "bench_press", &[(8, 60.0)]);
        assert_eq!(db.first_workout_anchor().unwrap(), Some(day(5)));

        completed_workout(&db, 1, "bench_press", &[(8, 60.0)]);
        assert_eq!(db.first_workout_anchor().unwrap(), Some(day(1)));

        // completing an older workout moves the anchor back
        db.complete_workout(unfinished, day(-9)).unwrap();
        assert_eq!(db.first_workout_anchor().unwrap(), Some(day(-10)));

        db.delete_workout(unfinished).unwrap();
        assert_eq!(db.first_workout_anchor().unwrap(), Some(day(1)));

        db.delete_workout(later).unwrap();
        assert_eq!(db.recompute_first_workout_anchor().unwrap(), Some(day(1)));
    }

    #[test]
    fn test_anchor_cleared_when_no_completed_workouts() {
        let db = Database::open_in_memory().unwrap();
        let w = completed_workout(&db, 0, "bench_press", &[(8, 60.0)]);
        assert!(db.first_workout_anchor().unwrap().is_some());
        assert!(db.delete_workout(w).unwrap());
        assert_eq!(db.first_workout_anchor().unwrap(), None);
    }

    #[test]
    fn test_complete_unknown_workout_fails() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.complete_workout(42, day(0)).is_err());
    }

    #[test]
    fn test_sets_by_date_range() {
        let db = Database::open_in_memory().unwrap();
        completed_workout(&db, 0, "bench_press", &[(8, 60.0), (8, 60.0)]);
        completed_workout(&db, 7, "back_squat", &[(5, 80.0)]);
        let open = db.start_workout(day(3), None).unwrap();
        db.add_set(&create_set(open, "pull_up", 8, 0.0, day(3))).unwrap();

        // end bound is exclusive
        let sets = db.get_sets_by_date_range(day(0), day(7)).unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets.iter().all(|s| s.exercise_id == "bench_press"));
        assert_eq!(sets[0].exercise_name, "Bench Press");
        assert_eq!(sets[0].mappings.len(), 3);

        let all = db.get_sets_by_date_range(day(-1), day(14)).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_recent_exposures() {
        let db = Database::open_in_memory().unwrap();
        completed_workout(&db, 0, "bench_press", &[(10, 60.0), (9, 60.0)]);
        let middle = completed_workout(&db, 3, "bench_press", &[(10, 62.5), (10, 60.0), (8, 60.0)]);
        let latest = completed_workout(&db, 6, "bench_press", &[(10, 62.5), (10, 62.5)]);
        completed_workout(&db, 8, "back_squat", &[(5, 100.0)]);

        let exposures = db.get_recent_exercise_exposures("bench_press", 2).unwrap();
        assert_eq!(exposures.len(), 2);
        assert_eq!(exposures[0].workout_id, latest);
        assert_eq!(exposures[1].workout_id, middle);
        assert_eq!(exposures[1].working_set_reps, vec![10, 10, 8]);
        assert_eq!(exposures[1].top_load_kg, 62.5);
        assert_eq!(exposures[1].target_rep_high, 10);
    }

    #[test]
    fn test_exposures_ignore_warmups() {
        let db = Database::open_in_memory().unwrap();
        let w = db.start_workout(day(0), None).unwrap();
        let mut warmup = create_set(w, "bench_press", 10, 100.0, day(0));
        warmup.is_warmup = true;
        db.add_set(&warmup).unwrap();
        db.add_set(&create_set(w, "bench_press", 8, 60.0, day(0) + Duration::minutes(3))).unwrap();
        db.complete_workout(w, day(0) + Duration::hours(1)).unwrap();

        let exposures = db.get_recent_exercise_exposures("bench_press", 5).unwrap();
        assert_eq!(exposures[0].working_set_reps, vec![8]);
        assert_eq!(exposures[0].top_load_kg, 60.0);
    }

    #[test]
    fn test_strength_trend_series() {
        let db = Database::open_in_memory().unwrap();
        completed_workout(&db, 0, "back_squat", &[(5, 80.0), (8, 75.0)]);
        completed_workout(&db, 7, "back_squat", &[(5, 85.0)]);

        let series = db.get_strength_trend_series("back_squat").unwrap();
        assert_eq!(series.len(), 2);
        // 75 x 8 = 95.0 beats 80 x 5 = 93.3
        assert_eq!(series[0].best_set_load_kg, 75.0);
        assert_eq!(series[1].best_set_load_kg, 85.0);
        assert_eq!(series[0].exercise_name, "Back Squat");
        assert!(series[0].completed_at < series[1].completed_at);
    }

    #[test]
    fn test_count_completed_workouts() {
        let db = Database::open_in_memory().unwrap();
        completed_workout(&db, 0, "bench_press", &[(8, 60.0)]);
        completed_workout(&db, 2, "bench_press", &[(8, 60.0)]);
        completed_workout(&db, 9, "bench_press", &[(8, 60.0)]);
        db.start_workout(day(4), None).unwrap();

        assert_eq!(db.count_completed_workouts_between(day(0), day(7)).unwrap(), 2);
    }

    #[test]
    fn test_delete_set() {
        let db = Database::open_in_memory().unwrap();
        let w = db.start_workout(day(0), None).unwrap();
        let id = db.add_set(&create_set(w, "bench_press", 8, 60.0, day(0))).unwrap();
        assert!(db.delete_set(id).unwrap());
        assert!(!db.delete_set(id).unwrap());
    }
}
