//! Activity log contracts and implementations.
//!
//! # Responsibility
//! - Persist feed entries produced by roster and application actions.
//! - List entries newest first.
//!
//! # Invariants
//! - Timestamps are stored as `%Y-%m-%dT%H:%M:%S` text so lexical order
//!   equals chronological order.
//! - Read paths reject rows with unknown kinds or unparseable timestamps.

use crate::db::DbError;
use crate::model::activity::{Activity, ActivityKind};
use chrono::NaiveDateTime;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for activity persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted activity data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Paging options for listing activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Activity log interface.
pub trait ActivityRepository {
    fn record_activity(&self, activity: &Activity) -> RepoResult<()>;
    /// Lists entries ordered by timestamp descending, then id ascending.
    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>>;
    fn count_activities(&self) -> RepoResult<u64>;
}

impl<R: ActivityRepository + ?Sized> ActivityRepository for &R {
    fn record_activity(&self, activity: &Activity) -> RepoResult<()> {
        (**self).record_activity(activity)
    }

    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>> {
        (**self).list_activities(query)
    }

    fn count_activities(&self) -> RepoResult<u64> {
        (**self).count_activities()
    }
}

/// SQLite-backed activity log.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn record_activity(&self, activity: &Activity) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO activities (id, kind, actor, details, occurred_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                activity.id.as_str(),
                activity.kind.as_str(),
                activity.user.as_str(),
                activity.details.as_str(),
                activity.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            ],
        )?;
        Ok(())
    }

    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>> {
        let mut sql = String::from(
            "SELECT id, kind, actor, details, occurred_at
             FROM activities
             ORDER BY occurred_at DESC, id ASC",
        );
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut activities = Vec::new();
        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }
        Ok(activities)
    }

    fn count_activities(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM activities;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative activity count `{count}`")))
    }
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let kind_text: String = row.get("kind")?;
    let kind = ActivityKind::parse(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid activity kind `{kind_text}` in activities.kind"))
    })?;

    let occurred_text: String = row.get("occurred_at")?;
    let timestamp = NaiveDateTime::parse_from_str(&occurred_text, TIMESTAMP_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid timestamp `{occurred_text}` in activities.occurred_at"
        ))
    })?;

    Ok(Activity {
        id: row.get("id")?,
        kind,
        user: row.get("actor")?,
        details: row.get("details")?,
        timestamp,
    })
}

/// In-memory activity log for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryActivityRepository {
    entries: RefCell<Vec<Activity>>,
}

impl MemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ActivityRepository for MemoryActivityRepository {
    fn record_activity(&self, activity: &Activity) -> RepoResult<()> {
        let mut entries = self.entries.borrow_mut();
        if entries.iter().any(|existing| existing.id == activity.id) {
            return Err(RepoError::InvalidData(format!(
                "duplicate activity id `{}`",
                activity.id
            )));
        }
        entries.push(activity.clone());
        Ok(())
    }

    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>> {
        let mut activities = self.entries.borrow().clone();
        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(activities
            .into_iter()
            .skip(query.offset as usize)
            .take(limit)
            .collect())
    }

    fn count_activities(&self) -> RepoResult<u64> {
        Ok(self.entries.borrow().len() as u64)
    }
}
