//! Ordered schema migrations.
//!
//! # Invariants
//! - Versions start at 1 and grow by one per step.
//! - Each step runs in its own transaction together with its
//!   `user_version` bump, so a failed step leaves the previous version intact.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::Connection;

const STEPS: &[(u32, &str)] = &[
    (1, include_str!("0001_collections.sql")),
    (2, include_str!("0002_activities.sql")),
];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    STEPS.last().map_or(0, |(version, _)| *version)
}

/// Schema version recorded in `conn`.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Applies every step above the recorded version. Returns the number of
/// steps applied.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is newer than this build.
/// - `Migration` naming the failed step.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<usize> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        return Err(DbError::UnsupportedSchemaVersion { found, supported });
    }

    let mut applied = 0;
    for &(version, sql) in STEPS.iter().filter(|(version, _)| *version > found) {
        apply_step(conn, version, sql).map_err(|source| DbError::Migration { version, source })?;
        debug!("event=db_migrate_step module=db status=ok version={version}");
        applied += 1;
    }

    if applied > 0 {
        info!("event=db_migrate module=db status=ok from={found} to={supported} steps={applied}");
    }
    Ok(applied)
}

fn apply_step(conn: &mut Connection, version: u32, sql: &str) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(sql)?;
    tx.pragma_update(None, "user_version", version)?;
    tx.commit()
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, latest_version, schema_version, STEPS};
    use rusqlite::Connection;

    #[test]
    fn versions_are_contiguous_from_one() {
        for (index, (version, _)) in STEPS.iter().enumerate() {
            assert_eq!(*version as usize, index + 1);
        }
    }

    #[test]
    fn second_run_applies_nothing() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(apply_migrations(&mut conn).unwrap(), STEPS.len());
        assert_eq!(apply_migrations(&mut conn).unwrap(), 0);
        assert_eq!(schema_version(&conn).unwrap(), latest_version());
    }
}
