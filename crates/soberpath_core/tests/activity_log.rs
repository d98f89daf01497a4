use chrono::{NaiveDate, NaiveDateTime};
use soberpath_core::db::open_db_in_memory;
use soberpath_core::{
    Activity, ActivityFeed, ActivityKind, ActivityListQuery, ActivityRepository,
    MemoryActivityRepository, RepoError, Role, SqliteActivityRepository,
};

fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, day)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn entry(id: &str, kind: ActivityKind, timestamp: NaiveDateTime) -> Activity {
    Activity {
        id: id.to_string(),
        kind,
        user: "Sizwe".to_string(),
        details: format!("entry {id}"),
        timestamp,
    }
}

#[test]
fn sqlite_log_orders_newest_first_with_id_tiebreak() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteActivityRepository::new(&conn);

    repo.record_activity(&entry("b", ActivityKind::AdminAdded, at(9, 10, 0)))
        .unwrap();
    repo.record_activity(&entry("a", ActivityKind::AdminRemoved, at(9, 10, 0)))
        .unwrap();
    repo.record_activity(&entry("c", ActivityKind::ClientApplied, at(10, 8, 30)))
        .unwrap();

    let listed = repo.list_activities(&ActivityListQuery::default()).unwrap();
    let ids: Vec<&str> = listed.iter().map(|activity| activity.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
    assert_eq!(listed[0].timestamp, at(10, 8, 30));
    assert_eq!(listed[0].kind, ActivityKind::ClientApplied);
    assert_eq!(repo.count_activities().unwrap(), 3);
}

#[test]
fn paging_matches_between_sqlite_and_memory() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteActivityRepository::new(&conn);
    let memory = MemoryActivityRepository::new();

    for (index, hour) in [8, 12, 9, 15, 11].into_iter().enumerate() {
        let activity = entry(&index.to_string(), ActivityKind::ApplicationUpdated, at(9, hour, 0));
        sqlite.record_activity(&activity).unwrap();
        memory.record_activity(&activity).unwrap();
    }

    let query = ActivityListQuery {
        limit: Some(2),
        offset: 1,
    };
    let from_sqlite = sqlite.list_activities(&query).unwrap();
    let from_memory = memory.list_activities(&query).unwrap();
    assert_eq!(from_sqlite, from_memory);
    let hours: Vec<String> = from_sqlite
        .iter()
        .map(|activity| activity.timestamp.format("%H").to_string())
        .collect();
    assert_eq!(hours, vec!["12", "11"]);

    let tail = ActivityListQuery {
        limit: None,
        offset: 4,
    };
    assert_eq!(sqlite.list_activities(&tail).unwrap().len(), 1);
    assert_eq!(memory.list_activities(&tail).unwrap().len(), 1);
}

#[test]
fn duplicate_ids_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let sqlite = SqliteActivityRepository::new(&conn);
    let memory = MemoryActivityRepository::new();
    let activity = entry("dup", ActivityKind::AdminAdded, at(9, 10, 0));

    sqlite.record_activity(&activity).unwrap();
    assert!(sqlite.record_activity(&activity).is_err());

    memory.record_activity(&activity).unwrap();
    assert!(matches!(
        memory.record_activity(&activity),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn corrupted_rows_surface_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO activities (id, kind, actor, details, occurred_at)
         VALUES ('x', 'admin-added', 'Sizwe', 'bad time', 'yesterday');",
        [],
    )
    .unwrap();

    let err = SqliteActivityRepository::new(&conn)
        .list_activities(&ActivityListQuery::default())
        .unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn feed_switches_from_seed_to_recorded_entries() {
    let conn = open_db_in_memory().unwrap();
    let feed = ActivityFeed::new(SqliteActivityRepository::new(&conn));

    let seeded = feed.visible_to(Role::NgoAdmin).unwrap();
    assert_eq!(seeded.len(), 2);

    let recorded = feed.record(
        ActivityKind::ClientApplied,
        "SocialWorker - Zach Hlongwane",
        "Client Lindiwe Dube applied for rehab (APP-004)",
        at(11, 9, 0),
    );
    assert!(feed.visible_to(Role::NgoAdmin).unwrap().is_empty());

    let worker_view = feed.visible_to(Role::SocialWorker).unwrap();
    assert_eq!(worker_view, vec![recorded]);
}
