use chrono::{NaiveDate, NaiveDateTime};
use soberpath_core::model::roster::{seed_admins, seed_clients};
use soberpath_core::repo::collection_repo::{ADMIN_LIST_KEY, CLIENT_LIST_KEY};
use soberpath_core::{
    save_collection, search_clients, ActivityFeed, ActivityKind, ActivityRepository, Admin,
    AdminDraft, Client, ClientDraft, CollectionStore, MemoryActivityRepository,
    MemoryCollectionStore, ProgressError, ProgressService, RegistrationIssue, Role, RosterError,
    RosterService, SocialWorkerDraft, SocialWorkerRegistration, ValidationError,
};

fn at(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 7, 10)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn admin_draft(first: &str) -> AdminDraft {
    AdminDraft {
        first_name: first.to_string(),
        last_name: "Mokoena".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        password: "changeme".to_string(),
    }
}

fn client_draft(name: &str) -> ClientDraft {
    ClientDraft {
        client_name: name.to_string(),
        age: Some(33),
        gender: "male".to_string(),
        suburb: "Zondi".to_string(),
        address: "9 Elm St, Zondi".to_string(),
        assigned_worker: "Worker A".to_string(),
        selected_substances: vec!["CAT".to_string()],
        ..ClientDraft::default()
    }
}

#[test]
fn add_admin_allocates_next_id_and_records_activity() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));
    assert_eq!(roster.admins(), seed_admins().as_slice());

    let admin = roster
        .add_admin("Andani Baloyi", admin_draft("Sizwe"), at(10))
        .unwrap();
    assert_eq!(admin.id, 4);
    assert_eq!(roster.admins().len(), 4);

    let recorded = roster.feed().visible_to(Role::NgoAdmin).unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].kind, ActivityKind::AdminAdded);
    assert_eq!(recorded[0].user, "Andani Baloyi");
    assert_eq!(recorded[0].details, "Added new administrator: Sizwe Mokoena");

    let reopened = RosterService::open(&store, ActivityFeed::new(&log));
    assert_eq!(reopened.admins().len(), 4);
}

#[test]
fn ids_follow_the_highest_remaining_record() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    roster.remove_admin("Thobani Danisa", 2, at(9)).unwrap();
    let added = roster.add_admin("Thobani Danisa", admin_draft("Lerato"), at(10)).unwrap();
    assert_eq!(added.id, 4);

    roster.remove_admin("Thobani Danisa", 4, at(11)).unwrap();
    let again = roster.add_admin("Thobani Danisa", admin_draft("Naledi"), at(12)).unwrap();
    assert_eq!(again.id, 4);

    assert_eq!(log.count_activities().unwrap(), 4);
    let newest = roster.feed().all().unwrap();
    assert_eq!(newest[0].kind, ActivityKind::AdminAdded);
    assert_eq!(newest[1].kind, ActivityKind::AdminRemoved);
}

#[test]
fn invalid_admin_is_rejected_without_side_effects() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    let draft = AdminDraft {
        email: "sizwe.example.com".to_string(),
        ..admin_draft("Sizwe")
    };
    let err = roster.add_admin("Andani Baloyi", draft, at(10)).unwrap_err();
    assert_eq!(err, RosterError::Validation(ValidationError::InvalidEmail));
    assert_eq!(roster.admins().len(), 3);
    assert_eq!(log.count_activities().unwrap(), 0);
    assert!(store.is_empty());
}

#[test]
fn updating_and_removing_unknown_records_fails() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    let err = roster.update_admin(42, admin_draft("Ghost")).unwrap_err();
    assert!(matches!(err, RosterError::NotFound { id: 42, .. }));
    assert!(roster.remove_client(42).is_err());
    assert!(roster.remove_social_worker(42).is_err());
}

#[test]
fn social_worker_edit_and_registration() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    let updated = roster
        .update_social_worker(
            2,
            SocialWorkerDraft {
                first_name: "Robert".to_string(),
                last_name: "Johnson".to_string(),
                email: "rob.johnson@example.com".to_string(),
                phone: "0837654321".to_string(),
                password: "bobSecret!".to_string(),
            },
        )
        .unwrap();
    assert_eq!(updated.id, 2);
    assert_eq!(roster.social_workers()[1].first_name, "Robert");

    let rejected = roster
        .register_social_worker(SocialWorkerRegistration {
            name: "Zach".to_string(),
            surname: "Hlongwane".to_string(),
            id_number: "12345".to_string(),
            email: "zach@example.com".to_string(),
            phone: "082123456".to_string(),
            password: "weakpass".to_string(),
        })
        .unwrap_err();
    assert_eq!(
        rejected,
        RosterError::Validation(ValidationError::Registration(vec![
            RegistrationIssue::IdNumber,
            RegistrationIssue::Phone,
            RegistrationIssue::Password,
        ]))
    );

    let registered = roster
        .register_social_worker(SocialWorkerRegistration {
            name: "Zach".to_string(),
            surname: "Hlongwane".to_string(),
            id_number: "1503915123087".to_string(),
            email: "zach@example.com".to_string(),
            phone: "0821234567".to_string(),
            password: "s3cure!pass".to_string(),
        })
        .unwrap();
    assert_eq!(registered.id, 4);
    assert_eq!(registered.full_name(), "Zach Hlongwane");
}

#[test]
fn client_file_numbers_come_from_the_creation_time() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    let created_at = at(10);
    let client = roster.add_client(client_draft("Thabo Nkosi"), created_at).unwrap();
    assert_eq!(client.id, 4);
    assert_eq!(
        client.file_number,
        format!("FILE-{}", created_at.and_utc().timestamp_millis())
    );

    let edited = roster
        .update_client(
            client.id,
            ClientDraft {
                age: Some(34),
                ..client_draft("Thabo Nkosi")
            },
        )
        .unwrap();
    assert_eq!(edited.file_number, client.file_number);
    assert_eq!(edited.age, Some(34));
}

#[test]
fn client_validation_messages() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));

    let blank_age = ClientDraft {
        age: None,
        ..client_draft("Thabo Nkosi")
    };
    let err = roster.add_client(blank_age, at(10)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please fill in all required fields: Name, Age, Gender, Suburb, Address."
    );

    let negative = ClientDraft {
        age: Some(-1),
        ..client_draft("Thabo Nkosi")
    };
    let err = roster.add_client(negative, at(10)).unwrap_err();
    assert_eq!(err.to_string(), "Age cannot be negative.");
    assert_eq!(roster.clients().len(), 3);
}

#[test]
fn progress_history_and_client_search() {
    let store = MemoryCollectionStore::new();
    let mut progress = ProgressService::open(&store);
    let day = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();

    progress.add_progress(2, "  Attended group session ", day).unwrap();
    progress.add_progress(1, "Missed check-in", day).unwrap();
    progress.add_progress(2, "Sober for two weeks", day).unwrap();
    assert_eq!(
        progress.add_progress(2, "   ", day).unwrap_err(),
        ProgressError::EmptyComment
    );

    let reopened = ProgressService::open(&store);
    let history: Vec<&str> = reopened
        .history(2)
        .iter()
        .map(|entry| entry.comment.as_str())
        .collect();
    assert_eq!(history, vec!["Attended group session", "Sober for two weeks"]);

    let clients = seed_clients();
    let hits = search_clients(&clients, "doe");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);
}

#[test]
fn exhausted_admin_ids_reject_additions_unchanged() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let last = Admin {
        id: u32::MAX,
        ..seed_admins().remove(0)
    };
    save_collection(&store, &[last.clone()]).unwrap();
    let stored = store.read(ADMIN_LIST_KEY).unwrap();

    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));
    let err = roster
        .add_admin("Andani Baloyi", admin_draft("Sizwe"), at(10))
        .unwrap_err();
    assert_eq!(
        err,
        RosterError::IdSpaceExhausted {
            collection: ADMIN_LIST_KEY
        }
    );
    assert_eq!(roster.admins(), &[last]);
    assert_eq!(store.read(ADMIN_LIST_KEY).unwrap(), stored);
    assert_eq!(log.count_activities().unwrap(), 0);
}

#[test]
fn exhausted_client_ids_reject_additions_unchanged() {
    let store = MemoryCollectionStore::new();
    let log = MemoryActivityRepository::new();
    let last = Client {
        id: u32::MAX,
        ..seed_clients().remove(0)
    };
    save_collection(&store, &[last.clone()]).unwrap();

    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));
    let err = roster.add_client(client_draft("Thabo Nkosi"), at(10)).unwrap_err();
    assert_eq!(
        err,
        RosterError::IdSpaceExhausted {
            collection: CLIENT_LIST_KEY
        }
    );
    assert_eq!(roster.clients(), &[last]);
}

#[test]
fn progress_requires_a_client_on_the_roster() {
    let store = MemoryCollectionStore::new();
    let mut progress = ProgressService::open(&store);
    let day = NaiveDate::from_ymd_opt(2025, 7, 12).unwrap();

    assert_eq!(
        progress.add_progress(42, "Attended group session", day).unwrap_err(),
        ProgressError::UnknownClient(42)
    );
    assert!(progress.history(42).is_empty());

    let log = MemoryActivityRepository::new();
    let mut roster = RosterService::open(&store, ActivityFeed::new(&log));
    let client = roster
        .add_client(client_draft("Thabo Nkosi"), day.and_hms_opt(9, 0, 0).unwrap())
        .unwrap();
    progress
        .add_progress(client.id, "First session attended", day)
        .unwrap();
    assert_eq!(progress.history(client.id).len(), 1);
}
