//! Core domain logic for the SoberPath rehabilitation console.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, ConsoleConfig};
pub use logging::{active_logging, init_logging, LogLevel, LoggingError};
pub use model::activity::{Activity, ActivityKind};
pub use model::application::{Application, ApplicationStatus};
pub use model::housing::{House, Room, RoomType};
pub use model::nav::{default_nav_items, NavItem};
pub use model::progress::ProgressEntry;
pub use model::role::{parse_role, Role, UnknownRoleError};
pub use model::roster::{
    Admin, AdminDraft, Client, ClientDraft, RegistrationIssue, SocialWorker, SocialWorkerDraft,
    SocialWorkerRegistration, ValidationError,
};
pub use model::substance::{SubstanceDurationTable, DEFAULT_SUBSTANCE_DAYS};
pub use repo::activity_repo::{
    ActivityListQuery, ActivityRepository, MemoryActivityRepository, RepoError, RepoResult,
    SqliteActivityRepository,
};
pub use repo::collection_repo::{
    decode_collection, encode_collection, load_collection, save_collection, Collection,
    DecodeError, DecodedCollection, COLLECTION_SCHEMA_VERSION,
};
pub use repo::collection_store::{
    CollectionStore, MemoryCollectionStore, SqliteCollectionStore, StoreError, StoreResult,
};
pub use service::access_service::{
    activity_scope, visible_activities, visible_nav_items, ActivityScope,
};
pub use service::activity_feed::{seed_activities, ActivityFeed};
pub use service::allocation_service::{
    AllocationError, AllocationOutcome, AllocationStep, AllocationWizard, HouseSummary,
    HousingService, RoomFilter,
};
pub use service::application_service::{ApplicationError, ApplicationRequest, ApplicationService};
pub use service::dashboard_service::{
    dashboard_stats, weekly_application_counts, DashboardStats, WeekBucket,
};
pub use service::estimate_service::{estimate_rehab, EstimateError, ProgramLength, RehabEstimate};
pub use service::progress_service::{search_clients, ProgressError, ProgressService};
pub use service::roster_service::{RosterError, RosterService};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
