//! Roster management use-case service.
//!
//! # Responsibility
//! - Add, edit and remove administrators, social workers and clients.
//! - Mirror every mutation into the collection store.
//! - Record admin add/remove actions in the activity feed.
//!
//! # Invariants
//! - In-memory rosters are authoritative; store failures are logged only.
//! - New ids are `max(existing) + 1`; ids are never reused while the
//!   highest record exists.
//! - A roster whose highest id is `u32::MAX` rejects additions unchanged.
//! - Editing a client keeps its file number.

use crate::model::activity::ActivityKind;
use crate::model::roster::{
    Admin, AdminDraft, Client, ClientDraft, SocialWorker, SocialWorkerDraft,
    SocialWorkerRegistration, ValidationError,
};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::collection_repo::{load_collection, save_collection, Collection};
use crate::repo::collection_store::CollectionStore;
use crate::service::activity_feed::ActivityFeed;
use chrono::NaiveDateTime;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for roster use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    Validation(ValidationError),
    NotFound { collection: &'static str, id: u32 },
    IdSpaceExhausted { collection: &'static str },
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { collection, id } => write!(f, "{collection} record not found: {id}"),
            Self::IdSpaceExhausted { collection } => write!(f, "{collection} has no ids left"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound { .. } | Self::IdSpaceExhausted { .. } => None,
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

trait RosterRecord: Collection {
    fn record_id(&self) -> u32;
}

impl RosterRecord for Admin {
    fn record_id(&self) -> u32 {
        self.id
    }
}

impl RosterRecord for SocialWorker {
    fn record_id(&self) -> u32 {
        self.id
    }
}

impl RosterRecord for Client {
    fn record_id(&self) -> u32 {
        self.id
    }
}

fn next_id<T: RosterRecord>(items: &[T]) -> Result<u32, RosterError> {
    items
        .iter()
        .map(RosterRecord::record_id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(RosterError::IdSpaceExhausted {
            collection: T::STORAGE_KEY,
        })
}

fn position_of<T: RosterRecord>(items: &[T], id: u32) -> Result<usize, RosterError> {
    items
        .iter()
        .position(|item| item.record_id() == id)
        .ok_or(RosterError::NotFound {
            collection: T::STORAGE_KEY,
            id,
        })
}

/// Roster service over a collection store and an activity log.
pub struct RosterService<S: CollectionStore, R: ActivityRepository> {
    store: S,
    feed: ActivityFeed<R>,
    admins: Vec<Admin>,
    social_workers: Vec<SocialWorker>,
    clients: Vec<Client>,
}

impl<S: CollectionStore, R: ActivityRepository> RosterService<S, R> {
    /// Loads all three rosters from `store`, seeding empty ones.
    pub fn open(store: S, feed: ActivityFeed<R>) -> Self {
        let admins = load_collection::<Admin>(&store);
        let social_workers = load_collection::<SocialWorker>(&store);
        let clients = load_collection::<Client>(&store);
        info!(
            "event=roster_open module=service status=ok admins={} social_workers={} clients={}",
            admins.len(),
            social_workers.len(),
            clients.len()
        );
        Self {
            store,
            feed,
            admins,
            social_workers,
            clients,
        }
    }

    pub fn feed(&self) -> &ActivityFeed<R> {
        &self.feed
    }

    pub fn admins(&self) -> &[Admin] {
        &self.admins
    }

    pub fn social_workers(&self) -> &[SocialWorker] {
        &self.social_workers
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Adds an administrator and records `admin-added` by `actor`.
    pub fn add_admin(
        &mut self,
        actor: &str,
        draft: AdminDraft,
        at: NaiveDateTime,
    ) -> Result<Admin, RosterError> {
        let admin = draft.into_admin(next_id(&self.admins)?)?;
        self.admins.push(admin.clone());
        persist(&self.store, &self.admins);
        self.feed.record(
            ActivityKind::AdminAdded,
            actor,
            format!("Added new administrator: {}", admin.full_name()),
            at,
        );
        Ok(admin)
    }

    /// Replaces an administrator's fields, keeping its id.
    pub fn update_admin(&mut self, id: u32, draft: AdminDraft) -> Result<Admin, RosterError> {
        let index = position_of(&self.admins, id)?;
        let admin = draft.into_admin(id)?;
        self.admins[index] = admin.clone();
        persist(&self.store, &self.admins);
        Ok(admin)
    }

    /// Removes an administrator and records `admin-removed` by `actor`.
    pub fn remove_admin(
        &mut self,
        actor: &str,
        id: u32,
        at: NaiveDateTime,
    ) -> Result<Admin, RosterError> {
        let index = position_of(&self.admins, id)?;
        let admin = self.admins.remove(index);
        persist(&self.store, &self.admins);
        self.feed.record(
            ActivityKind::AdminRemoved,
            actor,
            format!("Removed administrator: {}", admin.full_name()),
            at,
        );
        Ok(admin)
    }

    pub fn add_social_worker(
        &mut self,
        draft: SocialWorkerDraft,
    ) -> Result<SocialWorker, RosterError> {
        let worker = draft.into_social_worker(next_id(&self.social_workers)?)?;
        self.social_workers.push(worker.clone());
        persist(&self.store, &self.social_workers);
        Ok(worker)
    }

    /// Adds a social worker through the stricter registration form.
    pub fn register_social_worker(
        &mut self,
        registration: SocialWorkerRegistration,
    ) -> Result<SocialWorker, RosterError> {
        let draft = registration.into_draft()?;
        self.add_social_worker(draft)
    }

    pub fn update_social_worker(
        &mut self,
        id: u32,
        draft: SocialWorkerDraft,
    ) -> Result<SocialWorker, RosterError> {
        let index = position_of(&self.social_workers, id)?;
        let worker = draft.into_social_worker(id)?;
        self.social_workers[index] = worker.clone();
        persist(&self.store, &self.social_workers);
        Ok(worker)
    }

    pub fn remove_social_worker(&mut self, id: u32) -> Result<SocialWorker, RosterError> {
        let index = position_of(&self.social_workers, id)?;
        let worker = self.social_workers.remove(index);
        persist(&self.store, &self.social_workers);
        Ok(worker)
    }

    /// Adds a client with a `FILE-<epoch-ms>` file number derived from `at`.
    pub fn add_client(&mut self, draft: ClientDraft, at: NaiveDateTime) -> Result<Client, RosterError> {
        let file_number = format!("FILE-{}", at.and_utc().timestamp_millis());
        let client = draft.into_client(next_id(&self.clients)?, file_number)?;
        self.clients.push(client.clone());
        persist(&self.store, &self.clients);
        Ok(client)
    }

    pub fn update_client(&mut self, id: u32, draft: ClientDraft) -> Result<Client, RosterError> {
        let index = position_of(&self.clients, id)?;
        let file_number = self.clients[index].file_number.clone();
        let client = draft.into_client(id, file_number)?;
        self.clients[index] = client.clone();
        persist(&self.store, &self.clients);
        Ok(client)
    }

    pub fn remove_client(&mut self, id: u32) -> Result<Client, RosterError> {
        let index = position_of(&self.clients, id)?;
        let client = self.clients.remove(index);
        persist(&self.store, &self.clients);
        Ok(client)
    }
}

fn persist<T: Collection>(store: &impl CollectionStore, items: &[T]) {
    if let Err(err) = save_collection(store, items) {
        warn!(
            "event=collection_save module=service status=error key={} error={err}",
            T::STORAGE_KEY
        );
    }
}
