//! Application review use-case service.
//!
//! # Responsibility
//! - Submit, list and decide rehab applications.
//! - Produce duration estimates for reviewers.
//!
//! # Invariants
//! - Only `Pending` applications can be approved or declined.
//! - Decisions stamp `date_updated` and record `application-updated`.
//! - Submissions record `client-applied`.
//! - Application ids are `APP-NNN`, allocated as the highest suffix plus one.
//!   Submissions fail once that suffix would exceed `u32::MAX`.

use crate::model::activity::ActivityKind;
use crate::model::application::{Application, ApplicationStatus};
use crate::model::substance::SubstanceDurationTable;
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::collection_repo::{load_collection, save_collection, Collection};
use crate::repo::collection_store::CollectionStore;
use crate::service::activity_feed::ActivityFeed;
use crate::service::estimate_service::{estimate_rehab, EstimateError, RehabEstimate};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const APPLICATION_ID_PREFIX: &str = "APP-";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    NotFound(String),
    AlreadyDecided {
        id: String,
        status: ApplicationStatus,
    },
    MissingFields,
    IdSpaceExhausted,
    Estimate(EstimateError),
}

impl Display for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "application not found: {id}"),
            Self::AlreadyDecided { id, status } => {
                write!(f, "application {id} is already {}", status.as_str())
            }
            Self::MissingFields => {
                f.write_str("Social worker, client name and at least one substance are required.")
            }
            Self::IdSpaceExhausted => f.write_str("no application ids left"),
            Self::Estimate(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ApplicationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Estimate(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EstimateError> for ApplicationError {
    fn from(value: EstimateError) -> Self {
        Self::Estimate(value)
    }
}

/// Input for a new application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationRequest {
    pub social_worker: String,
    pub client_name: String,
    pub level_of_addiction: String,
    pub reason: String,
    pub submitted_docs: Vec<String>,
    pub substances: Vec<String>,
}

/// Application service over a collection store and an activity log.
pub struct ApplicationService<S: CollectionStore, R: ActivityRepository> {
    store: S,
    feed: ActivityFeed<R>,
    durations: SubstanceDurationTable,
    applications: Vec<Application>,
}

impl<S: CollectionStore, R: ActivityRepository> ApplicationService<S, R> {
    pub fn open(store: S, feed: ActivityFeed<R>, durations: SubstanceDurationTable) -> Self {
        let applications = load_collection::<Application>(&store);
        info!(
            "event=applications_open module=service status=ok count={}",
            applications.len()
        );
        Self {
            store,
            feed,
            durations,
            applications,
        }
    }

    pub fn applications(&self) -> &[Application] {
        &self.applications
    }

    pub fn get(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|app| app.id == id)
    }

    /// Submits a pending application received on `received`.
    pub fn submit(
        &mut self,
        request: ApplicationRequest,
        received: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<Application, ApplicationError> {
        let social_worker = request.social_worker.trim();
        let client_name = request.client_name.trim();
        if social_worker.is_empty() || client_name.is_empty() || request.substances.is_empty() {
            return Err(ApplicationError::MissingFields);
        }

        let application = Application {
            id: self.next_application_id()?,
            social_worker: social_worker.to_string(),
            client_name: client_name.to_string(),
            status: ApplicationStatus::Pending,
            date_received: received,
            date_updated: received,
            level_of_addiction: request.level_of_addiction,
            reason: request.reason,
            submitted_docs: request.submitted_docs,
            substances: request.substances,
        };
        self.applications.push(application.clone());
        self.persist();
        self.feed.record(
            ActivityKind::ClientApplied,
            format!("SocialWorker - {}", application.social_worker),
            format!(
                "Client {} applied for rehab ({})",
                application.client_name, application.id
            ),
            at,
        );
        Ok(application)
    }

    /// Estimates the program for application `id` from its received date.
    pub fn estimate(&self, id: &str) -> Result<RehabEstimate, ApplicationError> {
        let application = self
            .get(id)
            .ok_or_else(|| ApplicationError::NotFound(id.to_string()))?;
        Ok(estimate_rehab(
            &self.durations,
            application.substances.as_slice(),
            application.date_received,
        )?)
    }

    /// Approves a pending application.
    pub fn approve(
        &mut self,
        id: &str,
        actor: &str,
        on: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<Application, ApplicationError> {
        self.decide(id, ApplicationStatus::Approved, actor, on, at)
    }

    /// Declines a pending application.
    pub fn decline(
        &mut self,
        id: &str,
        actor: &str,
        on: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<Application, ApplicationError> {
        self.decide(id, ApplicationStatus::Rejected, actor, on, at)
    }

    fn decide(
        &mut self,
        id: &str,
        status: ApplicationStatus,
        actor: &str,
        on: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<Application, ApplicationError> {
        let application = self
            .applications
            .iter_mut()
            .find(|app| app.id == id)
            .ok_or_else(|| ApplicationError::NotFound(id.to_string()))?;
        if !application.status.is_pending() {
            return Err(ApplicationError::AlreadyDecided {
                id: id.to_string(),
                status: application.status,
            });
        }

        application.status = status;
        application.date_updated = on;
        let decided = application.clone();
        self.persist();
        self.feed.record(
            ActivityKind::ApplicationUpdated,
            actor,
            format!(
                "Application {} status changed to {}",
                decided.id,
                status.as_str()
            ),
            at,
        );
        info!(
            "event=application_decide module=service status=ok decision={}",
            status.as_str()
        );
        Ok(decided)
    }

    fn next_application_id(&self) -> Result<String, ApplicationError> {
        let next = self
            .applications
            .iter()
            .filter_map(|app| app.id.strip_prefix(APPLICATION_ID_PREFIX))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(ApplicationError::IdSpaceExhausted)?;
        Ok(format!("{APPLICATION_ID_PREFIX}{next:03}"))
    }

    fn persist(&self) {
        if let Err(err) = save_collection(&self.store, &self.applications) {
            warn!(
                "event=collection_save module=service status=error key={} error={err}",
                Application::STORAGE_KEY
            );
        }
    }
}
