//! Activity feed use-case service.
//!
//! # Responsibility
//! - Record feed entries on behalf of other services.
//! - Serve the role-filtered feed for the home page.
//!
//! # Invariants
//! - An empty log is presented as the seed feed; seeds are never persisted.
//! - Recording failures are logged and do not fail the calling action.

use crate::model::activity::{Activity, ActivityKind};
use crate::model::role::Role;
use crate::repo::activity_repo::{ActivityListQuery, ActivityRepository, RepoResult};
use crate::service::access_service::visible_activities;
use chrono::{NaiveDate, NaiveDateTime};
use log::warn;

/// Feed service over an activity repository.
pub struct ActivityFeed<R: ActivityRepository> {
    repo: R,
}

impl<R: ActivityRepository> ActivityFeed<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records one entry, logging instead of failing on storage errors.
    pub fn record(
        &self,
        kind: ActivityKind,
        user: impl Into<String>,
        details: impl Into<String>,
        at: NaiveDateTime,
    ) -> Activity {
        let activity = Activity::new(kind, user, details, at);
        if let Err(err) = self.repo.record_activity(&activity) {
            warn!(
                "event=activity_record module=service status=error kind={} error={err}",
                kind.as_str()
            );
        }
        activity
    }

    /// All entries, newest first, or the seed feed when the log is empty.
    pub fn all(&self) -> RepoResult<Vec<Activity>> {
        let activities = self.repo.list_activities(&ActivityListQuery::default())?;
        if activities.is_empty() {
            return Ok(seed_activities());
        }
        Ok(activities)
    }

    /// Entries visible to `role`, newest first.
    pub fn visible_to(&self, role: Role) -> RepoResult<Vec<Activity>> {
        Ok(visible_activities(role, &self.all()?))
    }
}

/// Feed shown before any action has been recorded.
pub fn seed_activities() -> Vec<Activity> {
    [
        (
            "1",
            ActivityKind::AdminAdded,
            "Andani Baloyi",
            "Added new rehab administrator: Sizwe",
            (2025, 7, 9, 10, 15),
        ),
        (
            "2",
            ActivityKind::ClientApplied,
            "SocialWorker - Zach Hlongwane",
            "Client Michael Smith applied for rehab (APP-001)",
            (2025, 7, 9, 9, 45),
        ),
        (
            "3",
            ActivityKind::ApplicationUpdated,
            "Sizwe",
            "Application APP-002 status changed to Approved",
            (2025, 7, 8, 16, 20),
        ),
        (
            "4",
            ActivityKind::AdminRemoved,
            "Thobani Danisa",
            "Removed rehab administrator: John Roe",
            (2025, 7, 8, 14, 5),
        ),
    ]
    .into_iter()
    .map(|(id, kind, user, details, (year, month, day, hour, minute))| Activity {
        id: id.to_string(),
        kind,
        user: user.to_string(),
        details: details.to_string(),
        timestamp: NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .unwrap_or_default(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::{seed_activities, ActivityFeed};
    use crate::model::activity::ActivityKind;
    use crate::model::role::Role;
    use crate::repo::activity_repo::MemoryActivityRepository;
    use chrono::NaiveDate;

    #[test]
    fn empty_log_serves_seed_feed() {
        let feed = ActivityFeed::new(MemoryActivityRepository::new());
        let all = feed.all().unwrap();
        assert_eq!(all.len(), seed_activities().len());

        let worker_view = feed.visible_to(Role::SocialWorker).unwrap();
        assert_eq!(worker_view.len(), 1);
        assert_eq!(worker_view[0].kind, ActivityKind::ClientApplied);
    }

    #[test]
    fn recorded_entries_replace_seed_feed() {
        let feed = ActivityFeed::new(MemoryActivityRepository::new());
        let at = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        feed.record(ActivityKind::AdminAdded, "Sizwe", "Added admin", at);

        let all = feed.all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].details, "Added admin");
    }
}
