//! Dashboard statistics derived from applications and clients.

use crate::model::application::{Application, ApplicationStatus};
use crate::model::roster::Client;
use chrono::{Days, NaiveDate};

const DAYS_PER_WEEK: u64 = 7;

/// Headline counters for the dashboard cards and status chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_applications: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    pub active_clients: usize,
}

/// Application count for one seven-day window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// `Week 1` is the oldest window.
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub applications: usize,
}

pub fn dashboard_stats(applications: &[Application], clients: &[Client]) -> DashboardStats {
    let count = |status: ApplicationStatus| {
        applications
            .iter()
            .filter(|app| app.status == status)
            .count()
    };
    DashboardStats {
        total_applications: applications.len(),
        pending: count(ApplicationStatus::Pending),
        approved: count(ApplicationStatus::Approved),
        rejected: count(ApplicationStatus::Rejected),
        active_clients: clients.len(),
    }
}

/// Counts received applications in `weeks` consecutive windows ending on
/// `last_day` (inclusive). Windows that would start before the calendar
/// minimum are omitted.
pub fn weekly_application_counts(
    applications: &[Application],
    last_day: NaiveDate,
    weeks: u32,
) -> Vec<WeekBucket> {
    let mut buckets = Vec::new();
    for offset in (0..u64::from(weeks)).rev() {
        let Some(end) = last_day.checked_sub_days(Days::new(offset * DAYS_PER_WEEK)) else {
            continue;
        };
        let Some(start) = end.checked_sub_days(Days::new(DAYS_PER_WEEK - 1)) else {
            continue;
        };
        let applications = applications
            .iter()
            .filter(|app| app.date_received >= start && app.date_received <= end)
            .count();
        buckets.push(WeekBucket {
            label: format!("Week {}", buckets.len() + 1),
            start,
            end,
            applications,
        });
    }
    buckets
}
