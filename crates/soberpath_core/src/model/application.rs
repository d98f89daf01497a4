//! Rehab application model.
//!
//! # Invariants
//! - `id` is unique within the application collection (`APP-NNN`).
//! - `date_updated` is never earlier than `date_received` for decided
//!   applications produced by this crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether the application still awaits a decision.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Application submitted by a social worker on behalf of a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub social_worker: String,
    pub client_name: String,
    pub status: ApplicationStatus,
    pub date_received: NaiveDate,
    pub date_updated: NaiveDate,
    pub level_of_addiction: String,
    pub reason: String,
    pub submitted_docs: Vec<String>,
    pub substances: Vec<String>,
}

/// Seed applications used when storage holds no valid records.
pub fn seed_applications() -> Vec<Application> {
    vec![
        seed(
            "APP-001",
            "Jonath Barren",
            "Michael Smith",
            (2025, 7, 1),
            (2025, 7, 4),
            "Severe",
            "Alcohol addiction is disrupting work and family life.",
            &["Medical_Report.pdf", "ID_Copy.jpg"],
            &["Alcohol"],
        ),
        seed(
            "APP-002",
            "Zach Hlongwane",
            "Lerato Mokoena",
            (2025, 7, 2),
            (2025, 7, 2),
            "Moderate",
            "Daily dagga use affecting school attendance.",
            &["Referral_Letter.pdf"],
            &["Dagga", "Inhalants"],
        ),
        seed(
            "APP-003",
            "Jonath Barren",
            "Sipho Ndlovu",
            (2025, 7, 5),
            (2025, 7, 5),
            "Severe",
            "Long-term heroin dependency with relapse history.",
            &["Medical_Report.pdf", "Police_Clearance.pdf"],
            &["Heroin", "Dagga"],
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    social_worker: &str,
    client_name: &str,
    received: (i32, u32, u32),
    updated: (i32, u32, u32),
    level: &str,
    reason: &str,
    docs: &[&str],
    substances: &[&str],
) -> Application {
    Application {
        id: id.to_string(),
        social_worker: social_worker.to_string(),
        client_name: client_name.to_string(),
        status: ApplicationStatus::Pending,
        date_received: seed_date(received),
        date_updated: seed_date(updated),
        level_of_addiction: level.to_string(),
        reason: reason.to_string(),
        submitted_docs: docs.iter().map(|doc| doc.to_string()).collect(),
        substances: substances.iter().map(|name| name.to_string()).collect(),
    }
}

fn seed_date((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
