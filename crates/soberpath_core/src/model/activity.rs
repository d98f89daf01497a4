//! Activity feed entries.
//!
//! # Invariants
//! - `kind` is one of the four fixed activity kinds.
//! - `timestamp` is a local wall-clock time without timezone.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Tag on a feed entry used for role-based filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityKind {
    AdminAdded,
    ClientApplied,
    ApplicationUpdated,
    AdminRemoved,
}

impl ActivityKind {
    /// All kinds in declaration order.
    pub const ALL: [ActivityKind; 4] = [
        ActivityKind::AdminAdded,
        ActivityKind::ClientApplied,
        ActivityKind::ApplicationUpdated,
        ActivityKind::AdminRemoved,
    ];

    /// Stable string tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AdminAdded => "admin-added",
            Self::ClientApplied => "client-applied",
            Self::ApplicationUpdated => "application-updated",
            Self::AdminRemoved => "admin-removed",
        }
    }

    /// Parses a stable string tag.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// One entry in the activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    /// Actor display label, e.g. `SocialWorker - Zach Hlongwane`.
    pub user: String,
    pub details: String,
    pub timestamp: NaiveDateTime,
}

impl Activity {
    /// Creates an entry with a generated id.
    pub fn new(
        kind: ActivityKind,
        user: impl Into<String>,
        details: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            user: user.into(),
            details: details.into(),
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActivityKind;

    #[test]
    fn kind_tags_parse_back() {
        for kind in ActivityKind::ALL {
            assert_eq!(ActivityKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ActivityKind::parse("admin-promoted"), None);
    }
}
