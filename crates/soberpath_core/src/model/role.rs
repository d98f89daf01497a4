//! Access tiers of the console.
//!
//! # Invariants
//! - The set of roles is closed; unknown tags are rejected at parse time.
//! - Roles are passed explicitly into every filtering call.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One of the three fixed access tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Manages applications and rehab-side administrators.
    RehabAdmin,
    /// Manages social workers, clients and NGO administrators.
    NgoAdmin,
    /// Submits client applications.
    SocialWorker,
}

/// Stable tag for `Role::RehabAdmin`.
pub const ROLE_REHAB_ADMIN: &str = "rehab-admin";
/// Stable tag for `Role::NgoAdmin`.
pub const ROLE_NGO_ADMIN: &str = "ngo-admin";
/// Stable tag for `Role::SocialWorker`.
pub const ROLE_SOCIAL_WORKER: &str = "social-worker";

impl Role {
    /// All roles in declaration order.
    pub const ALL: [Role; 3] = [Role::RehabAdmin, Role::NgoAdmin, Role::SocialWorker];

    /// Stable string tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RehabAdmin => ROLE_REHAB_ADMIN,
            Self::NgoAdmin => ROLE_NGO_ADMIN,
            Self::SocialWorker => ROLE_SOCIAL_WORKER,
        }
    }

    /// Human-readable heading, e.g. `rehab admin`.
    pub fn display_name(self) -> String {
        self.as_str().replace('-', " ")
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoleError(pub String);

impl Display for UnknownRoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown role `{}`; expected rehab-admin|ngo-admin|social-worker",
            self.0
        )
    }
}

impl Error for UnknownRoleError {}

/// Parses a role tag. Surrounding whitespace and case are ignored.
pub fn parse_role(value: &str) -> Result<Role, UnknownRoleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        ROLE_REHAB_ADMIN => Ok(Role::RehabAdmin),
        ROLE_NGO_ADMIN => Ok(Role::NgoAdmin),
        ROLE_SOCIAL_WORKER => Ok(Role::SocialWorker),
        other => Err(UnknownRoleError(other.to_string())),
    }
}
