//! Navigation tree entries.

use crate::model::role::Role;
use serde::{Deserialize, Serialize};

/// One sidebar entry, optionally restricted to a set of roles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub active: bool,
    pub collapsible: bool,
    /// `None` means visible to every role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sublist: Vec<NavItem>,
}

impl NavItem {
    /// Creates an unrestricted leaf entry.
    pub fn leaf(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
            icon: None,
            active: true,
            collapsible: false,
            roles: None,
            sublist: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Restricts visibility to `roles`.
    pub fn restricted_to(mut self, roles: &[Role]) -> Self {
        self.roles = Some(roles.to_vec());
        self
    }

    /// Attaches children and marks the entry collapsible.
    pub fn with_sublist(mut self, sublist: Vec<NavItem>) -> Self {
        self.collapsible = true;
        self.sublist = sublist;
        self
    }

    /// Whether `role` may see this entry (ignoring children).
    pub fn is_visible_to(&self, role: Role) -> bool {
        match &self.roles {
            None => true,
            Some(roles) => roles.contains(&role),
        }
    }
}

/// Sidebar tree of the console.
pub fn default_nav_items() -> Vec<NavItem> {
    vec![
        NavItem::leaf("Home", "/authentication/recent-activities").with_icon("ion:home-sharp"),
        NavItem::leaf("Dashboard", "/authentication/dashboard").with_icon("icomoon-free:drawer"),
        NavItem::leaf("Social Workers", "/authentication/")
            .with_icon("mingcute:grid-fill")
            .restricted_to(&[Role::NgoAdmin])
            .with_sublist(vec![
                NavItem::leaf("All Social Worker", "socialworkerlist").inactive(),
                NavItem::leaf("Add Social Worker", "addsocialworker").inactive(),
            ]),
        NavItem::leaf("Clients", "/authentication")
            .with_icon("tabler:shopping-bag")
            .restricted_to(&[Role::NgoAdmin])
            .with_sublist(vec![
                NavItem::leaf("All Clients", "clientlist"),
                NavItem::leaf("Add Clients", "addclient"),
            ]),
        NavItem::leaf("NGO Admin", "authentication")
            .with_icon("f7:exclamationmark-shield-fill")
            .restricted_to(&[Role::NgoAdmin])
            .with_sublist(vec![
                NavItem::leaf("All  Admins", "adminlistngo"),
                NavItem::leaf("Add Admin", "addadminngo"),
            ]),
        NavItem::leaf("View Applications", "/authentication/applicationmanagement")
            .with_icon("mingcute:grid-fill")
            .restricted_to(&[Role::RehabAdmin]),
        NavItem::leaf("Add Admin", "/authentication/addrehabadmin")
            .with_icon("tabler:shopping-bag")
            .restricted_to(&[Role::RehabAdmin]),
        NavItem::leaf("User Profile", "/authentication/userprofile")
            .with_icon("ph:user-circle-fill"),
    ]
}
