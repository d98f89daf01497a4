//! Role-based visibility for navigation and the activity feed.
//!
//! # Invariants
//! - Nav items without a role annotation are visible to every role; the
//!   rule applies recursively to sublists.
//! - Activity visibility follows the fixed role-to-kinds table below, not a
//!   per-item annotation.
//! - Visible activities are ordered by timestamp descending; ties keep their
//!   input order.

use crate::model::activity::{Activity, ActivityKind};
use crate::model::nav::NavItem;
use crate::model::role::Role;

/// Activity kinds a role may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityScope {
    All,
    Only(&'static [ActivityKind]),
}

impl ActivityScope {
    pub fn allows(self, kind: ActivityKind) -> bool {
        match self {
            Self::All => true,
            Self::Only(kinds) => kinds.contains(&kind),
        }
    }
}

const SOCIAL_WORKER_KINDS: &[ActivityKind] = &[ActivityKind::ClientApplied];
const NGO_ADMIN_KINDS: &[ActivityKind] = &[ActivityKind::AdminAdded, ActivityKind::AdminRemoved];

/// Fixed role-to-activity-kinds table.
pub fn activity_scope(role: Role) -> ActivityScope {
    match role {
        Role::SocialWorker => ActivityScope::Only(SOCIAL_WORKER_KINDS),
        Role::NgoAdmin => ActivityScope::Only(NGO_ADMIN_KINDS),
        Role::RehabAdmin => ActivityScope::All,
    }
}

/// Returns the nav entries `role` may see, pruning sublists the same way.
pub fn visible_nav_items(role: Role, items: &[NavItem]) -> Vec<NavItem> {
    items
        .iter()
        .filter(|item| item.is_visible_to(role))
        .map(|item| NavItem {
            sublist: visible_nav_items(role, &item.sublist),
            ..item.clone()
        })
        .collect()
}

/// Returns the activities `role` may see, most recent first.
pub fn visible_activities(role: Role, activities: &[Activity]) -> Vec<Activity> {
    let scope = activity_scope(role);
    let mut visible: Vec<Activity> = activities
        .iter()
        .filter(|activity| scope.allows(activity.kind))
        .cloned()
        .collect();
    visible.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    visible
}

#[cfg(test)]
mod tests {
    use super::{activity_scope, visible_nav_items, ActivityScope};
    use crate::model::activity::ActivityKind;
    use crate::model::nav::{default_nav_items, NavItem};
    use crate::model::role::Role;

    fn titles(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|item| item.title.as_str()).collect()
    }

    #[test]
    fn rehab_admin_sees_shared_and_rehab_entries() {
        let visible = visible_nav_items(Role::RehabAdmin, &default_nav_items());
        assert_eq!(
            titles(&visible),
            vec!["Home", "Dashboard", "View Applications", "Add Admin", "User Profile"]
        );
    }

    #[test]
    fn ngo_admin_sees_roster_groups() {
        let visible = visible_nav_items(Role::NgoAdmin, &default_nav_items());
        assert_eq!(
            titles(&visible),
            vec!["Home", "Dashboard", "Social Workers", "Clients", "NGO Admin", "User Profile"]
        );
    }

    #[test]
    fn sublists_are_filtered_recursively() {
        let items = vec![NavItem::leaf("Group", "/g").with_sublist(vec![
            NavItem::leaf("Open", "open"),
            NavItem::leaf("Rehab only", "rehab").restricted_to(&[Role::RehabAdmin]),
        ])];
        let visible = visible_nav_items(Role::SocialWorker, &items);
        assert_eq!(titles(&visible[0].sublist), vec!["Open"]);
    }

    #[test]
    fn scope_table_is_fixed() {
        assert_eq!(activity_scope(Role::RehabAdmin), ActivityScope::All);
        assert!(activity_scope(Role::NgoAdmin).allows(ActivityKind::AdminRemoved));
        assert!(!activity_scope(Role::NgoAdmin).allows(ActivityKind::ClientApplied));
    }
}
