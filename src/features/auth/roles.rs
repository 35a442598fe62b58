//! Realm roles and the single resolved role that drives dashboards and menus.

use crate::app_lib::paths;
use std::collections::BTreeSet;

pub const ADMIN: &str = "admin";
pub const COMPANY: &str = "company";
pub const CLIENT: &str = "client";

/// Role used to pick dashboards and menus. Variants are ordered by priority.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Company,
    Client,
    #[default]
    None,
}

impl Role {
    /// Realm role name, `None` for users without a known role.
    #[must_use]
    pub fn realm_name(self) -> Option<&'static str> {
        match self {
            Role::Admin => Some(ADMIN),
            Role::Company => Some(COMPANY),
            Role::Client => Some(CLIENT),
            Role::None => None,
        }
    }

    /// Default landing page for the role.
    #[must_use]
    pub fn dashboard_path(self) -> Option<&'static str> {
        match self {
            Role::Admin => Some(paths::ADMIN_DASHBOARD),
            Role::Company => Some(paths::COMPANY_DASHBOARD),
            Role::Client => Some(paths::CLIENT_DASHBOARD),
            Role::None => None,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Company => "Company",
            Role::Client => "Client",
            Role::None => "No role",
        }
    }

    /// Sidebar entries for the role.
    #[must_use]
    pub fn menu(self) -> &'static [MenuItem] {
        match self {
            Role::Admin => ADMIN_MENU,
            Role::Company => COMPANY_MENU,
            Role::Client => CLIENT_MENU,
            Role::None => &[],
        }
    }
}

/// One navigation entry. `icon` is a Material Symbols name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: &'static str,
}

const ADMIN_MENU: &[MenuItem] = &[
    MenuItem {
        label: "Dashboard",
        path: paths::ADMIN_DASHBOARD,
        icon: "dashboard",
    },
    MenuItem {
        label: "Proposals",
        path: paths::PROPOSALS,
        icon: "description",
    },
    MenuItem {
        label: "New Company",
        path: paths::COMPANY_NEW,
        icon: "add_business",
    },
];

const COMPANY_MENU: &[MenuItem] = &[
    MenuItem {
        label: "Dashboard",
        path: paths::COMPANY_DASHBOARD,
        icon: "dashboard",
    },
    MenuItem {
        label: "Employees",
        path: paths::EMPLOYEES,
        icon: "groups",
    },
    MenuItem {
        label: "New Employee",
        path: paths::EMPLOYEE_NEW,
        icon: "person_add",
    },
];

const CLIENT_MENU: &[MenuItem] = &[
    MenuItem {
        label: "My Account",
        path: paths::CLIENT_DASHBOARD,
        icon: "account_balance",
    },
    MenuItem {
        label: "Transfers",
        path: paths::TRANSFERS,
        icon: "swap_horiz",
    },
    MenuItem {
        label: "Statement",
        path: paths::STATEMENT,
        icon: "receipt_long",
    },
    MenuItem {
        label: "Loans",
        path: paths::LOANS,
        icon: "payments",
    },
];

/// Realm roles read from the access token. Membership only, no hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<String>);

impl RoleSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, role: &str) -> bool {
        self.0.contains(role)
    }

    /// True when the realm role behind `role` is held.
    #[must_use]
    pub fn has(&self, role: Role) -> bool {
        role.realm_name().is_some_and(|name| self.contains(name))
    }

    /// "Any of" check used by route guards. An empty requirement always passes.
    #[must_use]
    pub fn grants_any(&self, required: &[Role]) -> bool {
        required.is_empty() || required.iter().any(|role| self.has(*role))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RoleSet {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(Into::into)
                .map(|role: String| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect(),
        )
    }
}

/// Picks the highest-priority role held: admin, then company, then client.
#[must_use]
pub fn resolve_role(roles: &RoleSet) -> Role {
    [Role::Admin, Role::Company, Role::Client]
        .into_iter()
        .find(|role| roles.has(*role))
        .unwrap_or(Role::None)
}

#[cfg(test)]
mod tests {
    use super::{Role, RoleSet, resolve_role};

    #[test]
    fn admin_wins_over_company_and_client() {
        let roles: RoleSet = ["client", "company", "admin"].into_iter().collect();
        assert_eq!(resolve_role(&roles), Role::Admin);
    }

    #[test]
    fn company_wins_over_client() {
        let roles: RoleSet = ["client", "company"].into_iter().collect();
        assert_eq!(resolve_role(&roles), Role::Company);
    }

    #[test]
    fn unknown_roles_resolve_to_none() {
        let roles: RoleSet = ["offline_access", "uma_authorization"].into_iter().collect();
        assert_eq!(resolve_role(&roles), Role::None);
        assert_eq!(resolve_role(&RoleSet::new()), Role::None);
    }

    #[test]
    fn grants_any_is_membership_based() {
        let roles: RoleSet = ["client"].into_iter().collect();
        assert!(roles.grants_any(&[Role::Admin, Role::Client]));
        assert!(!roles.grants_any(&[Role::Admin]));
        assert!(roles.grants_any(&[]));
        assert!(!roles.has(Role::None));
    }

    #[test]
    fn blank_role_names_are_dropped() {
        let roles: RoleSet = ["", "  ", "client"].into_iter().collect();
        assert_eq!(roles.iter().collect::<Vec<_>>(), vec!["client"]);
    }

    #[test]
    fn menus_follow_the_resolved_role() {
        assert_eq!(Role::Admin.menu().len(), 3);
        assert_eq!(Role::Company.menu()[1].label, "Employees");
        assert_eq!(Role::Client.menu().len(), 4);
        assert!(Role::None.menu().is_empty());
        assert_eq!(Role::Client.dashboard_path(), Some("/dashboard/client"));
        assert_eq!(Role::None.dashboard_path(), None);
    }
}
