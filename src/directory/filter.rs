use std::cmp::Ordering;

use crate::domain::{Role, Status, UserRecord};

/// Page sizes offered by the toolbar.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleFilter {
    #[default]
    All,
    Only(Role),
}

impl RoleFilter {
    pub fn matches(&self, user: &UserRecord) -> bool {
        match self {
            RoleFilter::All => true,
            RoleFilter::Only(role) => user.has_role(*role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(&self, user: &UserRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => user.status == *status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Email,
    Roles,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Comparator for `sort_by`. Only the key takes part, so equal keys
    /// compare `Equal` and a stable sort keeps their order.
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        let ord = match self.key {
            SortKey::Name => cmp_ci(&a.full_name(), &b.full_name()),
            SortKey::Email => cmp_ci(&a.email, &b.email),
            SortKey::Roles => cmp_ci(&a.roles_label(), &b.roles_label()),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
        };
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

fn cmp_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Inputs of the directory pipeline.
///
/// `page` is the requested page; the pipeline clamps it to the page count of
/// the filtered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub query: String,
    pub role: RoleFilter,
    pub status: StatusFilter,
    pub page: usize,
    pub page_size: usize,
    pub sort: Sort,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            query: String::new(),
            role: RoleFilter::All,
            status: StatusFilter::All,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: Sort::default(),
        }
    }
}

impl FilterState {
    /// Conjunction of the text, role and status predicates.
    pub fn matches(&self, user: &UserRecord) -> bool {
        self.matches_text(user) && self.role.matches(user) && self.status.matches(user)
    }

    fn matches_text(&self, user: &UserRecord) -> bool {
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        user.full_name().to_lowercase().contains(&needle) || user.email.to_lowercase().contains(&needle)
    }

    /// True when any input differs from the toolbar defaults.
    pub fn is_default(&self) -> bool {
        let defaults = FilterState::default();
        self.query.trim().is_empty()
            && self.role == defaults.role
            && self.status == defaults.status
            && self.page_size == defaults.page_size
            && self.sort == defaults.sort
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, first: &str, last: &str, email: &str, roles: Vec<Role>, status: Status) -> UserRecord {
        UserRecord::new(id, first, last, email, roles, status, Utc::now())
    }

    #[test]
    fn text_matches_name_or_email_case_insensitively() {
        let robin = user("1", "Robin", "Buckley", "robin.buckley@northridge.edu", vec![Role::Teacher], Status::Active);
        let mike = user("2", "Mike", "Wheeler", "s2030-0002@northridge.edu", vec![Role::Student], Status::Active);

        let state = FilterState { query: "  ROBIN ".into(), ..Default::default() };
        assert!(state.matches(&robin));
        assert!(!state.matches(&mike));

        let state = FilterState { query: "n buck".into(), ..Default::default() };
        assert!(state.matches(&robin));

        let state = FilterState { query: "s2030".into(), ..Default::default() };
        assert!(state.matches(&mike));
        assert!(!state.matches(&robin));
    }

    #[test]
    fn blank_query_matches_everything() {
        let mike = user("2", "Mike", "Wheeler", "m@x.test", vec![Role::Student], Status::Archived);
        let state = FilterState { query: "   ".into(), ..Default::default() };
        assert!(state.matches(&mike));
    }

    #[test]
    fn role_filter_checks_membership_and_status_equality() {
        let admin = user("3", "Joyce", "Byers", "j@x.test", vec![Role::Admin, Role::Staff], Status::Suspended);

        let staff = FilterState { role: RoleFilter::Only(Role::Staff), ..Default::default() };
        assert!(staff.matches(&admin));

        let students = FilterState { role: RoleFilter::Only(Role::Student), ..Default::default() };
        assert!(!students.matches(&admin));

        let suspended_staff = FilterState {
            role: RoleFilter::Only(Role::Staff),
            status: StatusFilter::Only(Status::Suspended),
            ..Default::default()
        };
        assert!(suspended_staff.matches(&admin));

        let active_staff = FilterState { status: StatusFilter::Only(Status::Active), ..suspended_staff };
        assert!(!active_staff.matches(&admin));
    }

    #[test]
    fn each_status_filter_selects_only_its_status() {
        let users: Vec<UserRecord> = Status::ALL
            .iter()
            .enumerate()
            .map(|(i, &status)| user(&i.to_string(), "Eddie", "Munson", "e@x.test", vec![Role::Student], status))
            .collect();

        for status in Status::ALL {
            let state = FilterState { status: StatusFilter::Only(status), ..Default::default() };
            let hits: Vec<Status> = users.iter().filter(|u| state.matches(u)).map(|u| u.status).collect();
            assert_eq!(hits, vec![status]);
        }
        assert!(users.iter().all(|u| FilterState::default().matches(u)));
    }

    #[test]
    fn descending_reverses_only_the_key_order() {
        let a = user("1", "Amy", "Z", "a@x.test", vec![Role::Student], Status::Active);
        let b = user("2", "Bea", "Y", "b@x.test", vec![Role::Student], Status::Active);
        let asc = Sort::new(SortKey::Name, SortDirection::Ascending);
        let desc = Sort::new(SortKey::Name, SortDirection::Descending);
        assert_eq!(asc.compare(&a, &b), Ordering::Less);
        assert_eq!(desc.compare(&a, &b), Ordering::Greater);

        let roles = Sort::new(SortKey::Roles, SortDirection::Descending);
        assert_eq!(roles.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn defaults_are_detected() {
        assert!(FilterState::default().is_default());
        assert!(!FilterState { page_size: 50, ..Default::default() }.is_default());
        assert!(FilterState { page: 4, ..Default::default() }.is_default());
    }
}
