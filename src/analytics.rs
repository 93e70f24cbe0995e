//! Aggregations behind the analytics endpoints.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{RegistrationsDatum, Role, UserRecord, UsersByRoleDatum};

/// Number of months covered by the registrations series.
pub const REGISTRATION_MONTHS: u32 = 12;

/// Student registrations per calendar month, oldest first, ending with the
/// month of `now`. Labels are `YYYY-MM`.
pub fn monthly_student_registrations(users: &[UserRecord], now: DateTime<Utc>) -> Vec<RegistrationsDatum> {
    let months = trailing_months(now.year(), now.month(), REGISTRATION_MONTHS);

    months
        .into_iter()
        .map(|(year, month)| {
            let registrations = users
                .iter()
                .filter(|u| u.has_role(Role::Student))
                .filter(|u| u.registered_at.year() == year && u.registered_at.month() == month)
                .count() as u32;
            RegistrationsDatum {
                month: format!("{year:04}-{month:02}"),
                registrations,
            }
        })
        .collect()
}

/// Head count per role in canonical role order. Multi-role users count once
/// for every role they hold.
pub fn users_by_role(users: &[UserRecord]) -> Vec<UsersByRoleDatum> {
    Role::ALL
        .iter()
        .map(|&role| UsersByRoleDatum {
            role,
            count: users.iter().filter(|u| u.has_role(role)).count() as u32,
        })
        .collect()
}

fn trailing_months(year: i32, month: u32, count: u32) -> Vec<(i32, u32)> {
    // months since year 0, zero-based
    let end = year * 12 + month as i32 - 1;
    let start = end - count as i32 + 1;
    (start..=end).map(|m| (m.div_euclid(12), m.rem_euclid(12) as u32 + 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Status;
    use chrono::TimeZone;

    fn user(id: &str, roles: Vec<Role>, y: i32, m: u32) -> UserRecord {
        let at = Utc.with_ymd_and_hms(y, m, 15, 12, 0, 0).unwrap();
        UserRecord::new(id, "Test", id, format!("{id}@northridge.edu"), roles, Status::Active, at)
    }

    #[test]
    fn trailing_months_cross_year_boundary() {
        assert_eq!(trailing_months(2026, 2, 4), vec![(2025, 11), (2025, 12), (2026, 1), (2026, 2)]);
    }

    #[test]
    fn registrations_count_students_per_month() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap();
        let users = vec![
            user("1", vec![Role::Student], 2026, 10),
            user("2", vec![Role::Student], 2026, 10),
            user("3", vec![Role::Teacher], 2026, 10),
            user("4", vec![Role::Student], 2025, 11),
            user("5", vec![Role::Student], 2025, 10),
        ];

        let series = monthly_student_registrations(&users, now);
        assert_eq!(series.len(), 12);
        assert_eq!(series[0], RegistrationsDatum { month: "2025-11".into(), registrations: 1 });
        assert_eq!(series[11], RegistrationsDatum { month: "2026-10".into(), registrations: 2 });
        assert_eq!(series.iter().map(|d| d.registrations).sum::<u32>(), 3);
    }

    #[test]
    fn users_by_role_counts_every_held_role() {
        let users = vec![
            user("1", vec![Role::Student], 2026, 1),
            user("2", vec![Role::Admin, Role::Staff], 2026, 1),
            user("3", vec![Role::Staff], 2026, 1),
        ];

        let counts: Vec<(Role, u32)> = users_by_role(&users).into_iter().map(|d| (d.role, d.count)).collect();
        assert_eq!(counts, vec![
            (Role::Student, 1),
            (Role::Teacher, 0),
            (Role::Guardian, 0),
            (Role::Staff, 2),
            (Role::Admin, 1),
        ]);
    }
}
