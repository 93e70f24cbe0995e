//! Deterministic seed data for the user store.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::domain::{Campus, Pronouns, Role, Status, UserRecord};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_USER_COUNT: usize = 200;

const FIRST_NAMES: &[&str] = &[
    "Eleven", "Mike", "Dustin", "Lucas", "Max", "Will", "Nancy", "Robin", "Steve", "Eddie", "Erica", "Joyce", "Hopper",
    "Alex", "Jordan", "Taylor", "Morgan", "Sam", "Casey", "Riley", "Jamie", "Avery", "Quinn", "Rowan", "Emerson",
    "Finley", "Harper", "Parker", "Noah", "Emma", "Olivia", "Liam", "Sophia", "Mia", "Ethan", "Amelia", "Ella", "Isaac",
    "Grace", "Chloe", "Aiden", "Kael", "Nyra", "Elio", "Zara", "Milo", "Iris", "Soren", "Luna", "Taro", "Anya",
];

const LAST_NAMES: &[&str] = &[
    "Byers", "Wheeler", "Henderson", "Sinclair", "Hargrove", "Munson", "Harrington", "Buckley", "Ives", "Smith",
    "Johnson", "Brown", "Davis", "Miller", "Wilson", "Moore", "Anderson", "Thomas", "Jackson", "White", "Harris",
    "Martin", "Thompson", "Clark", "Lewis", "Young", "Garcia", "Martinez", "Perez", "Torres", "Flores", "Nguyen", "Kim",
    "Patel", "Singh", "Kowalski", "Rossi", "Bianchi", "Dubois", "Moreau", "Sato", "Tanaka", "Holloway", "Ashcroft",
    "Calder", "Whitmore", "Redford", "Kingsley",
];

const HOMEROOMS: &[&str] = &["A1", "A2", "B1", "B2", "C1", "C2", "D1", "D2"];

const DEPARTMENTS: &[&str] = &[
    "Math",
    "Science",
    "Languages",
    "Arts",
    "Physical Ed",
    "Counseling",
    "Administration",
    "Support",
];

const NOTES: &[&str] = &[
    "Prefers email contact.",
    "Needs accessibility accommodations.",
    "New enrolment this term.",
    "Onboarding in progress.",
    "Part-time schedule.",
    "Emergency contact verified.",
];

const CAMPUSES: [Campus; 2] = [Campus::North, Campus::South];

const SCHOOL_DOMAIN: &str = "northridge.edu";
const FAMILY_DOMAIN: &str = "familymail.test";

/// Park–Miller minimal standard generator.
#[derive(Debug, Clone)]
pub struct ParkMiller {
    state: u64,
}

impl ParkMiller {
    const MODULUS: u64 = 2_147_483_647;
    const MULTIPLIER: u64 = 16_807;

    pub fn new(seed: u64) -> Self {
        let mut state = seed % Self::MODULUS;
        if state == 0 {
            state = Self::MODULUS - 1;
        }
        Self { state }
    }

    /// Next value in `(0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = self.state * Self::MULTIPLIER % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }

    /// `floor(next * n)`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize
    }

    /// Picks from `items` with an index skewed by the row number.
    fn pick<'a, T>(&mut self, items: &'a [T], row: usize) -> &'a T {
        let idx = self.below(1000) + row;
        &items[idx % items.len()]
    }
}

fn role_for(roll: f64) -> Role {
    match roll {
        r if r < 0.70 => Role::Student,
        r if r < 0.82 => Role::Teacher,
        r if r < 0.92 => Role::Guardian,
        r if r < 0.97 => Role::Staff,
        _ => Role::Admin,
    }
}

fn status_for(roll: f64, role: Role) -> Status {
    let invited_weight = match role {
        Role::Student | Role::Guardian => 0.12,
        _ => 0.05,
    };

    if roll < 0.8 {
        Status::Active
    } else if roll < 0.8 + invited_weight {
        Status::Invited
    } else if roll < 0.95 {
        Status::Suspended
    } else {
        Status::Archived
    }
}

fn slugify(s: &str) -> String {
    s.to_lowercase().chars().filter(|c| c.is_ascii_lowercase()).collect()
}

/// School years start in August.
fn current_school_year(now: DateTime<Utc>) -> i32 {
    if now.month() >= 8 {
        now.year()
    } else {
        now.year() - 1
    }
}

fn student_email(row: usize, grade: u8, now: DateTime<Utc>) -> String {
    let grad_year = current_school_year(now) + (12 - i32::from(grade));
    format!("s{grad_year}-{row:04}@{SCHOOL_DOMAIN}")
}

fn named_email(base: &str, collision: u32, domain: &str) -> String {
    match collision {
        0 => format!("{base}@{domain}"),
        n => format!("{base}{n}@{domain}"),
    }
}

fn phone(rng: &mut ParkMiller) -> String {
    let mut digit = || rng.below(10);
    format!(
        "+1 (555) {}{}{}-{}{}{}{}",
        digit(),
        digit(),
        digit(),
        digit(),
        digit(),
        digit(),
        digit()
    )
}

/// Generates `count` users with ids `"1".."count"`. The same seed and `now`
/// always produce the same list.
pub fn generate_users(count: usize, seed: u64, now: DateTime<Utc>) -> Vec<UserRecord> {
    let mut rng = ParkMiller::new(seed);
    let mut staff_emails: HashMap<String, u32> = HashMap::new();
    let mut guardian_emails: HashMap<String, u32> = HashMap::new();
    let mut users = Vec::with_capacity(count);

    for row in 1..=count {
        let first_name = *rng.pick(FIRST_NAMES, row);
        let last_name = *rng.pick(LAST_NAMES, row);

        let role = role_for(rng.next_f64());
        let roles = match role {
            Role::Admin => vec![Role::Admin, Role::Staff],
            other => vec![other],
        };
        let status = status_for(rng.next_f64(), role);

        let window = if role == Role::Student { 500 } else { 730 };
        let registered_at = now - Duration::days(rng.below(window) as i64);

        let last_login_at = match status {
            Status::Invited | Status::Archived => None,
            _ => Some(now - Duration::days(rng.below(45) as i64)),
        };

        let pronouns = *rng.pick(&Pronouns::ALL, row);
        let campus = CAMPUSES[rng.below(CAMPUSES.len())];
        let phone = phone(&mut rng);
        let notes = if rng.next_f64() < 0.35 {
            Some(rng.pick(NOTES, row).to_string())
        } else {
            None
        };

        let mut user = UserRecord::new(row.to_string(), first_name, last_name, "", roles, status, registered_at);
        user.pronouns = pronouns;
        user.last_login_at = last_login_at;
        user.campus = Some(campus);
        user.phone = Some(phone);
        user.notes = notes;

        let key = format!("{}.{}", slugify(first_name), slugify(last_name));
        match role {
            Role::Student => {
                let grade = rng.below(6) as u8 + 7;
                user.grade = Some(grade);
                user.homeroom = Some(rng.pick(HOMEROOMS, row).to_string());
                user.email = student_email(row, grade, now);
            }
            Role::Teacher | Role::Staff | Role::Admin => {
                user.department = Some(rng.pick(DEPARTMENTS, row).to_string());
                let seen = staff_emails.entry(key.clone()).or_insert(0);
                user.email = named_email(&key, *seen, SCHOOL_DOMAIN);
                *seen += 1;
            }
            Role::Guardian => {
                let seen = guardian_emails.entry(key.clone()).or_insert(0);
                user.email = named_email(&key, *seen, FAMILY_DOMAIN);
                *seen += 1;
            }
        }

        users.push(user);
    }

    users
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn generator_matches_park_miller_sequence() {
        let mut rng = ParkMiller::new(1);
        assert_eq!(rng.state, 1);
        rng.next_f64();
        assert_eq!(rng.state, 16_807);
        rng.next_f64();
        assert_eq!(rng.state, 282_475_249);

        assert_eq!(ParkMiller::new(0).state, 2_147_483_646);
    }

    #[test]
    fn same_seed_same_users() {
        assert_eq!(generate_users(50, DEFAULT_SEED, now()), generate_users(50, DEFAULT_SEED, now()));
        assert_ne!(generate_users(50, DEFAULT_SEED, now()), generate_users(50, 7, now()));
    }

    #[test]
    fn default_dataset_holds_invariants() {
        let users = generate_users(DEFAULT_USER_COUNT, DEFAULT_SEED, now());
        assert_eq!(users.len(), 200);

        let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails.len(), users.len());

        for (i, user) in users.iter().enumerate() {
            assert_eq!(user.id, (i + 1).to_string());
            assert!(!user.roles.is_empty());
            if user.has_role(Role::Admin) {
                assert!(user.has_role(Role::Staff));
            }
            assert!(user.registered_at <= now());
            assert!(now() - user.registered_at < Duration::days(730));
            if matches!(user.status, Status::Invited | Status::Archived) {
                assert!(user.last_login_at.is_none());
            }
            if user.has_role(Role::Student) {
                let grade = user.grade.unwrap();
                assert!((7..=12).contains(&grade));
                assert!(user.homeroom.is_some());
                assert!(user.email.starts_with('s'));
            }
        }

        let students = users.iter().filter(|u| u.has_role(Role::Student)).count();
        assert!(students > 100, "expected a student majority, got {students}");
    }

    #[test]
    fn student_email_uses_graduation_year() {
        // October is in the 2026/27 school year, so grade 12 graduates in 2026.
        assert_eq!(student_email(7, 12, now()), "s2026-0007@northridge.edu");
        let march = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(student_email(123, 9, march), "s2028-0123@northridge.edu");
    }

    #[test]
    fn colliding_names_get_numbered_emails() {
        assert_eq!(named_email("robin.buckley", 0, SCHOOL_DOMAIN), "robin.buckley@northridge.edu");
        assert_eq!(named_email("robin.buckley", 2, FAMILY_DOMAIN), "robin.buckley2@familymail.test");
    }
}
