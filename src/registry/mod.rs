use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

mod error;
mod user;
pub mod validation;

pub use error::{Error, ValidationError};
pub use user::{Statistics, User, UserId};

/// Example records every fresh registry starts with. They go through the
/// public `create` path like any other record.
const SEED_USERS: [(&str, &str); 3] = [
    ("Taro Yamada", "yamada@example.com"),
    ("Hanako Sato", "sato@example.com"),
    ("Ichiro Tanaka", "tanaka@example.com"),
];

/// In-memory user store shared across concurrent callers.
///
/// The registry owns its records exclusively. Identifiers are allocated from
/// an atomic counter and never reused, even after deletion; failed validation
/// does not consume one. Contents do not survive the process.
#[derive(Debug)]
pub struct Registry {
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicU64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        let registry = Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        };

        for (name, email) in SEED_USERS {
            registry
                .create(name, email)
                .expect("seed users should pass validation");
        }

        registry
    }

    /// Validates and stores a new record, returning a snapshot of it.
    ///
    /// The stored name and email are trimmed; `created_at` and `updated_at`
    /// start out equal.
    pub fn create(&self, name: &str, email: &str) -> Result<User, Error> {
        let name = validation::require_name(name)?;
        let email = validation::require_email(email)?;

        // The counter is only touched after validation, so a failed call
        // never consumes an identifier. Gaps are otherwise acceptable.
        let id = UserId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let now = Utc::now();
        let user = User {
            id,
            name,
            email,
            created_at: now,
            updated_at: now,
        };

        self.write().insert(id, user.clone());
        Ok(user)
    }

    /// Snapshots every current record. Order is unspecified.
    #[must_use]
    pub fn get_all(&self) -> Vec<User> {
        self.read().values().cloned().collect()
    }

    #[must_use]
    pub fn get_by_id(&self, id: UserId) -> Option<User> {
        self.read().get(&id).cloned()
    }

    /// Case-insensitive substring search on names, sorted ascending by name.
    /// A blank term behaves exactly like [`Registry::get_all`].
    #[must_use]
    pub fn search_by_name(&self, term: &str) -> Vec<User> {
        if validation::is_blank(term) {
            return self.get_all();
        }

        let needle = term.trim().to_lowercase();
        let mut matches: Vec<User> = self
            .read()
            .values()
            .filter(|user| user.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches
    }

    /// Replaces the name and/or email of an existing record.
    ///
    /// Blank or absent arguments leave the corresponding field untouched;
    /// a provided email is validated before either field is written, so a
    /// failing call leaves the record exactly as it was. `updated_at` is
    /// refreshed on every successful call, even when no value changed.
    pub fn update(
        &self,
        id: UserId,
        name: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, Error> {
        let mut users = self.write();
        let user = users.get_mut(&id).ok_or(Error::NotFound(id))?;

        let name = name.filter(|value| !validation::is_blank(value));
        let email = match email.filter(|value| !validation::is_blank(value)) {
            Some(value) => Some(validation::require_email(value)?),
            None => None,
        };

        if let Some(name) = name {
            user.name = name.trim().to_owned();
        }
        if let Some(email) = email {
            user.email = email;
        }
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    /// Removes a record, reporting whether one was actually there. Absence
    /// is a normal outcome, not an error.
    pub fn delete(&self, id: UserId) -> bool {
        self.write().remove(&id).is_some()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.read().len()
    }

    /// Aggregates the record set in a single pass: total count plus how many
    /// records resolve to each email domain.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        let users = self.read();

        let mut domains: HashMap<String, usize> = HashMap::new();
        for user in users.values() {
            *domains.entry(user.email_domain().to_owned()).or_default() += 1;
        }

        Statistics {
            total_users: users.len(),
            domains,
        }
    }

    // Writers only ever insert, replace or remove whole records, so the map
    // can never be observed half-written; recovering from a poisoned lock
    // is therefore sound.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<UserId, User>> {
        self.users.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<UserId, User>> {
        self.users.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_with_seed_users() {
        let registry = Registry::new();
        assert_eq!(registry.count(), 3);

        let all = registry.get_all();
        assert_eq!(all.len(), 3);
        assert!(all.iter().any(|user| user.email == "yamada@example.com"));
    }

    #[test]
    fn create_assigns_fresh_ids() {
        let registry = Registry::new();
        let a = registry.create("Alice", "alice@example.com").unwrap();
        let b = registry.create("Bob", "bob@example.com").unwrap();

        assert!(b.id > a.id);

        let ids: HashSet<UserId> = registry.get_all().iter().map(|user| user.id).collect();
        assert_eq!(ids.len(), registry.count());
    }

    #[test]
    fn create_stores_trimmed_fields() {
        let registry = Registry::new();
        let user = registry
            .create("  Alice  ", "  alice@example.com ")
            .unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.created_at, user.updated_at);

        let stored = registry.get_by_id(user.id).unwrap();
        assert_eq!(stored, user);
    }

    #[test]
    fn create_rejects_blank_name() {
        let registry = Registry::new();
        for name in ["", "  "] {
            assert_eq!(
                registry.create(name, "a@b.com").unwrap_err(),
                Error::Validation(ValidationError::BlankName),
            );
        }
    }

    #[test]
    fn create_rejects_bad_emails() {
        let registry = Registry::new();

        assert_eq!(
            registry.create("Bob", "").unwrap_err(),
            Error::Validation(ValidationError::BlankEmail),
        );
        for email in ["bob.example.com", "@x.com", "x.com@"] {
            assert_eq!(
                registry.create("Bob", email).unwrap_err(),
                Error::Validation(ValidationError::MalformedEmail),
            );
        }

        // Failed creates must not leave anything behind.
        assert_eq!(registry.count(), 3);
    }

    #[test]
    fn failed_create_consumes_no_identifier() {
        let registry = Registry::new();
        registry.create("", "a@b.com").unwrap_err();
        registry.create("Bob", "no-at").unwrap_err();

        let a = registry.create("Alice", "alice@example.com").unwrap();
        let b = registry.create("Bob", "bob@example.com").unwrap();
        assert_eq!(b.id.0, a.id.0 + 1);
    }

    #[test]
    fn snapshots_do_not_track_later_mutations() {
        let registry = Registry::new();
        let before = registry.create("Alice", "alice@example.com").unwrap();
        registry.update(before.id, Some("Alicia"), None).unwrap();

        assert_eq!(before.name, "Alice");
        assert_eq!(registry.get_by_id(before.id).unwrap().name, "Alicia");
    }

    #[test]
    fn update_changes_only_provided_fields() {
        let registry = Registry::new();
        let created = registry.create("Alice", "alice@example.com").unwrap();

        let updated = registry.update(created.id, Some("Alicia"), None).unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "alice@example.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_treats_blank_arguments_as_absent() {
        let registry = Registry::new();
        let created = registry.create("Alice", "alice@example.com").unwrap();

        let updated = registry
            .update(created.id, Some("   "), Some(""))
            .unwrap();
        assert_eq!(updated.name, "Alice");
        assert_eq!(updated.email, "alice@example.com");
        // A successful no-op call still refreshes the timestamp.
        assert!(updated.updated_at >= created.updated_at);
    }

    #[test]
    fn update_validates_before_writing_anything() {
        let registry = Registry::new();
        let created = registry.create("Alice", "alice@example.com").unwrap();

        let err = registry
            .update(created.id, Some("Renamed"), Some("missing-at"))
            .unwrap_err();
        assert_eq!(err, Error::Validation(ValidationError::MalformedEmail));

        let current = registry.get_by_id(created.id).unwrap();
        assert_eq!(current, created);
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let registry = Registry::new();
        let id = UserId(9999);

        assert_eq!(
            registry.update(id, Some("X"), None).unwrap_err(),
            Error::NotFound(id),
        );
        assert_eq!(registry.count(), 3);
    }

    #[test]
    fn delete_reports_whether_a_record_was_removed() {
        let registry = Registry::new();
        let user = registry.create("Alice", "alice@example.com").unwrap();

        assert!(registry.delete(user.id));
        assert_eq!(registry.get_by_id(user.id), None);
        assert!(!registry.delete(user.id));
    }

    #[test]
    fn deleted_ids_are_never_reused() {
        let registry = Registry::new();
        let a = registry.create("Alice", "alice@example.com").unwrap();
        registry.delete(a.id);

        let b = registry.create("Bob", "bob@example.com").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn search_is_case_insensitive_and_sorted() {
        let registry = Registry::new();
        registry.create("ALICIA", "alicia@example.com").unwrap();
        registry.create("Alice", "alice@example.com").unwrap();
        registry.create("Bob", "bob@example.com").unwrap();

        let found = registry.search_by_name("ali");
        let names: Vec<&str> = found.iter().map(|user| user.name.as_str()).collect();
        assert_eq!(names, ["ALICIA", "Alice"]);
    }

    #[test]
    fn blank_search_term_returns_everyone() {
        let registry = Registry::new();
        assert_eq!(registry.search_by_name("  ").len(), registry.count());
        assert_eq!(registry.search_by_name("").len(), registry.count());
    }

    #[test]
    fn statistics_group_by_email_domain() {
        let registry = Registry::new();
        registry.create("A", "a@x.com").unwrap();
        registry.create("B", "b@x.com").unwrap();
        registry.create("C", "c@y.com").unwrap();

        let stats = registry.statistics();
        assert_eq!(stats.total_users, 6);
        assert_eq!(stats.domains.get("x.com"), Some(&2));
        assert_eq!(stats.domains.get("y.com"), Some(&1));
        // The three seed users.
        assert_eq!(stats.domains.get("example.com"), Some(&3));
    }

    #[test]
    fn domain_splits_on_the_first_at_sign() {
        let user = User {
            id: UserId(1),
            name: "Quoted".into(),
            email: "odd@name@example.com".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(user.email_domain(), "name@example.com");
    }

    #[test]
    fn concurrent_creates_allocate_distinct_ids() {
        let registry = Arc::new(Registry::new());
        let mut handles = Vec::new();

        for worker in 0..8 {
            let registry = Arc::clone(&registry);
            handles.push(thread::spawn(move || {
                (0..16)
                    .map(|n| {
                        let name = format!("worker-{worker}-{n}");
                        let email = format!("w{worker}.{n}@example.com");
                        registry.create(&name, &email).unwrap().id
                    })
                    .collect::<Vec<_>>()
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.extend(handle.join().unwrap());
        }

        let unique: HashSet<UserId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 8 * 16);
        assert_eq!(registry.count(), 8 * 16 + 3);
    }

    #[test]
    fn concurrent_updates_never_tear_a_record() {
        let registry = Arc::new(Registry::new());
        let user = registry.create("Alice", "alice@example.com").unwrap();

        let mut handles = Vec::new();
        for n in 0..8 {
            let registry = Arc::clone(&registry);
            let id = user.id;
            handles.push(thread::spawn(move || {
                let name = format!("name-{n}");
                let email = format!("name-{n}@example.com");
                registry.update(id, Some(&name), Some(&email)).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        // Whichever update won, name and email must come from the same call.
        let current = registry.get_by_id(user.id).unwrap();
        let suffix = current.name.strip_prefix("name-").unwrap();
        assert_eq!(current.email, format!("name-{suffix}@example.com"));
    }
}
