//! Process-wide store of locally edited user fields.
//!
//! The cache is a single owned structure passed by reference to the flows
//! that need it, never ambient global state. It lives for the process
//! lifetime and entries never expire; they are replaced on edit and removed
//! on delete.

use std::collections::HashMap;

use crate::domain::{User, UserOverride};

/// In-memory mapping from user id to the latest known client-side state of
/// that user's fields.
#[derive(Debug, Default)]
pub struct UserCache {
    entries: HashMap<String, UserOverride>,
}

impl UserCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the entry for `user.id` with the full record.
    /// No validation happens here; callers validate before a put.
    pub fn put(&mut self, user: User) {
        let id = user.id.clone();
        self.entries.insert(id, UserOverride::from(user));
    }

    /// The cached override for `id`, if any.
    pub fn get(&self, id: &str) -> Option<&UserOverride> {
        self.entries.get(id)
    }

    /// Drop the entry for `id`; no-op when absent.
    pub fn remove(&mut self, id: &str) {
        self.entries.remove(id);
    }

    /// Overlay cached entries onto a fetched page of records. Records with
    /// no entry pass through unchanged. Returns a new sequence in the input
    /// order; the input is never mutated.
    pub fn reconcile_list(&self, records: &[User]) -> Vec<User> {
        records
            .iter()
            .map(|user| match self.entries.get(&user.id) {
                Some(entry) => entry.apply_to(user),
                None => user.clone(),
            })
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn insert_raw(&mut self, id: impl Into<String>, entry: UserOverride) {
        self.entries.insert(id.into(), entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, first: &str, last: &str, email: &str) -> User {
        User::new(id, first, last, email, format!("https://img.example.com/{id}.jpg"))
    }

    #[test]
    fn put_then_get_reflects_all_fields() {
        let mut cache = UserCache::new();
        let edited = user("user_1", "Janet", "Doe", "janet@example.com");
        cache.put(edited.clone());

        let entry = cache.get("user_1").expect("entry present after put");
        assert_eq!(entry.as_user("user_1"), Some(edited));
    }

    #[test]
    fn put_is_idempotent() {
        let mut cache = UserCache::new();
        let edited = user("user_1", "Janet", "Doe", "janet@example.com");
        cache.put(edited.clone());
        let before = cache.get("user_1").cloned();
        cache.put(edited);
        assert_eq!(cache.get("user_1").cloned(), before);
    }

    #[test]
    fn get_unknown_id_is_absent() {
        let cache = UserCache::new();
        assert!(cache.get("nobody").is_none());
    }

    #[test]
    fn remove_then_get_is_absent() {
        let mut cache = UserCache::new();
        cache.put(user("user_1", "Jane", "Doe", "jane@example.com"));
        cache.remove("user_1");
        assert!(cache.get("user_1").is_none());

        // Removing again is a no-op, not a panic.
        cache.remove("user_1");
    }

    #[test]
    fn reconcile_with_empty_cache_is_value_identity() {
        let cache = UserCache::new();
        let fetched = vec![
            user("user_1", "Jane", "Doe", "jane@example.com"),
            user("user_2", "John", "Smith", "john@example.com"),
        ];
        assert_eq!(cache.reconcile_list(&fetched), fetched);
    }

    #[test]
    fn reconcile_overlays_cached_fields_only() {
        let mut cache = UserCache::new();
        cache.insert_raw(
            "user_1",
            UserOverride {
                first_name: Some("Janet".to_string()),
                ..Default::default()
            },
        );

        let fetched = vec![
            user("user_1", "Jane", "Doe", "jane@example.com"),
            user("user_2", "John", "Smith", "john@example.com"),
        ];
        let reconciled = cache.reconcile_list(&fetched);

        assert_eq!(reconciled[0].first_name, "Janet");
        assert_eq!(reconciled[0].last_name, "Doe");
        assert_eq!(reconciled[0].email, "jane@example.com");
        // Untouched record passes through unchanged, order preserved.
        assert_eq!(reconciled[1], fetched[1]);
    }

    #[test]
    fn reconcile_does_not_mutate_input() {
        let mut cache = UserCache::new();
        cache.put(user("user_1", "Janet", "Doe", "janet@example.com"));

        let fetched = vec![user("user_1", "Jane", "Doe", "jane@example.com")];
        let snapshot = fetched.clone();
        let _ = cache.reconcile_list(&fetched);
        assert_eq!(fetched, snapshot);
    }
}
