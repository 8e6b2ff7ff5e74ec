//! Client-side search over the current page.
//!
//! Filtering is local to already-fetched records; it never affects the
//! total page count. Matches outside the loaded page are simply not found,
//! which is the accepted behavior.

use crate::domain::User;

/// Case-insensitive substring filter over first name, last name, and email.
/// An empty term passes every record through. Order is always preserved;
/// there is no scoring or ranking.
pub fn filter_users(records: &[User], term: &str) -> Vec<User> {
    if term.is_empty() {
        return records.to_vec();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|user| {
            user.first_name.to_lowercase().contains(&needle)
                || user.last_name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
