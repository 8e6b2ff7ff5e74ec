//! The user list view: one fetched page, reconciled against the cache and
//! filtered by the active search term.
//!
//! Loading is split into `begin_load` / `apply_page` so a result arriving
//! for a superseded load can be detected and dropped. Rapid navigation
//! therefore never lets a stale page overwrite a newer one; the async
//! `load_page` wrapper covers the common sequential case.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::cache::UserCache;
use crate::clients::DirectoryClient;
use crate::domain::{User, UserPage};
use crate::error::{DirectoryError, FlowError};
use crate::messages::ListSignal;
use crate::search::filter_users;

/// Token tying a page result back to the load that requested it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

pub struct ListView {
    users: Vec<User>,
    search_term: String,
    current_page: u32,
    total_pages: u32,
    fetch_generation: u64,
    notice: Option<String>,
    error: Option<FlowError>,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            search_term: String::new(),
            current_page: 1,
            total_pages: 1,
            fetch_generation: 0,
            notice: None,
            error: None,
        }
    }

    /// Start a load for `page`. Any result from an earlier, still-pending
    /// load becomes stale from this point on.
    pub fn begin_load(&mut self, page: u32) -> FetchTicket {
        self.fetch_generation += 1;
        self.current_page = page;
        self.error = None;
        FetchTicket {
            generation: self.fetch_generation,
        }
    }

    /// Apply a page result. Returns false when the ticket was superseded by
    /// a newer load, in which case nothing changes.
    pub fn apply_page(
        &mut self,
        ticket: FetchTicket,
        result: Result<UserPage, DirectoryError>,
        cache: &UserCache,
    ) -> bool {
        if ticket.generation != self.fetch_generation {
            debug!(
                stale = ticket.generation,
                current = self.fetch_generation,
                "Dropping stale page result"
            );
            return false;
        }
        match result {
            Ok(page) => {
                self.users = cache.reconcile_list(&page.records);
                self.total_pages = page.total_pages;
                info!(
                    page = self.current_page,
                    total_pages = self.total_pages,
                    count = self.users.len(),
                    "Page applied"
                );
            }
            Err(e) => {
                self.error = Some(FlowError::Retrieval(e));
            }
        }
        true
    }

    /// Fetch `page`, reconcile it against the cache, and store it. On
    /// failure the previous records are kept and a retrieval error is
    /// surfaced.
    #[instrument(skip(self, cache, directory))]
    pub async fn load_page(
        &mut self,
        page: u32,
        cache: &UserCache,
        directory: &DirectoryClient,
    ) -> Result<(), FlowError> {
        let ticket = self.begin_load(page);
        let result = directory.fetch_page(page).await;
        let failed = result.is_err();
        self.apply_page(ticket, result, cache);
        if failed {
            return Err(self.error.clone().unwrap_or_else(|| {
                FlowError::Retrieval(DirectoryError::Backend("unknown".to_string()))
            }));
        }
        Ok(())
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// The displayed subset: reconciled records filtered by the active
    /// search term, order preserved.
    pub fn visible(&self) -> Vec<User> {
        filter_users(&self.users, &self.search_term)
    }

    /// Delete a user via the directory. On success the entry leaves the
    /// cache and the local page immediately, without a refetch, and a
    /// reload signal carries the notice. On failure nothing changes except
    /// the surfaced error.
    #[instrument(skip(self, cache, directory, signals))]
    pub async fn delete_user(
        &mut self,
        id: &str,
        cache: &mut UserCache,
        directory: &DirectoryClient,
        signals: &mpsc::Sender<ListSignal>,
    ) -> Result<(), FlowError> {
        if let Err(e) = directory.delete(id.to_string()).await {
            let error = FlowError::Mutation(e);
            self.error = Some(error.clone());
            return Err(error);
        }

        cache.remove(id);
        self.users.retain(|user| user.id != id);
        info!(user_id = %id, "User deleted");

        let _ = signals
            .send(ListSignal::Reload {
                notice: "User deleted successfully!".to_string(),
            })
            .await;
        Ok(())
    }

    /// Consume a navigation signal: surface the notice; the caller reloads
    /// the current page when this returns true.
    pub fn apply_signal(&mut self, signal: ListSignal) -> bool {
        match signal {
            ListSignal::Reload { notice } => {
                self.notice = Some(notice);
                true
            }
        }
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Transient success notice, cleared on read.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    pub fn error(&self) -> Option<&FlowError> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserPage;

    fn user(id: &str, first: &str, last: &str, email: &str) -> User {
        User::new(id, first, last, email, "https://img.example.com/a.jpg")
    }

    fn page(records: Vec<User>, total_pages: u32) -> UserPage {
        UserPage {
            records,
            total_pages,
        }
    }

    #[test]
    fn superseded_ticket_is_dropped() {
        let cache = UserCache::new();
        let mut view = ListView::new();

        let stale = view.begin_load(1);
        let fresh = view.begin_load(2);

        let applied = view.apply_page(
            stale,
            Ok(page(vec![user("1", "Old", "Page", "old@x.com")], 3)),
            &cache,
        );
        assert!(!applied);
        assert!(view.visible().is_empty());
        assert_eq!(view.current_page(), 2);

        let applied = view.apply_page(
            fresh,
            Ok(page(vec![user("2", "New", "Page", "new@x.com")], 3)),
            &cache,
        );
        assert!(applied);
        assert_eq!(view.visible()[0].id, "2");
        assert_eq!(view.total_pages(), 3);
    }

    #[test]
    fn failed_load_keeps_previous_records() {
        let cache = UserCache::new();
        let mut view = ListView::new();

        let ticket = view.begin_load(1);
        view.apply_page(
            ticket,
            Ok(page(vec![user("1", "Jane", "Doe", "jane@x.com")], 2)),
            &cache,
        );

        let ticket = view.begin_load(2);
        view.apply_page(
            ticket,
            Err(DirectoryError::Backend("boom".to_string())),
            &cache,
        );

        assert_eq!(view.visible().len(), 1);
        assert!(matches!(view.error(), Some(FlowError::Retrieval(_))));
    }

    #[test]
    fn search_narrows_visible_records() {
        let cache = UserCache::new();
        let mut view = ListView::new();

        let ticket = view.begin_load(1);
        view.apply_page(
            ticket,
            Ok(page(
                vec![
                    user("1", "Jane", "Doe", "j@x.com"),
                    user("2", "John", "Smith", "doe@y.com"),
                    user("3", "Ann", "Lee", "ann@z.com"),
                ],
                1,
            )),
            &cache,
        );

        view.set_search("doe");
        let visible = view.visible();
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].id, "1");
        assert_eq!(visible[1].id, "2");

        view.set_search("");
        assert_eq!(view.visible().len(), 3);
    }

    #[test]
    fn reload_signal_surfaces_notice() {
        let mut view = ListView::new();
        let reload = view.apply_signal(ListSignal::Reload {
            notice: "User updated successfully!".to_string(),
        });
        assert!(reload);
        assert_eq!(
            view.take_notice().as_deref(),
            Some("User updated successfully!")
        );
        assert_eq!(view.take_notice(), None);
    }
}
