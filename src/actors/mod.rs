//! The user directory service.
//!
//! An in-memory, paged user store behind the request channel. It implements
//! the same contract a remote directory would (fetch a page, fetch one,
//! update, delete), which is all the flows ever see; the demo binary and
//! black-box tests run against it.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::clients::DirectoryClient;
use crate::domain::{User, UserPage, UserPatch};
use crate::error::DirectoryError;
use crate::messages::DirectoryRequest;

pub struct DirectoryService {
    receiver: mpsc::Receiver<DirectoryRequest>,
    users: Vec<User>,
    page_size: usize,
}

impl DirectoryService {
    pub fn new(
        buffer_size: usize,
        page_size: usize,
        seed: Vec<User>,
    ) -> (Self, DirectoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            users: seed,
            page_size,
        };
        let client = DirectoryClient::new(sender);
        (service, client)
    }

    pub async fn run(mut self) {
        info!("DirectoryService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                DirectoryRequest::FetchPage { page, respond_to } => {
                    let result = self.handle_fetch_page(page);
                    let _ = respond_to.send(result);
                }
                DirectoryRequest::FetchOne { id, respond_to } => {
                    let result = self.handle_fetch_one(&id);
                    let _ = respond_to.send(result);
                }
                DirectoryRequest::Update {
                    id,
                    patch,
                    respond_to,
                } => {
                    let result = self.handle_update(&id, patch);
                    let _ = respond_to.send(result);
                }
                DirectoryRequest::Delete { id, respond_to } => {
                    let result = self.handle_delete(&id);
                    let _ = respond_to.send(result);
                }
            }
        }
        info!("DirectoryService stopped");
    }

    /// Pages are 1-based. An out-of-range page yields an empty record list
    /// with the true total, not an error.
    #[instrument(skip(self))]
    fn handle_fetch_page(&self, page: u32) -> Result<UserPage, DirectoryError> {
        debug!("Processing fetch_page request");
        let total_pages = self.users.len().div_ceil(self.page_size).max(1) as u32;
        let records: Vec<User> = if page == 0 {
            Vec::new()
        } else {
            self.users
                .iter()
                .skip((page as usize - 1) * self.page_size)
                .take(self.page_size)
                .cloned()
                .collect()
        };
        info!(page, total_pages, count = records.len(), "Page fetched");
        Ok(UserPage {
            records,
            total_pages,
        })
    }

    #[instrument(skip(self))]
    fn handle_fetch_one(&self, id: &str) -> Result<User, DirectoryError> {
        debug!("Processing fetch_one request");
        self.users
            .iter()
            .find(|user| user.id == id)
            .cloned()
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }

    /// Applies the patch field by field and echoes the stored editable
    /// fields back; the caller treats the echo as authoritative.
    #[instrument(skip(self, patch))]
    fn handle_update(&mut self, id: &str, patch: UserPatch) -> Result<UserPatch, DirectoryError> {
        debug!("Processing update request");
        let user = self
            .users
            .iter_mut()
            .find(|user| user.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))?;

        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = patch.email {
            user.email = email;
        }
        info!(user_email = %user.email, "User updated");

        Ok(UserPatch {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
        })
    }

    #[instrument(skip(self))]
    fn handle_delete(&mut self, id: &str) -> Result<(), DirectoryError> {
        debug!("Processing delete request");
        let before = self.users.len();
        self.users.retain(|user| user.id != id);
        if self.users.len() == before {
            return Err(DirectoryError::NotFound(id.to_string()));
        }
        info!("User deleted");
        Ok(())
    }
}
