//! The edit form flow.
//!
//! States: loading -> ready -> submitting -> {saved, failed}. Opening
//! consults the cache first; a complete cached record skips the fetch
//! entirely. Validation runs before any network call, and the cache is
//! only written after the directory confirms the update.

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::cache::UserCache;
use crate::clients::DirectoryClient;
use crate::domain::{User, UserPatch};
use crate::error::FlowError;
use crate::messages::ListSignal;

#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Loading,
    /// The form is editable. `error` holds the message from a failed
    /// validation or a failed submit, retained until the next attempt.
    Ready {
        user: User,
        error: Option<FlowError>,
    },
    Submitting {
        user: User,
    },
    Saved {
        user: User,
    },
    /// The initial fetch failed. Terminal for this attempt; the user
    /// retries by re-opening the form.
    Failed(FlowError),
}

pub struct EditFlow {
    id: String,
    state: EditState,
}

impl EditFlow {
    /// Open the form for `id`. A complete cache entry transitions straight
    /// to ready with no fetch; otherwise the record is fetched from the
    /// directory.
    #[instrument(skip(cache, directory))]
    pub async fn open(id: String, cache: &UserCache, directory: &DirectoryClient) -> EditFlow {
        let mut flow = EditFlow {
            id,
            state: EditState::Loading,
        };

        if let Some(user) = cache.get(&flow.id).and_then(|entry| entry.as_user(&flow.id)) {
            debug!("Serving edit form from cache");
            flow.state = EditState::Ready { user, error: None };
            return flow;
        }

        flow.state = match directory.fetch_one(flow.id.clone()).await {
            Ok(user) => EditState::Ready { user, error: None },
            Err(e) => EditState::Failed(FlowError::Retrieval(e)),
        };
        flow
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        if let EditState::Ready { user, .. } = &mut self.state {
            user.first_name = value.into();
        }
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        if let EditState::Ready { user, .. } = &mut self.state {
            user.last_name = value.into();
        }
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        if let EditState::Ready { user, .. } = &mut self.state {
            user.email = value.into();
        }
    }

    /// Submit the current form values.
    ///
    /// Empty first name, last name, or email fails validation locally and
    /// never reaches the directory. On success the merged record (original
    /// fields, then submitted fields, then any fields the directory echoed
    /// back) is put into the cache and a reload signal is emitted. On a
    /// directory failure the form returns to ready with the error retained
    /// and the cache untouched.
    #[instrument(skip(self, cache, directory, signals), fields(user_id = %self.id))]
    pub async fn submit(
        &mut self,
        cache: &mut UserCache,
        directory: &DirectoryClient,
        signals: &mpsc::Sender<ListSignal>,
    ) -> Result<(), FlowError> {
        let user = match &self.state {
            EditState::Ready { user, .. } => user.clone(),
            // The submit trigger is disabled outside ready; ignore calls
            // that race past it.
            _ => {
                debug!("Submit ignored outside ready state");
                return Ok(());
            }
        };

        if user.first_name.is_empty() || user.last_name.is_empty() || user.email.is_empty() {
            let error = FlowError::Validation("All fields are required".to_string());
            self.state = EditState::Ready {
                user,
                error: Some(error.clone()),
            };
            return Err(error);
        }

        self.state = EditState::Submitting { user: user.clone() };

        let submitted = UserPatch {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
        };

        match directory.update(self.id.clone(), submitted.clone()).await {
            Ok(echoed) => {
                let merged = user.with_patch(&submitted).with_patch(&echoed);
                cache.put(merged.clone());
                self.state = EditState::Saved { user: merged };
                info!("User update confirmed");

                let _ = signals
                    .send(ListSignal::Reload {
                        notice: "User updated successfully!".to_string(),
                    })
                    .await;
                Ok(())
            }
            Err(e) => {
                let error = FlowError::Mutation(e);
                self.state = EditState::Ready {
                    user,
                    error: Some(error.clone()),
                };
                Err(error)
            }
        }
    }
}
