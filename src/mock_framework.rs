//! # Mock Framework
//!
//! Utilities for testing the flows in isolation.
//!
//! Use [`create_mock_client`] to get a `DirectoryClient` whose requests
//! arrive on a receiver the test holds. The `expect_*` helpers assert the
//! next request's shape and hand back its responder, so the test scripts
//! the directory's behavior (success, failure, stale data)
//! deterministically without spinning up a `DirectoryService`.

use tokio::sync::{mpsc, oneshot};

use crate::clients::DirectoryClient;
use crate::domain::{User, UserPage, UserPatch};
use crate::error::DirectoryError;
use crate::messages::DirectoryRequest;

pub fn create_mock_client(
    buffer_size: usize,
) -> (DirectoryClient, mpsc::Receiver<DirectoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DirectoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FetchPage request
pub async fn expect_fetch_page(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(u32, oneshot::Sender<Result<UserPage, DirectoryError>>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::FetchPage { page, respond_to }) => Some((page, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FetchOne request
pub async fn expect_fetch_one(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(String, oneshot::Sender<Result<User, DirectoryError>>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::FetchOne { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(
    String,
    UserPatch,
    oneshot::Sender<Result<UserPatch, DirectoryError>>,
)> {
    match receiver.recv().await {
        Some(DirectoryRequest::Update {
            id,
            patch,
            respond_to,
        }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(String, oneshot::Sender<Result<(), DirectoryError>>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let fetch_task = tokio::spawn(async move { client.fetch_one("user_1".to_string()).await });

        let (id, responder) = expect_fetch_one(&mut receiver)
            .await
            .expect("Expected FetchOne request");
        assert_eq!(id, "user_1");
        let user = User::new("user_1", "Jane", "Doe", "jane@x.com", "https://a/1.jpg");
        responder.send(Ok(user.clone())).unwrap();

        let result = fetch_task.await.unwrap();
        assert_eq!(result, Ok(user));
    }
}
