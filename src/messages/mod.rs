use tokio::sync::oneshot;

use crate::domain::{User, UserPage, UserPatch};
use crate::error::DirectoryError;

/// Generic type aliases for service communication
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Typed messages for the user directory collaborator. Each variant carries
/// its parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum DirectoryRequest {
    FetchPage {
        page: u32,
        respond_to: ServiceResponse<UserPage, DirectoryError>,
    },
    FetchOne {
        id: String,
        respond_to: ServiceResponse<User, DirectoryError>,
    },
    Update {
        id: String,
        patch: UserPatch,
        respond_to: ServiceResponse<UserPatch, DirectoryError>,
    },
    Delete {
        id: String,
        respond_to: ServiceResponse<(), DirectoryError>,
    },
}

/// Signal from the edit and delete flows to the list presentation layer:
/// show the notice and reload the current page.
#[derive(Debug, Clone, PartialEq)]
pub enum ListSignal {
    Reload { notice: String },
}
