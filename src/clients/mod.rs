use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

use crate::domain::{User, UserPage, UserPatch};
use crate::error::DirectoryError;
use crate::messages::DirectoryRequest;

// =============================================================================
// CLIENT METHOD MACRO
// =============================================================================

/// Generate client methods with the oneshot channel boilerplate and
/// automatic tracing. Channel failures map to the error type's
/// `ActorCommunicationError` variant.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}

// =============================================================================
// DIRECTORY CLIENT
// =============================================================================

/// Handle for talking to the user directory. Cloneable; all methods are
/// thin wrappers around the request channel.
#[derive(Clone)]
pub struct DirectoryClient {
    sender: mpsc::Sender<DirectoryRequest>,
}

impl DirectoryClient {
    pub fn new(sender: mpsc::Sender<DirectoryRequest>) -> Self {
        Self { sender }
    }
}

client_method!(DirectoryClient => fn fetch_page(page: u32) -> UserPage as DirectoryRequest::FetchPage, Error = DirectoryError);
client_method!(DirectoryClient => fn fetch_one(id: String) -> User as DirectoryRequest::FetchOne, Error = DirectoryError);
client_method!(DirectoryClient => fn update(id: String, patch: UserPatch) -> UserPatch as DirectoryRequest::Update, Error = DirectoryError);
client_method!(DirectoryClient => fn delete(id: String) -> () as DirectoryRequest::Delete, Error = DirectoryError);
