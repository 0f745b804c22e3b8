//! Fetch layer pairing each entity store with its remote collection.
//!
//! Views call these operations instead of talking to the remote API
//! directly. Each operation tracks a loading flag and a human-readable error
//! slot, and mutates the store only after the remote call succeeded, so a
//! failed call never leaves the store partially updated.

use std::future::Future;
use std::sync::Arc;

use entity_store::EntityStore;
use serde_json::json;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::ports::{EntityApi, ListQuery, RemoteError};
use crate::domain::{Attachment, Error, Resource};

/// Observable progress of the remote calls made through one service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStatus {
    in_flight: usize,
    error: Option<String>,
}

impl FetchStatus {
    /// Whether a remote call is still running.
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Message from the most recent failed call, cleared when a new call
    /// starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Remote-backed operations for one entity type.
pub struct EntityService<R: Resource> {
    store: Arc<EntityStore<R>>,
    api: Arc<dyn EntityApi<R>>,
    status: watch::Sender<FetchStatus>,
}

impl<R: Resource> EntityService<R> {
    /// Create a service with a fresh, empty store.
    pub fn new(api: Arc<dyn EntityApi<R>>) -> Self {
        Self::with_store(Arc::new(EntityStore::new()), api)
    }

    /// Create a service over an existing store.
    pub fn with_store(store: Arc<EntityStore<R>>, api: Arc<dyn EntityApi<R>>) -> Self {
        let (status, _) = watch::channel(FetchStatus::default());
        Self { store, api, status }
    }

    /// The store this service populates.
    pub fn store(&self) -> &Arc<EntityStore<R>> {
        &self.store
    }

    /// Current loading flag and error slot.
    pub fn status(&self) -> FetchStatus {
        self.status.borrow().clone()
    }

    /// Observe loading and error changes.
    pub fn subscribe_status(&self) -> watch::Receiver<FetchStatus> {
        self.status.subscribe()
    }

    /// Dismiss the recorded error message.
    pub fn clear_error(&self) {
        self.status
            .send_if_modified(|status| status.error.take().is_some());
    }

    /// Look up a cached entity without calling the remote service.
    pub fn find(&self, id: &R::Key) -> Option<R> {
        self.store.get_by_id(id)
    }

    /// List the remote collection and replace the store with the result.
    ///
    /// Returns the number of entities loaded.
    pub async fn fetch_all(&self, query: &ListQuery) -> Result<usize, Error> {
        let entities = self.track("list", self.api.list(query)).await?;
        let count = entities.len();
        self.store.set_all(entities);
        debug!(collection = R::COLLECTION, count, "store refreshed");
        Ok(count)
    }

    /// Create an entity remotely and append the stored result.
    pub async fn create(
        &self,
        draft: &R::Draft,
        attachment: Option<&Attachment>,
    ) -> Result<R, Error> {
        let created = self
            .track("create", self.api.create(draft, attachment))
            .await?;
        self.store.create(created.clone());
        debug!(collection = R::COLLECTION, id = %created.key(), "entity created");
        Ok(created)
    }

    /// Update an entity remotely and replace matching cached entries.
    pub async fn update(&self, id: &R::Key, patch: &R::Patch) -> Result<R, Error> {
        let updated = self.track("update", self.api.update(id, patch)).await?;
        let replaced = self.store.update(updated.clone());
        debug!(collection = R::COLLECTION, %id, replaced, "entity updated");
        Ok(updated)
    }

    /// Delete an entity remotely and drop matching cached entries.
    pub async fn delete(&self, id: &R::Key) -> Result<(), Error> {
        self.track("delete", self.api.delete(id)).await?;
        let removed = self.store.delete(id);
        debug!(collection = R::COLLECTION, %id, removed, "entity deleted");
        Ok(())
    }

    async fn track<T>(
        &self,
        operation: &'static str,
        call: impl Future<Output = Result<T, RemoteError>>,
    ) -> Result<T, Error> {
        let in_flight = InFlight::begin(&self.status);
        let outcome = call.await;

        match outcome {
            Ok(value) => {
                in_flight.finish(None);
                Ok(value)
            }
            Err(remote) => {
                warn!(
                    collection = R::COLLECTION,
                    operation,
                    error = %remote,
                    "remote call failed"
                );
                let error = to_domain_error(&remote, R::NAME);
                in_flight.finish(Some(error.message().to_owned()));
                Err(error)
            }
        }
    }
}

/// Marks one remote call as running until dropped.
///
/// Dropping the guard without `finish` (the caller abandoned the call)
/// still lowers the loading counter.
struct InFlight<'a> {
    status: &'a watch::Sender<FetchStatus>,
}

impl<'a> InFlight<'a> {
    fn begin(status: &'a watch::Sender<FetchStatus>) -> Self {
        status.send_modify(|status| {
            status.in_flight += 1;
            status.error = None;
        });
        Self { status }
    }

    fn finish(self, error: Option<String>) {
        if error.is_some() {
            self.status.send_modify(|status| status.error = error);
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.status.send_modify(|status| {
            status.in_flight = status.in_flight.saturating_sub(1);
        });
    }
}

/// Translate a port failure into the message shown to the user.
pub(crate) fn to_domain_error(remote: &RemoteError, noun: &str) -> Error {
    match remote {
        RemoteError::Transport { .. } => Error::service_unavailable(
            "Could not reach the marketplace. Check your connection and try again.",
        ),
        RemoteError::Timeout { .. } => {
            Error::timeout("The marketplace took too long to respond. Please try again.")
        }
        RemoteError::Decode { .. } => {
            Error::internal("The marketplace sent a response this app could not read.")
        }
        RemoteError::InvalidRequest { message } => {
            Error::invalid_request(format!("The {noun} request is invalid: {message}"))
        }
        RemoteError::Status { status, message } => {
            status_error(*status, message, noun).with_details(json!({ "status": status }))
        }
    }
}

fn status_error(status: u16, message: &str, noun: &str) -> Error {
    match status {
        400 | 422 => {
            let detail = if message.trim().is_empty() {
                "the data was rejected"
            } else {
                message
            };
            Error::invalid_request(format!("The {noun} request was rejected: {detail}"))
        }
        401 => Error::unauthorized("Your session has expired. Please sign in again."),
        403 => Error::forbidden(format!("You are not allowed to change this {noun}.")),
        404 => Error::not_found(format!("The {noun} no longer exists.")),
        409 => Error::conflict(format!(
            "The {noun} was changed elsewhere. Reload and try again."
        )),
        408 | 504 => Error::timeout("The marketplace took too long to respond. Please try again."),
        _ => Error::service_unavailable(format!(
            "The marketplace could not handle the {noun} request (status {status})."
        )),
    }
}

#[cfg(test)]
#[path = "entity_service_tests.rs"]
mod tests;
