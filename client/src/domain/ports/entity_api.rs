//! Driven port for the remote CRUD collections backing the entity stores.
//!
//! The domain owns the request shapes and the error contract so entity
//! services stay adapter-agnostic; the HTTP adapter lives in
//! `outbound::http`.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{Attachment, Resource};

define_port_error! {
    /// Errors surfaced while calling a remote collection.
    pub enum RemoteError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "remote transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } =>
            "remote call timed out: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, message: String } =>
            "remote service answered {status}: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "remote response decode failed: {message}",
        /// The adapter refused to build the request.
        InvalidRequest { message: String } =>
            "remote request invalid: {message}",
    }
}

/// Filters for listing a collection.
///
/// # Examples
/// ```
/// use client::domain::ports::ListQuery;
///
/// let query = ListQuery::new().search("auditorium").filter("category", "space");
/// assert_eq!(
///     query.pairs(),
///     vec![
///         ("category".to_owned(), "space".to_owned()),
///         ("search".to_owned(), "auditorium".to_owned()),
///     ],
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    search: Option<String>,
    filters: BTreeMap<String, String>,
}

impl ListQuery {
    /// Query listing the whole collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search term; blank terms are ignored.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = (!text.trim().is_empty()).then(|| text.trim().to_owned());
        self
    }

    /// Exact-match filter on `field`.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Whether the query lists everything.
    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.filters.is_empty()
    }

    /// Query-string pairs: filters in key order, then the search term.
    pub fn pairs(&self) -> Vec<(String, String)> {
        self.filters
            .iter()
            .map(|(field, value)| (field.clone(), value.clone()))
            .chain(
                self.search
                    .iter()
                    .map(|text| ("search".to_owned(), text.clone())),
            )
            .collect()
    }
}

/// Port for one remote CRUD collection.
///
/// Implementations return the entity as stored remotely, including the
/// server-assigned identifier on create.
#[async_trait]
pub trait EntityApi<R: Resource>: Send + Sync {
    /// List entities matching `query`.
    async fn list(&self, query: &ListQuery) -> Result<Vec<R>, RemoteError>;

    /// Create an entity, optionally uploading `attachment` with it.
    async fn create(
        &self,
        draft: &R::Draft,
        attachment: Option<&Attachment>,
    ) -> Result<R, RemoteError>;

    /// Apply `patch` to the entity with key `id`.
    async fn update(&self, id: &R::Key, patch: &R::Patch) -> Result<R, RemoteError>;

    /// Delete the entity with key `id`.
    async fn delete(&self, id: &R::Key) -> Result<(), RemoteError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_ignored() {
        let query = ListQuery::new().search("   ");
        assert!(query.is_empty());
        assert!(query.pairs().is_empty());
    }

    #[test]
    fn remote_error_messages_include_status() {
        let error = RemoteError::status(404_u16, "not found");
        assert_eq!(error.to_string(), "remote service answered 404: not found");
    }
}
