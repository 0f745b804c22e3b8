//! Reqwest-backed adapter for the marketplace CRUD collections.
//!
//! This adapter owns transport details only: endpoint layout, JSON and
//! multipart encoding, and decoding of the entities returned by the service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use super::transport::{HttpTransport, decode};
use crate::domain::ports::{EntityApi, ListQuery, RemoteError};
use crate::domain::{Attachment, Resource, SessionContext};

/// Adapter serving every collection below one base URL.
pub struct HttpEntityApi {
    transport: HttpTransport,
}

impl HttpEntityApi {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        session: SessionContext,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            transport: HttpTransport::new(base, timeout, session)?,
        })
    }
}

#[async_trait]
impl<R: Resource> EntityApi<R> for HttpEntityApi {
    async fn list(&self, query: &ListQuery) -> Result<Vec<R>, RemoteError> {
        let url = self.transport.endpoint([R::COLLECTION])?;
        let request = self.transport.client().get(url).query(&query.pairs());
        let body = self.transport.execute(request).await?;
        let entities: Vec<R> = decode(&body, R::COLLECTION)?;
        debug!(collection = R::COLLECTION, count = entities.len(), "listed");
        Ok(entities)
    }

    async fn create(
        &self,
        draft: &R::Draft,
        attachment: Option<&Attachment>,
    ) -> Result<R, RemoteError> {
        let url = self.transport.endpoint([R::COLLECTION])?;
        let request = self.transport.client().post(url);
        let request = match attachment {
            Some(attachment) => request.multipart(multipart_form(draft, attachment)?),
            None => request.json(draft),
        };
        let body = self.transport.execute(request).await?;
        decode(&body, R::NAME)
    }

    async fn update(&self, id: &R::Key, patch: &R::Patch) -> Result<R, RemoteError> {
        let url = self.transport.endpoint([R::COLLECTION, id.as_ref()])?;
        let request = self.transport.client().patch(url).json(patch);
        let body = self.transport.execute(request).await?;
        decode(&body, R::NAME)
    }

    async fn delete(&self, id: &R::Key) -> Result<(), RemoteError> {
        let url = self.transport.endpoint([R::COLLECTION, id.as_ref()])?;
        let request = self.transport.client().delete(url);
        self.transport.execute(request).await?;
        Ok(())
    }
}

fn multipart_form<D: serde::Serialize>(
    draft: &D,
    attachment: &Attachment,
) -> Result<Form, RemoteError> {
    let payload = serde_json::to_string(draft)
        .map_err(|error| RemoteError::invalid_request(format!("unencodable payload: {error}")))?;
    let file = Part::bytes(attachment.bytes().to_vec())
        .file_name(attachment.file_name().to_owned())
        .mime_str(attachment.content_type())
        .map_err(|error| {
            RemoteError::invalid_request(format!(
                "invalid attachment content type {}: {error}",
                attachment.content_type()
            ))
        })?;
    Ok(Form::new().text("payload", payload).part("file", file))
}
