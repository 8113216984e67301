use std::marker::PhantomData;

use async_trait::async_trait;

use super::{AdminClient, ItemEnvelope, ListEnvelope, Resource};
use crate::error::ApiError;
use crate::model::Record;

/// [`Resource`] backed by the admin REST API.
///
/// | operation | request                       |
/// |-----------|-------------------------------|
/// | list      | `GET /<path>`                 |
/// | get       | `GET /<path>/<id>`            |
/// | create    | `POST /<path>`                |
/// | update    | `PUT /<path>/<id>`            |
/// | delete    | `DELETE /<path>/<id>`         |
/// | toggle    | `PATCH /<path>/<id>/toggle`   |
pub struct RestResource<T> {
    client: AdminClient,
    path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> RestResource<T> {
    /// Uses the record type's default collection path.
    pub fn new(client: AdminClient) -> Self {
        Self::with_path(client, T::KIND.path())
    }

    /// Uses a custom collection path.
    pub fn with_path(client: AdminClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T: Record> Resource<T> for RestResource<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let envelope: ListEnvelope<T> = self.client.get(&[&self.path]).await?;
        let items = envelope.into_records();
        log::debug!("Fetched {} {}", items.len(), self.path);
        Ok(items)
    }

    async fn get(&self, id: &str) -> Result<T, ApiError> {
        let envelope: ItemEnvelope<T> = self.client.get(&[&self.path, id]).await?;
        Ok(envelope.into_inner())
    }

    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError> {
        let envelope: ItemEnvelope<T> = self.client.post(&[&self.path], draft).await?;
        Ok(envelope.into_inner())
    }

    async fn update(&self, id: &str, draft: &T::Draft) -> Result<T, ApiError> {
        let envelope: ItemEnvelope<T> = self.client.put(&[&self.path, id], draft).await?;
        Ok(envelope.into_inner())
    }

    async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&[&self.path, id]).await
    }

    async fn toggle(&self, id: &str) -> Result<T, ApiError> {
        let envelope: ItemEnvelope<T> = self.client.patch(&[&self.path, id, "toggle"]).await?;
        Ok(envelope.into_inner())
    }
}
