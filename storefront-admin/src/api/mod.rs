//! Data access for the storefront backend.
//!
//! List screens talk to a [`Resource`], which is either the REST-backed
//! [`RestResource`] or the in-process [`MemoryResource`].

mod client;
mod memory;
mod rest;

use async_trait::async_trait;
use gridview::TableRow;
use serde::Deserialize;

pub use client::{AdminClient, AdminClientBuilder, Missing, Set};
pub use memory::MemoryResource;
pub use rest::RestResource;

use crate::error::ApiError;
use crate::model::Record;

/// CRUD plus status toggle over one collection.
#[async_trait]
pub trait Resource<T: Record>: Send + Sync {
    /// Fetches the whole collection.
    async fn list(&self) -> Result<Vec<T>, ApiError>;

    /// Fetches one record.
    async fn get(&self, id: &str) -> Result<T, ApiError>;

    /// Creates a record and returns it as stored.
    async fn create(&self, draft: &T::Draft) -> Result<T, ApiError>;

    /// Replaces a record and returns it as stored.
    async fn update(&self, id: &str, draft: &T::Draft) -> Result<T, ApiError>;

    /// Deletes a record.
    async fn delete(&self, id: &str) -> Result<(), ApiError>;

    /// Flips the record's active flag and returns the updated record.
    async fn toggle(&self, id: &str) -> Result<T, ApiError>;
}

/// Collection payload, either a bare array or `{ "data": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped { data: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { data: items } => items,
        }
    }
}

impl<T: Record> ListEnvelope<T> {
    /// Items that carry an id. Rows without one cannot be addressed by the
    /// table and are dropped with a warning.
    pub fn into_records(self) -> Vec<T> {
        let (records, unaddressable): (Vec<T>, Vec<T>) = self
            .into_items()
            .into_iter()
            .partition(|record| !record.id().trim().is_empty());
        if !unaddressable.is_empty() {
            log::warn!(
                "Skipping {} {} without an id",
                unaddressable.len(),
                T::KIND
            );
        }
        records
    }
}

/// Single-record payload, either bare or `{ "data": {...} }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemEnvelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> ItemEnvelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}
