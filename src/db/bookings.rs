use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection};
use std::sync::Arc;
use thiserror::Error;

use crate::db::mongo::{BOOKINGS_COLLECTION, DATABASE};
use crate::models::booking::BookingRecord;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write booking: {0}")]
    Write(String),

    #[error("Failed to read bookings: {0}")]
    Read(String),
}

/// Booking document store. Append-only: records are never updated or
/// deleted by this service.
pub trait BookingStore {
    /// Insert one record and return its id. No dedup or idempotency key;
    /// a double submit produces duplicate documents.
    async fn append(&self, record: &BookingRecord) -> Result<String, StoreError>;

    /// Every record, most recent first. No pagination; the collection is
    /// expected to hold hundreds of documents, not millions.
    async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError>;
}

#[derive(Clone)]
pub struct MongoBookingStore {
    client: Arc<Client>,
}

impl MongoBookingStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn collection(&self) -> Collection<BookingRecord> {
        self.client.database(DATABASE).collection(BOOKINGS_COLLECTION)
    }
}

impl BookingStore for MongoBookingStore {
    async fn append(&self, record: &BookingRecord) -> Result<String, StoreError> {
        match self.collection().insert_one(record).await {
            Ok(result) => Ok(result
                .inserted_id
                .as_object_id()
                .map(|id| id.to_hex())
                .unwrap_or_default()),
            Err(e) => Err(StoreError::Write(e.to_string())),
        }
    }

    async fn list_all(&self) -> Result<Vec<BookingRecord>, StoreError> {
        let cursor = self
            .collection()
            .find(doc! {})
            .sort(doc! { "timestamp": -1 })
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;

        cursor
            .try_collect::<Vec<BookingRecord>>()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))
    }
}
