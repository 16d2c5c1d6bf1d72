use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::models::room::Room;

/// In-progress reservation form state. Owned by one booking session,
/// never persisted; reset to empty after a successful submission.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room: Option<Room>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl BookingDraft {
    pub fn reset(&mut self) {
        *self = BookingDraft::default();
    }
}

/// Durable reservation document, written exactly once when a payment
/// confirmation comes back. `nights` and `total_amount` stay optional so
/// malformed legacy documents still deserialize.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room_name: String,
    pub room_price: f64,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: Option<i64>,
    pub total_amount: Option<f64>,
    pub payment_id: String,
    pub timestamp: Option<DateTime>,
}
