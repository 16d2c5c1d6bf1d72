use actix_web::{web, HttpResponse, Responder};
use chrono::NaiveDate;
use mongodb::Client;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::db::bookings::MongoBookingStore;
use crate::models::booking::BookingDraft;
use crate::models::room::find_room;
use crate::services::booking_workflow::{BookingError, BookingWorkflow};
use crate::services::payment::razorpay::RazorpayGateway;
use crate::services::pricing_service::PricingService;

#[derive(Deserialize)]
pub struct QuoteInput {
    pub room_id: u32,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

#[derive(Deserialize)]
pub struct BookingSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub room_id: u32,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    /// Payment handle returned by the checkout widget.
    pub payment_token: String,
}

/// Price preview for the booking summary pane. Incomplete or reversed date
/// ranges come back as a zero total rather than an error.
pub async fn quote(input: web::Json<QuoteInput>) -> impl Responder {
    let input = input.into_inner();

    let room = match find_room(input.room_id) {
        Some(room) => room,
        None => return HttpResponse::NotFound().body("Room not found"),
    };

    let pricing = PricingService::compute(room.price_per_night, input.check_in, input.check_out);
    HttpResponse::Ok().json(pricing)
}

pub async fn submit_booking(
    mongo: web::Data<Arc<Client>>,
    gateway: web::Data<RazorpayGateway>,
    input: web::Json<BookingSubmission>,
) -> impl Responder {
    let input = input.into_inner();

    let room = match find_room(input.room_id) {
        Some(room) => room,
        None => return HttpResponse::NotFound().body("Room not found"),
    };

    let draft = BookingDraft {
        name: input.name,
        email: input.email,
        phone: input.phone,
        room: Some(room),
        check_in: input.check_in,
        check_out: input.check_out,
    };

    let store = MongoBookingStore::new(mongo.get_ref().clone());
    let mut workflow = BookingWorkflow::with_draft(gateway.get_ref().clone(), store, draft);

    match workflow.submit(&input.payment_token).await {
        Ok(receipt) => HttpResponse::Ok().json(json!({
            "success": true,
            "payment_id": receipt.payment_id,
            "booking_id": receipt.booking_id,
            "warning": receipt.warning,
        })),
        Err(e @ BookingError::MissingField(_)) | Err(e @ BookingError::InvalidDates) => {
            HttpResponse::BadRequest().body(e.to_string())
        }
        Err(e @ BookingError::SubmissionInProgress) => {
            HttpResponse::Conflict().body(e.to_string())
        }
        Err(BookingError::Gateway(e)) => {
            log::warn!("Payment collection failed: {}", e);
            HttpResponse::PaymentRequired().body(e.to_string())
        }
    }
}
