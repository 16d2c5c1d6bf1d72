use mongodb::bson::DateTime;
use serde::Serialize;
use thiserror::Error;

use crate::db::bookings::BookingStore;
use crate::models::booking::{BookingDraft, BookingRecord};
use crate::services::payment::{CheckoutRequest, ContactPrefill, GatewayError, PaymentGateway};
use crate::services::pricing_service::{Pricing, PricingService};

pub const CURRENCY: &str = "INR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Editing,
    AwaitingPayment,
    Completed,
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Please fill in all required fields: {0} is missing")]
    MissingField(&'static str),

    #[error("Please select valid check-in and check-out dates")]
    InvalidDates,

    #[error("A payment is already in progress for this booking")]
    SubmissionInProgress,

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// What the guest gets back after a successful payment. `booking_id` is
/// absent and `warning` set when the record could not be written: the
/// payment has already gone through at that point and is not reversed.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub payment_id: String,
    pub booking_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// One guest's booking session: a draft being edited, priced on every
/// read, and pushed through payment and persistence on submit.
pub struct BookingWorkflow<G, S> {
    draft: BookingDraft,
    state: WorkflowState,
    gateway: G,
    store: S,
}

impl<G: PaymentGateway, S: BookingStore> BookingWorkflow<G, S> {
    pub fn new(gateway: G, store: S) -> Self {
        Self {
            draft: BookingDraft::default(),
            state: WorkflowState::Editing,
            gateway,
            store,
        }
    }

    pub fn with_draft(gateway: G, store: S, draft: BookingDraft) -> Self {
        Self {
            draft,
            state: WorkflowState::Editing,
            gateway,
            store,
        }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    /// Recomputed from the draft on every call, never cached.
    pub fn pricing(&self) -> Pricing {
        let rate = self
            .draft
            .room
            .as_ref()
            .map(|room| room.price_per_night)
            .unwrap_or(0.0);
        PricingService::compute(rate, self.draft.check_in, self.draft.check_out)
    }

    fn validate(&self) -> Result<(), BookingError> {
        if self.draft.name.trim().is_empty() {
            return Err(BookingError::MissingField("name"));
        }
        if self.draft.email.trim().is_empty() {
            return Err(BookingError::MissingField("email"));
        }
        if self.draft.phone.trim().is_empty() {
            return Err(BookingError::MissingField("phone"));
        }
        if self.draft.room.is_none() {
            return Err(BookingError::MissingField("room"));
        }
        if self.draft.check_in.is_none() {
            return Err(BookingError::MissingField("check-in date"));
        }
        if self.draft.check_out.is_none() {
            return Err(BookingError::MissingField("check-out date"));
        }
        if self.pricing().total <= 0.0 {
            return Err(BookingError::InvalidDates);
        }
        Ok(())
    }

    /// Submit the draft: validate, collect the payment, persist the record,
    /// reset the form. The gateway is never invoked for a draft that fails
    /// validation. On a gateway failure the draft is left untouched so the
    /// guest can retry.
    pub async fn submit(&mut self, payment_token: &str) -> Result<SubmissionReceipt, BookingError> {
        if self.state == WorkflowState::AwaitingPayment {
            return Err(BookingError::SubmissionInProgress);
        }

        self.validate()?;
        let pricing = self.pricing();
        let room = self.draft.room.clone().expect("validated above");

        self.state = WorkflowState::AwaitingPayment;

        let request = CheckoutRequest {
            amount_minor_units: PricingService::to_minor_units(pricing.total),
            currency: CURRENCY.to_string(),
            description: format!("{} Booking", room.name),
            prefill: ContactPrefill {
                name: self.draft.name.clone(),
                email: self.draft.email.clone(),
                contact: self.draft.phone.clone(),
            },
            payment_token: payment_token.to_string(),
        };

        let confirmation = match self.gateway.collect(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                // Back to editing with the draft intact.
                self.state = WorkflowState::Editing;
                return Err(e.into());
            }
        };

        let record = BookingRecord {
            id: None,
            name: self.draft.name.clone(),
            email: self.draft.email.clone(),
            phone: self.draft.phone.clone(),
            room_name: room.name.clone(),
            room_price: room.price_per_night,
            check_in: self.draft.check_in.expect("validated above"),
            check_out: self.draft.check_out.expect("validated above"),
            nights: Some(pricing.nights),
            total_amount: Some(pricing.total),
            payment_id: confirmation.payment_id.clone(),
            timestamp: Some(DateTime::now()),
        };

        // The payment has succeeded; an append failure is reported but not
        // rolled back or retried.
        let (booking_id, warning) = match self.store.append(&record).await {
            Ok(id) => (Some(id), None),
            Err(e) => {
                log::error!(
                    "Booking for payment {} could not be recorded: {}",
                    confirmation.payment_id,
                    e
                );
                (
                    None,
                    Some(format!("Payment succeeded but the booking could not be recorded: {}", e)),
                )
            }
        };

        self.state = WorkflowState::Completed;
        self.draft.reset();
        self.state = WorkflowState::Editing;

        Ok(SubmissionReceipt {
            payment_id: confirmation.payment_id,
            booking_id,
            warning,
        })
    }
}
