pub mod razorpay;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Contact fields forwarded to the gateway so it can prefill its checkout
/// form.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactPrefill {
    pub name: String,
    pub email: String,
    pub contact: String,
}

/// One payment collection request. `payment_token` is the opaque handle the
/// gateway's checkout widget handed back after the guest authorized the
/// charge; the adapter settles it for exactly `amount_minor_units`.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub amount_minor_units: i64,
    pub currency: String,
    pub description: String,
    pub prefill: ContactPrefill,
    pub payment_token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentConfirmation {
    pub payment_id: String,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Payment failed: {0}")]
    Declined(String),

    #[error("Payment gateway unreachable: {0}")]
    Unreachable(String),
}

/// Seam between the booking workflow and the payment provider. One call,
/// one resolution: either a confirmation id or a failure reason. A
/// transport failure surfaces the same way as a decline.
pub trait PaymentGateway {
    async fn collect(
        &self,
        request: &CheckoutRequest,
    ) -> Result<PaymentConfirmation, GatewayError>;
}
