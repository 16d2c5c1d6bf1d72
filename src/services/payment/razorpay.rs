use serde::Deserialize;
use serde_json::json;

use crate::services::payment::{
    CheckoutRequest, GatewayError, PaymentConfirmation, PaymentGateway,
};

const DEFAULT_API_BASE: &str = "https://api.razorpay.com";

/// Razorpay REST adapter. The checkout widget runs on the guest's side and
/// authorizes the charge; this adapter looks the payment up by the token the
/// widget returned, checks it matches what the booking owes, and captures
/// it.
#[derive(Clone)]
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: String,
    api_base: String,
}

/// Payment entity as returned by `GET /v1/payments/:id`.
#[derive(Debug, Deserialize)]
struct PaymentEntity {
    id: String,
    amount: i64,
    currency: String,
    status: String,
    error_description: Option<String>,
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, std::env::VarError> {
        let key_id = std::env::var("RAZORPAY_KEY_ID")?;
        let key_secret = std::env::var("RAZORPAY_KEY_SECRET")?;
        Ok(Self::new(key_id, key_secret))
    }

    /// Point the adapter at a different host. Used by tests.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    async fn fetch_payment(&self, payment_id: &str) -> Result<PaymentEntity, GatewayError> {
        let url = format!("{}/v1/payments/{}", self.api_base, payment_id);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Declined(format!(
                "payment {} not found (status {})",
                payment_id,
                response.status()
            )));
        }

        response
            .json::<PaymentEntity>()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))
    }

    async fn capture_payment(
        &self,
        payment_id: &str,
        amount_minor_units: i64,
        currency: &str,
    ) -> Result<PaymentEntity, GatewayError> {
        let url = format!("{}/v1/payments/{}/capture", self.api_base, payment_id);
        let response = self
            .client
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({ "amount": amount_minor_units, "currency": currency }))
            .send()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Declined(format!(
                "capture of {} rejected (status {})",
                payment_id,
                response.status()
            )));
        }

        response
            .json::<PaymentEntity>()
            .await
            .map_err(|e| GatewayError::Unreachable(e.to_string()))
    }
}

impl PaymentGateway for RazorpayGateway {
    async fn collect(
        &self,
        request: &CheckoutRequest,
    ) -> Result<PaymentConfirmation, GatewayError> {
        let payment = self.fetch_payment(&request.payment_token).await?;

        if payment.status == "failed" {
            let reason = payment
                .error_description
                .unwrap_or_else(|| "payment was declined".to_string());
            return Err(GatewayError::Declined(reason));
        }

        if payment.amount != request.amount_minor_units || payment.currency != request.currency {
            return Err(GatewayError::Declined(format!(
                "payment {} is for {} {}, booking requires {} {}",
                payment.id,
                payment.amount,
                payment.currency,
                request.amount_minor_units,
                request.currency
            )));
        }

        match payment.status.as_str() {
            // Already settled, nothing left to do.
            "captured" => Ok(PaymentConfirmation {
                payment_id: payment.id,
            }),
            "authorized" => {
                log::info!(
                    "Capturing payment {} for {} ({})",
                    payment.id,
                    request.amount_minor_units,
                    request.description
                );
                let captured = self
                    .capture_payment(&payment.id, request.amount_minor_units, &request.currency)
                    .await?;
                Ok(PaymentConfirmation {
                    payment_id: captured.id,
                })
            }
            other => Err(GatewayError::Declined(format!(
                "payment {} is not payable (status: {})",
                payment.id, other
            ))),
        }
    }
}
