//! Payment-intent collaborator.
//!
//! Checkout itself never validates payment completion; this client only
//! asks the provider for a payment intent and hands the client secret
//! back to the frontend.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::PaymentConfig;

/// Errors that can occur when creating payment intents.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No payment secret key configured.
    #[error("payment provider is not configured")]
    NotConfigured,

    /// The requested amount cannot be expressed in minor units.
    #[error("invalid amount")]
    InvalidAmount,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider returned an error response.
    #[error("payment provider error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Response returned by the provider.
#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Payment-intent client (Stripe-compatible API shape).
#[derive(Clone)]
pub struct PaymentClient {
    client: reqwest::Client,
    config: Option<PaymentConfig>,
}

impl PaymentClient {
    /// Create a new payment client. With no configuration, every request
    /// fails with [`PaymentError::NotConfigured`].
    #[must_use]
    pub fn new(config: Option<PaymentConfig>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a payment intent and return its client secret.
    ///
    /// `amount` is in minor currency units; fractional values are rounded
    /// to the nearest whole unit, as the provider expects integers.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::NotConfigured` when no secret key is set,
    /// `PaymentError::InvalidAmount` for non-integral amounts, or an
    /// HTTP/API error when the provider rejects the request.
    pub async fn create_intent(
        &self,
        amount: Decimal,
        email: &str,
    ) -> Result<String, PaymentError> {
        let config = self.config.as_ref().ok_or(PaymentError::NotConfigured)?;

        let minor_units = amount
            .round()
            .to_i64()
            .filter(|n| *n >= 0)
            .ok_or(PaymentError::InvalidAmount)?;

        let url = format!(
            "{}/v1/payment_intents",
            config.endpoint.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(config.secret_key.expose_secret())
            .form(&[
                ("amount", minor_units.to_string()),
                ("currency", config.currency.clone()),
                ("receipt_email", email.to_owned()),
                ("automatic_payment_methods[enabled]", "true".to_owned()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let intent: IntentResponse = response.json().await?;
        Ok(intent.client_secret)
    }
}
