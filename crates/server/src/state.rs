//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::payments::PaymentClient;
use crate::services::uploads::{UploadError, Uploader};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    uploader: Uploader,
    payments: PaymentClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload client cannot be built from the
    /// configured credentials.
    pub fn new(config: ServerConfig, pool: PgPool) -> Result<Self, UploadError> {
        let uploader = Uploader::new(config.upload.as_ref())?;
        let payments = PaymentClient::new(config.payment.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploader,
                payments,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the blob upload client.
    #[must_use]
    pub fn uploader(&self) -> &Uploader {
        &self.inner.uploader
    }

    /// Get a reference to the payment client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }
}
