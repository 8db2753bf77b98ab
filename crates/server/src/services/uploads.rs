//! Blob upload collaborator.
//!
//! Product images are stored by an external blob service: we PUT the raw
//! bytes and get back a public URL. An upload failure aborts whatever
//! operation needed the URL; nothing is persisted halfway.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::UploadConfig;

/// Errors that can occur when uploading blobs.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No blob endpoint/token configured.
    #[error("blob storage is not configured")]
    NotConfigured,

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service returned an error response.
    #[error("blob service error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or parse the response.
    #[error("upload error: {0}")]
    Parse(String),
}

/// Response returned by the blob service.
#[derive(Debug, Deserialize)]
struct BlobResponse {
    url: String,
}

/// Blob upload client.
#[derive(Clone)]
pub struct Uploader {
    client: reqwest::Client,
    endpoint: Option<String>,
}

impl Uploader {
    /// Create a new uploader. With no configuration, every upload fails
    /// with [`UploadError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: Option<&UploadConfig>) -> Result<Self, UploadError> {
        let Some(config) = config else {
            return Ok(Self {
                client: reqwest::Client::new(),
                endpoint: None,
            });
        };

        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.token.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| UploadError::Parse(format!("invalid blob token: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: Some(config.endpoint.trim_end_matches('/').to_owned()),
        })
    }

    /// Upload a file and return its public URL.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::NotConfigured` when no endpoint is set, or an
    /// HTTP/API error when the service rejects the upload.
    pub async fn put(&self, filename: &str, bytes: Vec<u8>) -> Result<String, UploadError> {
        let endpoint = self.endpoint.as_ref().ok_or(UploadError::NotConfigured)?;
        let url = format!("{endpoint}/{filename}");

        let response = self.client.put(&url).body(bytes).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(UploadError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let blob: BlobResponse = response.json().await?;
        Ok(blob.url)
    }
}
