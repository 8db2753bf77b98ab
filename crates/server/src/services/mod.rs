//! Service layer: authentication and outbound collaborators.

pub mod auth;
pub mod payments;
pub mod uploads;

pub use auth::AuthService;
pub use payments::{PaymentClient, PaymentError};
pub use uploads::{UploadError, Uploader};
