//! Adapters for the two external collaborators: the record store (REST)
//! and the image host (unsigned uploads).
//!
//! Both clients are constructed once at startup from [`crate::config`]
//! values and handed to the views that need them; there is no ambient
//! module-level state.

pub mod records;
pub mod uploads;

pub use records::RecordStore;
pub use uploads::ImageUploader;

/// Errors from the remote services.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("unexpected response: {0}")]
    BadResponse(String),
    #[error("could not read file: {0}")]
    Io(#[from] std::io::Error),
}

/// Pass through successful responses, turn everything else into
/// [`RemoteError::Status`] with whatever body the service sent.
pub(crate) fn ok_or_status(
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response, RemoteError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().unwrap_or_default();
        Err(RemoteError::Status { status, body })
    }
}
