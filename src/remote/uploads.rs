//! Unsigned image uploads to the asset host.
//!
//! One file per request with a fixed upload preset; the host answers with
//! a stable, publicly fetchable URL. Batches run concurrently but results
//! keep input order, and any failure aborts the whole submission before
//! the record is persisted. Already-uploaded siblings are not rolled back.

use log::debug;
use reqwest::blocking::{Client, multipart};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::thread;

use super::{RemoteError, ok_or_status};
use crate::config::UploadConfig;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

#[derive(Clone)]
pub struct ImageUploader {
    client: Client,
    endpoint: String,
    preset: String,
}

impl ImageUploader {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            preset: config.preset.clone(),
        }
    }

    /// Upload one file, returning its hosted URL.
    pub fn upload(&self, path: &Path) -> Result<String, RemoteError> {
        let form = multipart::Form::new()
            .file("file", path)?
            .text("upload_preset", self.preset.clone());
        let response = self.client.post(&self.endpoint).multipart(form).send()?;
        let response = ok_or_status(response)?;
        let body = response.text()?;
        let url = parse_upload_response(&body)?;
        debug!("Uploaded {} -> {url}", path.display());
        Ok(url)
    }

    /// Upload a batch concurrently, preserving input order in the result.
    ///
    /// All-or-nothing: the first failure fails the whole batch. Position N
    /// of the output is always file N's URL (join-then-zip, never
    /// append-on-completion).
    pub fn upload_batch(&self, paths: &[PathBuf]) -> Result<Vec<String>, RemoteError> {
        let results: Vec<Result<String, RemoteError>> = thread::scope(|scope| {
            let handles: Vec<_> = paths
                .iter()
                .map(|path| scope.spawn(move || self.upload(path)))
                .collect();
            handles
                .into_iter()
                .map(|handle| {
                    handle.join().unwrap_or_else(|_| {
                        Err(RemoteError::BadResponse("upload thread panicked".into()))
                    })
                })
                .collect()
        });
        results.into_iter().collect()
    }
}

/// Extract the hosted URL from the upload response body.
fn parse_upload_response(body: &str) -> Result<String, RemoteError> {
    let parsed: UploadResponse = serde_json::from_str(body)
        .map_err(|e| RemoteError::BadResponse(format!("invalid upload response: {e}")))?;
    parsed
        .secure_url
        .ok_or_else(|| RemoteError::BadResponse("upload response had no secure_url".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_upload_response_ok() {
        let url = parse_upload_response(
            r#"{"secure_url": "https://cdn.example.com/a.jpg", "bytes": 123}"#,
        )
        .unwrap();
        assert_eq!(url, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn test_parse_upload_response_missing_url() {
        let err = parse_upload_response(r#"{"error": {"message": "preset not found"}}"#);
        assert!(matches!(err, Err(RemoteError::BadResponse(_))));
    }

    #[test]
    fn test_parse_upload_response_garbage() {
        assert!(parse_upload_response("<html>nope</html>").is_err());
    }
}
