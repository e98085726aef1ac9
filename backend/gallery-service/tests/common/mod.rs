//! Shared fixtures for the HTTP API tests.

use std::sync::Arc;

use gallery_service::realtime::Broadcaster;
use gallery_service::store::{MediaStore, Stores};
use gallery_service::AppState;
use tempfile::TempDir;

/// Application state over throwaway storage directories.
pub fn test_state(tmp: &TempDir) -> AppState {
    AppState {
        stores: Arc::new(Stores::open(&tmp.path().join("data")).unwrap()),
        uploads: MediaStore::open(tmp.path().join("uploads")).unwrap(),
        proofs: MediaStore::open(tmp.path().join("payment-proofs")).unwrap(),
        broadcaster: Broadcaster::new(),
    }
}

const BOUNDARY: &str = "----gallerytestboundary";

/// Build a multipart/form-data request body with text fields and one file
/// part. Returns the content-type header value and the body bytes.
pub fn multipart_body(
    fields: &[(&str, &str)],
    file_field: &str,
    filename: &str,
    file_bytes: &[u8],
) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{file_field}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(file_bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    (
        format!("multipart/form-data; boundary={BOUNDARY}"),
        body,
    )
}
