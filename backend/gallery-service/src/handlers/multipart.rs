//! Multipart decoding shared by the upload endpoints.
//!
//! Streams every field into memory, splitting the payload into text fields
//! and one binary file.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::error::{AppError, Result};

/// Per-field guardrail enforced at the boundary.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug)]
pub struct UploadedFile {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct UploadPayload {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl UploadPayload {
    /// Text field by name; missing fields read as empty.
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

/// Drain a multipart body, treating `file_field` as the binary part and
/// everything else as UTF-8 text fields.
pub async fn collect(mut payload: Multipart, file_field: &str) -> Result<UploadPayload> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(entry) = payload.next().await {
        let mut field = entry
            .map_err(|e| AppError::Validation(format!("invalid multipart payload: {}", e)))?;
        let name = field.name().unwrap_or("").to_string();

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AppError::Validation(format!("failed to read field {}: {}", name, e)))?;
            if buf.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(AppError::Validation(format!(
                    "field {} exceeds the upload limit",
                    name
                )));
            }
            buf.extend_from_slice(&chunk);
        }

        if name == file_field {
            let original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("upload")
                .to_string();
            file = Some(UploadedFile {
                original_name,
                bytes: buf,
            });
        } else {
            let value = String::from_utf8(buf).map_err(|_| {
                AppError::Validation(format!("field {} is not valid UTF-8", name))
            })?;
            fields.insert(name, value);
        }
    }

    Ok(UploadPayload { fields, file })
}
