//! Uploaded binary storage.
//!
//! Files are kept flat in one directory under generated names of the form
//! `<epoch-ms>-<random-int><.ext>`, preserving the original extension.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::Rng;

use crate::error::{AppError, Result};

#[derive(Clone, Debug)]
pub struct MediaStore {
    dir: PathBuf,
}

impl MediaStore {
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist `bytes` under a freshly generated collision-resistant name.
    pub async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String> {
        let name = generate_name(original_name);
        tokio::fs::write(self.dir.join(&name), bytes).await?;
        Ok(name)
    }

    /// Read a stored file back. Unknown names map to NotFound.
    pub async fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.resolve(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("file {} not found", name)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Idempotent delete: `false` when the file was already absent.
    pub async fn delete(&self, name: &str) -> bool {
        let path = match self.resolve(name) {
            Ok(path) => path,
            Err(_) => return false,
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                tracing::error!("failed to delete {}: {}", name, e);
                false
            }
        }
    }

    /// Map a stored name to its path, rejecting anything that could escape
    /// the directory. Generated names never contain separators.
    fn resolve(&self, name: &str) -> Result<PathBuf> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::NotFound(format!("file {} not found", name)));
        }
        Ok(self.dir.join(name))
    }

    /// Content type for serving, inferred from the stored extension.
    pub fn content_type(name: &str) -> mime::Mime {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        let raw = match ext.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("svg") => "image/svg+xml",
            Some("mp4") => "video/mp4",
            Some("mov") => "video/quicktime",
            Some("webm") => "video/webm",
            Some("mp3") => "audio/mpeg",
            Some("wav") => "audio/wav",
            Some("pdf") => "application/pdf",
            _ => "application/octet-stream",
        };
        raw.parse().unwrap_or(mime::APPLICATION_OCTET_STREAM)
    }
}

fn generate_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();
    format!(
        "{}-{}{}",
        Utc::now().timestamp_millis(),
        rand::thread_rng().gen_range(0..1_000_000_000u32),
        ext
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn store_and_read_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = MediaStore::open(tmp.path()).unwrap();

        let name = store.store(b"payload", "piece.png").await.unwrap();
        assert!(name.ends_with(".png"), "kept extension: {}", name);
        assert_eq!(store.read(&name).await.unwrap(), b"payload");
    }

    #[tokio::test]
    async fn generated_names_differ_for_same_original() {
        let tmp = TempDir::new().unwrap();
        let store = MediaStore::open(tmp.path()).unwrap();

        let a = store.store(b"a", "same.jpg").await.unwrap();
        let b = store.store(b"b", "same.jpg").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let store = MediaStore::open(tmp.path()).unwrap();

        let name = store.store(b"x", "proof.pdf").await.unwrap();
        assert!(store.delete(&name).await);
        assert!(!store.delete(&name).await);
    }

    #[tokio::test]
    async fn traversal_names_are_rejected() {
        let tmp = TempDir::new().unwrap();
        let store = MediaStore::open(tmp.path()).unwrap();

        assert!(store.read("../users.json").await.is_err());
        assert!(store.read("a/b.png").await.is_err());
        assert!(!store.delete("../users.json").await);
    }

    #[test]
    fn extensionless_names_get_octet_stream() {
        assert_eq!(
            MediaStore::content_type("1700000000000-7"),
            mime::APPLICATION_OCTET_STREAM
        );
        assert_eq!(
            MediaStore::content_type("x.png").to_string(),
            "image/png"
        );
        assert_eq!(
            MediaStore::content_type("x.JPG").to_string(),
            "image/jpeg"
        );
    }
}
