//! File-backed record collections.
//!
//! Each collection is a single JSON document on disk. All mutations for a
//! collection are serialized through its async mutex, and every write goes to
//! a temporary path that is renamed over the target, so an interrupted write
//! cannot leave a truncated document behind.

use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::models::{ContentDoc, PaymentsDoc, UsersDoc};

pub mod media;

pub use media::MediaStore;

/// One JSON-encoded collection document on disk.
pub struct JsonCollection<D> {
    path: PathBuf,
    lock: Mutex<()>,
    _doc: PhantomData<D>,
}

impl<D> JsonCollection<D>
where
    D: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
            _doc: PhantomData,
        }
    }

    /// Full snapshot of the collection.
    pub async fn read(&self) -> Result<D> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Read-modify-write under the collection's writer lock.
    ///
    /// The document is persisted only when the closure returns `Ok`; an `Err`
    /// leaves the file untouched.
    pub async fn mutate<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut D) -> Result<R>,
    {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let out = f(&mut doc)?;
        self.persist(&doc).await?;
        Ok(out)
    }

    async fn load(&self) -> Result<D> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                AppError::Storage(format!("malformed {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // First access materializes the empty shape.
                let doc = D::default();
                self.persist(&doc).await?;
                Ok(doc)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, doc: &D) -> Result<()> {
        let json = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

/// The three record collections backing the service.
pub struct Stores {
    pub users: JsonCollection<UsersDoc>,
    pub content: JsonCollection<ContentDoc>,
    pub payments: JsonCollection<PaymentsDoc>,
}

impl Stores {
    pub fn open(data_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        Ok(Self {
            users: JsonCollection::new(data_dir.join("users.json")),
            content: JsonCollection::new(data_dir.join("content.json")),
            payments: JsonCollection::new(data_dir.join("payments.json")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, User};
    use tempfile::TempDir;

    fn user(name: &str) -> User {
        User {
            username: name.to_string(),
            password_hash: "hash".to_string(),
            firstname: name.to_string(),
            phone: "555".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn first_read_materializes_empty_shape() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.json");
        let coll: JsonCollection<UsersDoc> = JsonCollection::new(path.clone());

        let doc = coll.read().await.unwrap();
        assert!(doc.users.is_empty());

        let on_disk = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&on_disk).unwrap();
        assert!(value["users"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn mutate_persists_on_ok() {
        let tmp = TempDir::new().unwrap();
        let coll: JsonCollection<UsersDoc> = JsonCollection::new(tmp.path().join("users.json"));

        coll.mutate(|doc| {
            doc.users.push(user("ada"));
            Ok(())
        })
        .await
        .unwrap();

        let doc = coll.read().await.unwrap();
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.users[0].username, "ada");
    }

    #[tokio::test]
    async fn mutate_leaves_file_untouched_on_err() {
        let tmp = TempDir::new().unwrap();
        let coll: JsonCollection<UsersDoc> = JsonCollection::new(tmp.path().join("users.json"));

        coll.mutate(|doc| {
            doc.users.push(user("ada"));
            Ok(())
        })
        .await
        .unwrap();

        let result: Result<()> = coll
            .mutate(|doc| {
                doc.users.clear();
                Err(AppError::NotFound("nope".into()))
            })
            .await;
        assert!(result.is_err());

        let doc = coll.read().await.unwrap();
        assert_eq!(doc.users.len(), 1);
    }

    #[tokio::test]
    async fn malformed_document_is_a_storage_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();
        let coll: JsonCollection<UsersDoc> = JsonCollection::new(path);

        match coll.read().await {
            Err(AppError::Storage(_)) => {}
            other => panic!("expected storage error, got {:?}", other.map(|d| d.users.len())),
        }
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let tmp = TempDir::new().unwrap();
        let coll: JsonCollection<ContentDoc> = JsonCollection::new(tmp.path().join("content.json"));
        coll.mutate(|_| Ok(())).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["content.json".to_string()]);
    }

    #[tokio::test]
    async fn concurrent_mutations_do_not_lose_updates() {
        let tmp = TempDir::new().unwrap();
        let coll: std::sync::Arc<JsonCollection<UsersDoc>> =
            std::sync::Arc::new(JsonCollection::new(tmp.path().join("users.json")));

        let mut handles = Vec::new();
        for i in 0..8 {
            let coll = coll.clone();
            handles.push(tokio::spawn(async move {
                coll.mutate(move |doc| {
                    doc.users.push(user(&format!("user{}", i)));
                    Ok(())
                })
                .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let doc = coll.read().await.unwrap();
        assert_eq!(doc.users.len(), 8);
    }
}
