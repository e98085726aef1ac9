/// Content operations: gallery items, comments, likes.
use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{timestamp_id, Comment, ContentItem};
use crate::realtime::{Broadcaster, RealtimeEvent};
use crate::store::{MediaStore, Stores};

#[derive(Clone)]
pub struct ContentService {
    stores: Arc<Stores>,
    media: MediaStore,
    broadcaster: Broadcaster,
}

/// Decoded upload for a new gallery item.
#[derive(Debug)]
pub struct NewContent {
    pub title: String,
    pub project_title: String,
    pub kind: String,
    pub description: String,
    pub media_bytes: Vec<u8>,
    pub media_filename: String,
}

impl ContentService {
    pub fn new(stores: Arc<Stores>, media: MediaStore, broadcaster: Broadcaster) -> Self {
        Self {
            stores,
            media,
            broadcaster,
        }
    }

    pub async fn list(&self) -> Result<Vec<ContentItem>> {
        Ok(self.stores.content.read().await?.items)
    }

    pub async fn get(&self, id: &str) -> Result<ContentItem> {
        self.stores
            .content
            .read()
            .await?
            .items
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::NotFound("Item not found".to_string()))
    }

    pub async fn create(&self, new: NewContent) -> Result<ContentItem> {
        let filename = self.media.store(&new.media_bytes, &new.media_filename).await?;
        let item = ContentItem {
            id: timestamp_id(),
            title: new.title,
            project_title: new.project_title,
            kind: new.kind,
            filename,
            description: new.description,
            upload_date: Utc::now(),
            likes: 0,
            comments: Vec::new(),
            liked_by: Vec::new(),
        };

        let created = item.clone();
        let items = self
            .stores
            .content
            .mutate(move |doc| {
                doc.items.insert(0, item);
                Ok(doc.items.clone())
            })
            .await?;

        tracing::info!(id = %created.id, title = %created.title, "created content item");
        self.broadcaster
            .publish(&RealtimeEvent::ContentUpdated(items))
            .await;
        Ok(created)
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        let (filename, items) = self
            .stores
            .content
            .mutate(|doc| {
                let idx = doc
                    .items
                    .iter()
                    .position(|item| item.id == id)
                    .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
                let removed = doc.items.remove(idx);
                Ok((removed.filename, doc.items.clone()))
            })
            .await?;

        // Best effort: an already-missing media file is not an error.
        self.media.delete(&filename).await;

        tracing::info!(%id, "deleted content item");
        self.broadcaster
            .publish(&RealtimeEvent::ContentUpdated(items))
            .await;
        Ok(())
    }

    pub async fn comments(&self, item_id: &str) -> Result<Vec<Comment>> {
        Ok(self.get(item_id).await?.comments)
    }

    pub async fn add_comment(&self, item_id: &str, username: &str, text: &str) -> Result<Comment> {
        // Denormalized snapshot of the author's name; unknown authors keep a
        // generic label rather than failing the operation.
        let author_first_name = self
            .stores
            .users
            .read()
            .await?
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.firstname.clone())
            .unwrap_or_else(|| "User".to_string());

        let comment = Comment {
            id: timestamp_id(),
            author_username: username.to_string(),
            author_first_name,
            text: text.to_string(),
            date: Utc::now(),
        };

        let added = comment.clone();
        self.stores
            .content
            .mutate(move |doc| {
                let item = doc
                    .items
                    .iter_mut()
                    .find(|item| item.id == item_id)
                    .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;
                item.comments.insert(0, comment);
                Ok(())
            })
            .await?;

        self.broadcaster
            .publish(&RealtimeEvent::CommentAdded {
                item_id: item_id.to_string(),
                comment: added.clone(),
            })
            .await;
        Ok(added)
    }

    /// Toggle `username`'s like. Returns the new count and whether the user
    /// now likes the item.
    pub async fn toggle_like(&self, item_id: &str, username: &str) -> Result<(usize, bool)> {
        let (likes, liked, liked_by) = self
            .stores
            .content
            .mutate(|doc| {
                let item = doc
                    .items
                    .iter_mut()
                    .find(|item| item.id == item_id)
                    .ok_or_else(|| AppError::NotFound("Item not found".to_string()))?;

                let liked = match item.liked_by.iter().position(|u| u == username) {
                    Some(pos) => {
                        item.liked_by.remove(pos);
                        false
                    }
                    None => {
                        item.liked_by.push(username.to_string());
                        true
                    }
                };
                item.likes = item.liked_by.len();
                Ok((item.likes, liked, item.liked_by.clone()))
            })
            .await?;

        self.broadcaster
            .publish(&RealtimeEvent::LikeUpdated {
                item_id: item_id.to_string(),
                likes,
                liked_by,
            })
            .await;
        Ok((likes, liked))
    }
}
