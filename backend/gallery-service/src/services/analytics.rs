/// Aggregated gallery statistics.
use std::sync::Arc;

use serde::Serialize;

use crate::error::Result;
use crate::models::{ContentItem, PaymentStatus};
use crate::store::Stores;

#[derive(Clone)]
pub struct AnalyticsService {
    stores: Arc<Stores>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryStats {
    pub total_artworks: usize,
    pub total_likes: usize,
    pub total_comments: usize,
    pub pending_payments: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    pub most_liked: Vec<ContentItem>,
    pub stats: GalleryStats,
}

impl AnalyticsService {
    pub fn new(stores: Arc<Stores>) -> Self {
        Self { stores }
    }

    pub async fn snapshot(&self) -> Result<AnalyticsSnapshot> {
        let items = self.stores.content.read().await?.items;
        let payments = self.stores.payments.read().await?.payments;

        // Stable sort: equal like counts keep their insertion order.
        let mut most_liked = items.clone();
        most_liked.sort_by(|a, b| b.likes.cmp(&a.likes));
        most_liked.truncate(5);

        let stats = GalleryStats {
            total_artworks: items.len(),
            total_likes: items.iter().map(|item| item.likes).sum(),
            total_comments: items.iter().map(|item| item.comments.len()).sum(),
            pending_payments: payments
                .iter()
                .filter(|p| p.status == PaymentStatus::Pending)
                .count(),
        };

        Ok(AnalyticsSnapshot { most_liked, stats })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn item(id: &str, likes: usize, comments: usize) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: id.to_string(),
            project_title: "Series".to_string(),
            kind: "image".to_string(),
            filename: format!("{}.png", id),
            description: String::new(),
            upload_date: Utc::now(),
            likes,
            comments: (0..comments)
                .map(|i| crate::models::Comment {
                    id: format!("{}-{}", id, i),
                    author_username: "ada".to_string(),
                    author_first_name: "Ada".to_string(),
                    text: "nice".to_string(),
                    date: Utc::now(),
                })
                .collect(),
            liked_by: (0..likes).map(|i| format!("user{}", i)).collect(),
        }
    }

    #[actix_web::test]
    async fn most_liked_sorts_descending_with_stable_ties() {
        let tmp = TempDir::new().unwrap();
        let stores = Arc::new(Stores::open(tmp.path()).unwrap());
        stores
            .content
            .mutate(|doc| {
                for (id, likes) in [("a", 5), ("b", 3), ("c", 3), ("d", 1), ("e", 0)] {
                    doc.items.push(item(id, likes, 0));
                }
                Ok(())
            })
            .await
            .unwrap();

        let snapshot = AnalyticsService::new(stores).snapshot().await.unwrap();
        let ids: Vec<_> = snapshot.most_liked.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e"]);
    }

    #[actix_web::test]
    async fn most_liked_caps_at_five() {
        let tmp = TempDir::new().unwrap();
        let stores = Arc::new(Stores::open(tmp.path()).unwrap());
        stores
            .content
            .mutate(|doc| {
                for i in 0..7 {
                    doc.items.push(item(&format!("i{}", i), i, 0));
                }
                Ok(())
            })
            .await
            .unwrap();

        let snapshot = AnalyticsService::new(stores).snapshot().await.unwrap();
        assert_eq!(snapshot.most_liked.len(), 5);
        assert_eq!(snapshot.most_liked[0].likes, 6);
    }

    #[actix_web::test]
    async fn stats_aggregate_counts() {
        let tmp = TempDir::new().unwrap();
        let stores = Arc::new(Stores::open(tmp.path()).unwrap());
        stores
            .content
            .mutate(|doc| {
                doc.items.push(item("a", 2, 3));
                doc.items.push(item("b", 1, 1));
                Ok(())
            })
            .await
            .unwrap();
        stores
            .payments
            .mutate(|doc| {
                for (id, status) in [
                    ("1", PaymentStatus::Pending),
                    ("2", PaymentStatus::Rejected),
                    ("3", PaymentStatus::Pending),
                ] {
                    doc.payments.push(crate::models::Payment {
                        id: id.to_string(),
                        username: "ada".to_string(),
                        proof_filename: format!("{}.png", id),
                        status,
                        date: Utc::now(),
                    });
                }
                Ok(())
            })
            .await
            .unwrap();

        let snapshot = AnalyticsService::new(stores).snapshot().await.unwrap();
        assert_eq!(snapshot.stats.total_artworks, 2);
        assert_eq!(snapshot.stats.total_likes, 3);
        assert_eq!(snapshot.stats.total_comments, 4);
        assert_eq!(snapshot.stats.pending_payments, 2);
    }
}
