/// Data models for gallery-service
///
/// Wire and persisted JSON both use camelCase keys; the persisted collection
/// documents are wrapper objects holding one named array each.
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role attached to an account. Elevated operations are gated on `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    /// Argon2id hash in PHC string format, never the raw password.
    pub password_hash: String,
    pub firstname: String,
    pub phone: String,
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// A comment embedded in its content item. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_username: String,
    /// Snapshot of the author's first name at comment time.
    pub author_first_name: String,
    pub text: String,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: String,
    pub title: String,
    pub project_title: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Generated name of the backing file in the uploads store.
    pub filename: String,
    pub description: String,
    pub upload_date: DateTime<Utc>,
    /// Always equals `liked_by.len()`.
    pub likes: usize,
    /// Newest first.
    pub comments: Vec<Comment>,
    pub liked_by: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub username: String,
    /// Generated name of the proof file; deleted when the payment resolves.
    pub proof_filename: String,
    pub status: PaymentStatus,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsersDoc {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentDoc {
    pub items: Vec<ContentItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentsDoc {
    pub payments: Vec<Payment>,
}

static LAST_ID: Mutex<i64> = Mutex::new(0);

/// Millisecond-precision creation timestamp used as a record id.
///
/// Calls landing within the same millisecond are bumped forward so ids stay
/// unique within the process.
pub fn timestamp_id() -> String {
    let mut last = LAST_ID.lock().unwrap();
    let now = Utc::now().timestamp_millis();
    *last = if now > *last { now } else { *last + 1 };
    last.to_string()
}
