//! HTTP boundary: request decoding and response mapping for the domain
//! operations.

pub mod analytics;
pub mod auth;
pub mod content;
pub mod media;
pub mod multipart;
pub mod payments;
pub mod ws;

pub use analytics::analytics;
pub use auth::{login, register};
pub use content::{
    add_comment, create_content, delete_content, get_comments, get_content, list_content,
    toggle_like,
};
pub use media::{serve_proof, serve_upload};
pub use payments::{
    admin_payments, approve_payment, check_payment, reject_payment, submit_payment,
};
pub use ws::connect as ws_connect;
