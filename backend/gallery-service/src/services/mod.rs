//! Domain operations over the record and media stores.

pub mod analytics;
pub mod auth;
pub mod content;
pub mod payments;

pub use analytics::{AnalyticsService, AnalyticsSnapshot, GalleryStats};
pub use auth::{AuthService, AuthenticatedUser};
pub use content::{ContentService, NewContent};
pub use payments::{AdminPayment, PaymentCheck, PaymentService};
