//! Route table for the HTTP gateway.
//!
//! Shared between the binary and the integration tests so both drive the
//! same application.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health))
            .route("/login", web::post().to(handlers::login))
            .route("/register", web::post().to(handlers::register))
            .route("/content", web::get().to(handlers::list_content))
            .route("/content", web::post().to(handlers::create_content))
            .route("/content/{id}", web::get().to(handlers::get_content))
            .route("/content/{id}", web::delete().to(handlers::delete_content))
            .route("/get-comments/{id}", web::get().to(handlers::get_comments))
            .route("/content/{id}/comments", web::post().to(handlers::add_comment))
            .route("/content/{id}/likes", web::post().to(handlers::toggle_like))
            .route("/submit-payment", web::post().to(handlers::submit_payment))
            .route("/check-payment", web::get().to(handlers::check_payment))
            .route("/analytics", web::get().to(handlers::analytics))
            .service(
                web::scope("/admin")
                    .route("/payments", web::get().to(handlers::admin_payments))
                    .route(
                        "/payments/{id}/approve",
                        web::post().to(handlers::approve_payment),
                    )
                    .route(
                        "/payments/{id}/reject",
                        web::post().to(handlers::reject_payment),
                    ),
            ),
    )
    .route("/uploads/{filename}", web::get().to(handlers::serve_upload))
    .route(
        "/payment-proofs/{filename}",
        web::get().to(handlers::serve_proof),
    )
    .route("/ws", web::get().to(handlers::ws_connect));
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}
