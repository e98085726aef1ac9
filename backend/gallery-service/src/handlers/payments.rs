/// Payment handlers - submission, status checks, admin review
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::services::PaymentService;
use crate::AppState;

use super::multipart;

fn service(state: &AppState) -> PaymentService {
    PaymentService::new(
        state.stores.clone(),
        state.proofs.clone(),
        state.broadcaster.clone(),
    )
}

pub async fn submit_payment(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let mut upload = multipart::collect(payload, "paymentProof").await?;
    let file = upload
        .file
        .take()
        .ok_or_else(|| AppError::Validation("payment proof file is required".to_string()))?;
    let username = upload.field("username");
    if username.is_empty() {
        return Err(AppError::Validation("username is required".to_string()));
    }

    let payment = service(&state)
        .submit(&username, &file.bytes, &file.original_name)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "payment": payment })))
}

#[derive(Debug, Deserialize)]
pub struct CheckPaymentQuery {
    pub username: String,
}

pub async fn check_payment(
    state: web::Data<AppState>,
    query: web::Query<CheckPaymentQuery>,
) -> Result<HttpResponse> {
    let check = service(&state).check(&query.username).await?;
    Ok(HttpResponse::Ok().json(check))
}

pub async fn admin_payments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let payments = service(&state).list_for_admin().await?;
    Ok(HttpResponse::Ok().json(json!({ "payments": payments })))
}

pub async fn approve_payment(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    service(&state).approve(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub async fn reject_payment(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    service(&state).reject(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
