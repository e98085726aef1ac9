/// Content handlers - HTTP endpoints for gallery items, comments and likes
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, Result};
use crate::services::{ContentService, NewContent};
use crate::AppState;

use super::multipart;

fn service(state: &AppState) -> ContentService {
    ContentService::new(
        state.stores.clone(),
        state.uploads.clone(),
        state.broadcaster.clone(),
    )
}

pub async fn list_content(state: web::Data<AppState>) -> Result<HttpResponse> {
    let items = service(&state).list().await?;
    Ok(HttpResponse::Ok().json(json!({ "items": items })))
}

pub async fn get_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let item = service(&state).get(&id).await?;
    Ok(HttpResponse::Ok().json(item))
}

pub async fn create_content(
    state: web::Data<AppState>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let mut upload = multipart::collect(payload, "media").await?;
    let file = upload
        .file
        .take()
        .ok_or_else(|| AppError::Validation("media file is required".to_string()))?;

    let item = service(&state)
        .create(NewContent {
            title: upload.field("title"),
            project_title: upload.field("projectTitle"),
            kind: upload.field("type"),
            description: upload.field("description"),
            media_bytes: file.bytes,
            media_filename: file.original_name,
        })
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "item": item })))
}

pub async fn delete_content(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    service(&state).delete(&id).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}

pub async fn get_comments(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse> {
    let comments = service(&state).comments(&id).await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub username: String,
    pub text: String,
}

pub async fn add_comment(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let comment = service(&state)
        .add_comment(&id, &payload.username, &payload.text)
        .await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "comment": comment })))
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub username: String,
}

pub async fn toggle_like(
    state: web::Data<AppState>,
    id: web::Path<String>,
    payload: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    let (likes, liked) = service(&state).toggle_like(&id, &payload.username).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true, "likes": likes, "liked": liked })))
}
