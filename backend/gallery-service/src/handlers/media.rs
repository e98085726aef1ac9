/// Static retrieval of stored binaries by generated filename.
use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::store::MediaStore;
use crate::AppState;

pub async fn serve_upload(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    serve(&state.uploads, &filename).await
}

pub async fn serve_proof(
    state: web::Data<AppState>,
    filename: web::Path<String>,
) -> Result<HttpResponse> {
    serve(&state.proofs, &filename).await
}

async fn serve(store: &MediaStore, filename: &str) -> Result<HttpResponse> {
    let bytes = store.read(filename).await?;
    Ok(HttpResponse::Ok()
        .insert_header(ContentType(MediaStore::content_type(filename)))
        .body(bytes))
}
