/// Analytics handler
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::services::AnalyticsService;
use crate::AppState;

pub async fn analytics(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = AnalyticsService::new(state.stores.clone()).snapshot().await?;
    Ok(HttpResponse::Ok().json(snapshot))
}
