/// Authentication handlers
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::services::AuthService;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    pub username: String,
    pub firstname: String,
    pub is_admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub firstname: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub username: String,
    pub firstname: String,
}

pub async fn login(
    state: web::Data<AppState>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let user = AuthService::new(state.stores.clone())
        .login(&payload.username, &payload.password)
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        success: true,
        username: user.username,
        firstname: user.firstname,
        is_admin: user.is_admin,
    }))
}

pub async fn register(
    state: web::Data<AppState>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let user = AuthService::new(state.stores.clone())
        .register(
            &payload.username,
            &payload.password,
            &payload.firstname,
            &payload.phone,
        )
        .await?;

    Ok(HttpResponse::Ok().json(RegisterResponse {
        success: true,
        username: user.username,
        firstname: user.firstname,
    }))
}
