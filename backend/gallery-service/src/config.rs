/// Configuration management for gallery-service
///
/// Loads configuration from environment variables with sensible defaults.
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub admin: AdminConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated origin list; "*" allows any origin.
    pub allowed_origins: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub uploads_dir: PathBuf,
    pub proofs_dir: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    /// No default: without a configured password no admin account is seeded.
    pub password: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                host: std::env::var("GALLERY_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("GALLERY_SERVICE_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            },
            cors: CorsConfig {
                allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| "*".to_string()),
            },
            storage: StorageConfig {
                data_dir: std::env::var("GALLERY_DATA_DIR")
                    .unwrap_or_else(|_| "data".to_string())
                    .into(),
                uploads_dir: std::env::var("GALLERY_UPLOADS_DIR")
                    .unwrap_or_else(|_| "uploads".to_string())
                    .into(),
                proofs_dir: std::env::var("GALLERY_PAYMENT_PROOFS_DIR")
                    .unwrap_or_else(|_| "payment-proofs".to_string())
                    .into(),
            },
            admin: AdminConfig {
                username: std::env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
                password: std::env::var("ADMIN_PASSWORD").ok(),
            },
        }
    }
}
