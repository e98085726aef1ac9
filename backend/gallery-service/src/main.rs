/// Gallery Service - HTTP server
///
/// Wires configuration, the record and media stores, the realtime
/// broadcaster and the route table into one actix-web server.
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use gallery_service::services::AuthService;
use gallery_service::{routes, AppState, Config};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();
    let state = AppState::initialize(&config)?;

    match &config.admin.password {
        Some(password) => {
            AuthService::new(state.stores.clone())
                .seed_admin(&config.admin.username, password)
                .await?;
        }
        None => {
            tracing::warn!("ADMIN_PASSWORD not set; no admin account will be seeded");
        }
    }

    let bind_address = format!("{}:{}", config.app.host, config.app.port);
    tracing::info!(env = %config.app.env, "gallery-service listening on {}", bind_address);

    let app_config = config.clone();
    HttpServer::new(move || {
        // Build CORS configuration
        let mut cors = Cors::default();
        for origin in app_config.cors.allowed_origins.split(',') {
            let origin = origin.trim();
            if origin == "*" {
                cors = cors.allow_any_origin();
            } else {
                cors = cors.allowed_origin(origin);
            }
        }
        cors = cors.allow_any_method().allow_any_header().max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(TracingLogger::default())
            .configure(routes::configure)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
