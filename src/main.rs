/// Locus Service - Main entry point
///
/// Read-oriented REST API over the locus dataset, guarded by bearer
/// tokens issued at `/api/login`.
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use locus_service::{
    config::Config,
    handlers,
    middleware::JwtAuth,
    openapi::ApiDoc,
    security::{StaticCredentialStore, TokenService},
    AppState,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locus_service=info,info".into()),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration from environment")?;

    tracing::info!(
        "Starting locus-service v{} on {}:{}",
        env!("CARGO_PKG_VERSION"),
        config.server_host,
        config.server_port
    );

    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    tracing::info!("Database connection pool initialized");

    let state = AppState {
        db: db_pool,
        identities: Arc::new(StaticCredentialStore::new()),
        tokens: TokenService::new(config.jwt_secret.clone()),
    };

    let bind_addr = (config.server_host.clone(), config.server_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .route("/health", web::get().to(health_check))
            .service(
                SwaggerUi::new("/api/docs/{_:.*}").url("/api/docs/openapi.json", ApiDoc::openapi()),
            )
            .service(
                web::scope("/api")
                    .route("/login", web::post().to(handlers::auth::login))
                    .service(
                        web::resource("/locus")
                            .wrap(JwtAuth::new(state.tokens.clone()))
                            .route(web::get().to(handlers::locus::list_locus)),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
    .context("HTTP server error")
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "locus-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
