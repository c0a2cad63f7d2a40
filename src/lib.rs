// Locus Service Library

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod security;
pub mod services;

pub use error::{AppError, Result};

pub use models::{Identity, Locus, LocusFilter, LocusMember, Role};

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub identities: Arc<dyn security::IdentityProvider>,
    pub tokens: security::TokenService,
}
