/// OpenAPI documentation for the locus service
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers::auth::{ErrorResponse, LoginRequest, LoginResponse};
use crate::models::{Locus, LocusMember, LocusWithMembers, Role};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Locus Service API",
        description = "Read-oriented REST API over genomic loci and their members, \
            with role-based filtering and optional member sideloading."
    ),
    paths(
        crate::handlers::auth::login,
        crate::handlers::locus::list_locus
    ),
    components(schemas(
        LoginRequest,
        LoginResponse,
        ErrorResponse,
        Locus,
        LocusMember,
        LocusWithMembers,
        Role
    )),
    tags(
        (name = "Auth", description = "Authentication & token APIs"),
        (name = "Locus", description = "Locus listing and member sideloading")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
