/// Locus listing handler
///
/// Query parameters: `id` (repeatable), `assemblyId`, `regionId`
/// (repeatable), `membershipStatus`, `sideload=locusMembers` (admin
/// only), `page`, `rows`, `sortBy`, `sortOrder`.
use actix_web::{web, HttpRequest, HttpResponse};

use crate::error::AppError;
use crate::models::{Identity, LocusFilter};
use crate::services::{self, LocusListing};
use crate::AppState;

/// List loci visible to the caller's role
#[utoipa::path(
    get,
    path = "/api/locus",
    tag = "Locus",
    responses(
        (status = 200, description = "Matching loci", body = Vec<crate::models::Locus>),
        (status = 400, description = "Malformed query parameter", body = crate::handlers::auth::ErrorResponse),
        (status = 401, description = "Missing token", body = crate::handlers::auth::ErrorResponse),
        (status = 403, description = "Invalid or expired token", body = crate::handlers::auth::ErrorResponse),
        (status = 500, description = "Internal error", body = crate::handlers::auth::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_locus(
    state: web::Data<AppState>,
    identity: Identity,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let filter = LocusFilter::from_query(req.query_string())?;

    match services::locus::list(&state.db, &filter, identity.role).await? {
        LocusListing::Flat(rows) => Ok(HttpResponse::Ok().json(rows)),
        LocusListing::Sideloaded(rows) => Ok(HttpResponse::Ok().json(rows)),
    }
}
